// Copyright (c) 2026 glyphrain contributors

use rand::rngs::StdRng;
use rand::Rng;

use crate::column::Column;
use crate::painter::Painter;
use crate::palette::Theme;

/// Layout and motion parameters shared by every column; immutable after
/// startup except via a full rebuild.
#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    pub rows: u16,
    pub min_font: u16,
    pub max_font: u16,
    pub rain_speed: f32,
    pub allow_midway: bool,
    /// Chance for a column to start the process already raining.
    pub initial_active_pct: f64,
}

/// The whole rain world: rows of columns (one virtual font size per row,
/// nearest first), the shared glyph pool, and the single seeded RNG every
/// random decision flows through.
pub struct Grid {
    pub cfg: GridConfig,
    pub rows: Vec<Vec<Column>>,
    glyphs: Vec<char>,
    rng: StdRng,
}

/// Virtual font size for a depth row, linearly interpolated from `max_font`
/// (row 0, nearest) down to `min_font` (last row, farthest).
pub fn row_font_size(cfg: &GridConfig, row: u16) -> u16 {
    let denom = cfg.rows.saturating_sub(1).max(1) as f32;
    let span = cfg.max_font.saturating_sub(cfg.min_font) as f32;
    cfg.max_font - ((row as f32 / denom) * span) as u16
}

impl Grid {
    pub fn new(cfg: GridConfig, width_px: f32, height_px: f32, glyphs: Vec<char>, rng: StdRng) -> Self {
        let mut grid = Self {
            cfg,
            rows: Vec::new(),
            glyphs,
            rng,
        };
        grid.rebuild(width_px, height_px);
        grid
    }

    /// (Re)constructs every row, used at startup and on terminal resize.
    /// Keeps the RNG and glyph pool.
    pub fn rebuild(&mut self, width_px: f32, height_px: f32) {
        self.rows.clear();
        for r in 0..self.cfg.rows {
            let font = row_font_size(&self.cfg, r);
            let spacing = (font + self.rng.random_range(8..=16)) as f32;
            let offset = self.rng.random_range(0.0..=spacing);
            let slots = (width_px / spacing) as usize;

            let mut row = Vec::with_capacity(slots);
            for c in 0..slots {
                let x = c as f32 * spacing + offset;
                let active = self.rng.random_bool(self.cfg.initial_active_pct);
                row.push(Column::new(
                    x,
                    font,
                    height_px,
                    self.cfg.rain_speed,
                    self.cfg.allow_midway,
                    active,
                    &mut self.rng,
                ));
            }
            self.rows.push(row);
        }
    }

    /// One simulation tick for every column.
    pub fn update(&mut self) {
        for row in &mut self.rows {
            for col in row {
                col.update(&mut self.rng, &self.glyphs);
            }
        }
    }

    pub fn draw(&self, painter: &mut Painter<'_>, theme: &Theme, debug: bool) {
        for row in &self.rows {
            for col in row {
                col.draw(painter, theme, debug);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn cfg(rows: u16, min_font: u16, max_font: u16) -> GridConfig {
        GridConfig {
            rows,
            min_font,
            max_font,
            rain_speed: 3.0,
            allow_midway: true,
            initial_active_pct: 0.3,
        }
    }

    #[test]
    fn single_row_with_equal_fonts_does_not_interpolate() {
        assert_eq!(row_font_size(&cfg(1, 20, 20), 0), 20);
    }

    #[test]
    fn font_sizes_span_from_max_down_to_min() {
        let c = cfg(6, 12, 36);
        assert_eq!(row_font_size(&c, 0), 36);
        assert_eq!(row_font_size(&c, 5), 12);
        for r in 1..6 {
            assert!(row_font_size(&c, r) <= row_font_size(&c, r - 1));
        }
    }

    #[test]
    fn rebuild_fills_the_width_with_columns() {
        let rng = StdRng::seed_from_u64(11);
        let grid = Grid::new(cfg(3, 12, 36), 2880.0, 1080.0, vec!['0', '1'], rng);
        assert_eq!(grid.rows.len(), 3);
        for row in &grid.rows {
            assert!(!row.is_empty());
        }
    }

    #[test]
    fn world_invariants_hold_across_many_ticks() {
        let rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(cfg(4, 12, 36), 1440.0, 720.0, vec!['0', '1', '𓀀'], rng);
        for _ in 0..2_000 {
            grid.update();
            for row in &grid.rows {
                for col in row {
                    assert!(col.symbols.len() <= col.max_length);
                }
            }
        }
    }
}
