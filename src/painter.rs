// Copyright (c) 2026 glyphrain contributors

use crate::cell::Cell;
use crate::frame::Frame;
use crate::palette::{shade, to_color, ColorMode, Rgb};

/// Projects the simulation's virtual pixel space onto terminal cells.
///
/// The simulation keeps the original pixel-based coordinate model (font sizes
/// in px, px/tick speeds); one terminal cell covers `cell_px` virtual pixels
/// in each direction, so the nearest depth layer lands roughly one glyph per
/// cell and farther layers compress.
pub struct Painter<'a> {
    frame: &'a mut Frame,
    cell_px: f32,
    mode: ColorMode,
}

impl<'a> Painter<'a> {
    pub fn new(frame: &'a mut Frame, cell_px: f32, mode: ColorMode) -> Self {
        Self {
            frame,
            cell_px: cell_px.max(1.0),
            mode,
        }
    }

    fn to_cell(&self, px: f32) -> Option<u16> {
        if px < 0.0 {
            return None;
        }
        let c = (px / self.cell_px).floor();
        if c > u16::MAX as f32 {
            return None;
        }
        Some(c as u16)
    }

    /// Draws one glyph at virtual-pixel coordinates with the given color and
    /// alpha. Fully transparent glyphs and off-screen positions are skipped.
    pub fn draw_glyph(&mut self, x_px: f32, y_px: f32, ch: char, rgb: Rgb, alpha: u8, bold: bool) {
        if alpha == 0 {
            return;
        }
        let (Some(x), Some(y)) = (self.to_cell(x_px), self.to_cell(y_px)) else {
            return;
        };
        self.frame.set(
            x,
            y,
            Cell {
                ch,
                fg: to_color(self.mode, shade(rgb, alpha)),
                bold,
            },
        );
    }

    /// Debug guideline: a dim vertical rule at the given x, drawn only into
    /// cells the rain has not touched this frame.
    pub fn draw_guideline(&mut self, x_px: f32, rgb: Rgb) {
        let Some(x) = self.to_cell(x_px) else {
            return;
        };
        let fg = to_color(self.mode, rgb);
        for y in 0..self.frame.height {
            if self.frame.get(x, y).map(|c| c.ch) == Some(' ') {
                self.frame.set(
                    x,
                    y,
                    Cell {
                        ch: '│',
                        fg,
                        bold: false,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painter_over(frame: &mut Frame) -> Painter<'_> {
        Painter::new(frame, 10.0, ColorMode::TrueColor)
    }

    #[test]
    fn glyph_lands_in_the_covering_cell() {
        let mut f = Frame::new(8, 8);
        let mut p = painter_over(&mut f);
        p.draw_glyph(25.0, 34.9, 'A', (0, 255, 70), 255, true);
        assert_eq!(f.get(2, 3).unwrap().ch, 'A');
        assert!(f.get(2, 3).unwrap().bold);
    }

    #[test]
    fn negative_and_transparent_draws_are_dropped() {
        let mut f = Frame::new(8, 8);
        let mut p = painter_over(&mut f);
        p.draw_glyph(-1.0, 10.0, 'A', (0, 255, 70), 255, true);
        p.draw_glyph(10.0, 10.0, 'B', (0, 255, 70), 0, false);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(f.get(x, y).unwrap().ch, ' ');
            }
        }
    }

    #[test]
    fn guideline_skips_occupied_cells() {
        let mut f = Frame::new(4, 4);
        {
            let mut p = painter_over(&mut f);
            p.draw_glyph(10.0, 20.0, 'A', (0, 255, 70), 120, false);
            p.draw_guideline(10.0, (50, 50, 50));
        }
        assert_eq!(f.get(1, 2).unwrap().ch, 'A');
        assert_eq!(f.get(1, 0).unwrap().ch, '│');
        assert_eq!(f.get(1, 3).unwrap().ch, '│');
    }
}
