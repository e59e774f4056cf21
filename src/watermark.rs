// Copyright (c) 2026 glyphrain contributors

use std::fs;
use std::io;
use std::path::Path;

use crate::cell::Cell;
use crate::frame::Frame;
use crate::palette::{shade, to_color, ColorMode, Rgb};

/// Watermark translucency, matching the original overlay alpha.
const ALPHA: u8 = 100;
/// Cells of padding from the pinned corner.
const PAD: u16 = 2;

/// Optional text-art overlay, pinned bottom right or bouncing around the
/// screen. Purely cosmetic; the rain draws over it.
pub struct Watermark {
    lines: Vec<Vec<char>>,
    width: u16,
    height: u16,
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    bounce: bool,
}

impl Watermark {
    pub fn from_path(path: &Path, bounce: bool) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text, bounce))
    }

    pub fn from_text(text: &str, bounce: bool) -> Self {
        let lines: Vec<Vec<char>> = text
            .lines()
            .map(|l| l.trim_end().chars().collect())
            .collect();
        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16;
        let height = lines.len() as u16;
        Self {
            lines,
            width,
            height,
            x: 0.0,
            y: 0.0,
            vx: 0.37,
            vy: 0.23,
            bounce,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Positions the overlay for the given screen size: bottom right with
    /// padding when pinned, clamped in-bounds when bouncing.
    pub fn place(&mut self, screen_w: u16, screen_h: u16) {
        let max_x = screen_w.saturating_sub(self.width + PAD) as f32;
        let max_y = screen_h.saturating_sub(self.height + PAD) as f32;
        if self.bounce {
            self.x = self.x.clamp(0.0, max_x);
            self.y = self.y.clamp(0.0, max_y);
        } else {
            self.x = max_x;
            self.y = max_y;
        }
    }

    /// Advances the bounce animation one frame, reflecting off the edges.
    pub fn tick(&mut self, screen_w: u16, screen_h: u16) {
        if !self.bounce {
            return;
        }
        let max_x = screen_w.saturating_sub(self.width) as f32;
        let max_y = screen_h.saturating_sub(self.height) as f32;

        self.x += self.vx;
        self.y += self.vy;
        if self.x <= 0.0 || self.x >= max_x {
            self.vx = -self.vx;
            self.x = self.x.clamp(0.0, max_x);
        }
        if self.y <= 0.0 || self.y >= max_y {
            self.vy = -self.vy;
            self.y = self.y.clamp(0.0, max_y);
        }
    }

    pub fn draw(&self, frame: &mut Frame, mode: ColorMode, rgb: Rgb) {
        let fg = to_color(mode, shade(rgb, ALPHA));
        let x0 = self.x as u16;
        let y0 = self.y as u16;
        for (dy, line) in self.lines.iter().enumerate() {
            for (dx, &ch) in line.iter().enumerate() {
                if ch == ' ' {
                    continue;
                }
                frame.set(
                    x0.saturating_add(dx as u16),
                    y0.saturating_add(dy as u16),
                    Cell {
                        ch,
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

    #[test]
    fn text_parse_measures_widest_line() {
        let wm = Watermark::from_text("ab\nabcd\na", false);
        assert_eq!(wm.width, 4);
        assert_eq!(wm.height, 3);
        assert!(!wm.is_empty());
    }

    #[test]
    fn pinned_placement_sits_bottom_right_with_padding() {
        let mut wm = Watermark::from_text("##\n##", false);
        wm.place(40, 20);
        assert_eq!(wm.x as u16, 40 - 2 - PAD);
        assert_eq!(wm.y as u16, 20 - 2 - PAD);
    }

    #[test]
    fn bounce_stays_inside_the_screen() {
        let mut wm = Watermark::from_text("###\n###", true);
        wm.place(20, 10);
        for _ in 0..10_000 {
            wm.tick(20, 10);
            assert!(wm.x >= 0.0 && wm.x <= (20 - 3) as f32);
            assert!(wm.y >= 0.0 && wm.y <= (10 - 2) as f32);
        }
    }

    #[test]
    fn spaces_do_not_overwrite_the_frame() {
        let mut wm = Watermark::from_text("# #", false);
        wm.place(10, 5);
        let mut frame = Frame::new(10, 5);
        wm.draw(&mut frame, ColorMode::Mono, (0, 180, 255));
        let x0 = wm.x as u16;
        let y0 = wm.y as u16;
        assert_eq!(frame.get(x0, y0).unwrap().ch, '#');
        assert_eq!(frame.get(x0 + 1, y0).unwrap().ch, ' ');
        assert_eq!(frame.get(x0 + 2, y0).unwrap().ch, '#');
    }
}
