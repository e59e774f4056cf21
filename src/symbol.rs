// Copyright (c) 2026 glyphrain contributors

use crate::painter::Painter;
use crate::palette::Theme;

/// Fade horizon: a trail symbol is fully transparent once it reaches this age.
const FADE_TICKS: f32 = 40.0;
/// Hard expiry, a few ticks after the fade completes.
pub const MAX_AGE: u32 = 50;

/// One falling glyph. x is fixed for the symbol's lifetime, y advances by the
/// owning column's speed each tick.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub x: f32,
    pub y: f32,
    pub glyph: char,
    pub age: u32,
}

impl Symbol {
    pub fn new(x: f32, y: f32, glyph: char) -> Self {
        Self { x, y, glyph, age: 0 }
    }

    pub fn advance(&mut self, speed: f32) {
        self.y += speed;
        self.age += 1;
    }

    /// Head symbols render at full opacity regardless of age; trail symbols
    /// fade linearly, reaching zero at `FADE_TICKS`.
    pub fn alpha(&self, is_head: bool) -> u8 {
        if is_head {
            return 255;
        }
        (255.0 - self.age as f32 * (255.0 / FADE_TICKS)).clamp(0.0, 255.0) as u8
    }

    /// Whether the symbol is still worth keeping: strictly above the offscreen
    /// margin and strictly younger than the hard expiry.
    pub fn visible(&self, screen_h: f32, glyph_height: f32) -> bool {
        self.y < screen_h + glyph_height && self.age < MAX_AGE
    }

    pub fn draw(&self, painter: &mut Painter<'_>, theme: &Theme, is_head: bool) {
        let rgb = if is_head { theme.head } else { theme.trail };
        painter.draw_glyph(self.x, self.y, self.glyph, rgb, self.alpha(is_head), is_head);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_age_and_displacement() {
        let mut s = Symbol::new(10.0, 0.0, '𓀀');
        for _ in 0..7 {
            s.advance(2.5);
        }
        assert_eq!(s.age, 7);
        assert!((s.y - 17.5).abs() < 1e-5);
    }

    #[test]
    fn head_alpha_is_always_max() {
        let mut s = Symbol::new(0.0, 0.0, 'x');
        for _ in 0..100 {
            s.advance(1.0);
            assert_eq!(s.alpha(true), 255);
        }
    }

    #[test]
    fn trail_alpha_never_increases_and_dies_at_forty() {
        let mut s = Symbol::new(0.0, 0.0, 'x');
        let mut prev = s.alpha(false);
        assert_eq!(prev, 255);
        for _ in 0..60 {
            s.advance(1.0);
            let a = s.alpha(false);
            assert!(a <= prev);
            prev = a;
        }
        assert_eq!(prev, 0);

        let mut at39 = Symbol::new(0.0, 0.0, 'x');
        at39.age = 39;
        assert!(at39.alpha(false) > 0);
        at39.age = 40;
        assert_eq!(at39.alpha(false), 0);
    }

    #[test]
    fn visibility_boundaries_are_strict() {
        let screen_h = 100.0;
        let glyph_h = 20.0;

        let mut s = Symbol::new(0.0, screen_h + glyph_h, 'x');
        assert!(!s.visible(screen_h, glyph_h));
        s.y -= 0.1;
        assert!(s.visible(screen_h, glyph_h));

        let mut s = Symbol::new(0.0, 0.0, 'x');
        s.age = 49;
        assert!(s.visible(screen_h, glyph_h));
        s.age = 50;
        assert!(!s.visible(screen_h, glyph_h));
    }
}
