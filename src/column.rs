// Copyright (c) 2026 glyphrain contributors

use rand::rngs::StdRng;
use rand::Rng;

use crate::painter::Painter;
use crate::palette::Theme;
use crate::symbol::Symbol;

const GUIDELINE_RGB: (u8, u8, u8) = (50, 50, 50);

/// One vertical lane of rain. A column is either ACTIVE (growing a streak one
/// symbol per tick, then letting the whole streak fall and fade) or INACTIVE
/// (counting ticks until its wait time elapses and it resets for a replay).
#[derive(Clone, Debug)]
pub struct Column {
    pub x: f32,
    pub font_size: u16,
    pub glyph_height: f32,
    pub screen_h: f32,
    pub rain_speed: f32,
    pub allow_midway: bool,

    pub active: bool,
    pub symbols: Vec<Symbol>,
    /// Ticks spent inactive; only meaningful while `!active`.
    pub age: u32,
    /// Inactivity duration before reactivation, rolled once per column.
    pub wait_time: u32,

    pub starts_midway: bool,
    pub y_offset: f32,
    pub max_length: usize,
    pub speed: f32,
}

impl Column {
    pub fn new(
        x: f32,
        font_size: u16,
        screen_h: f32,
        rain_speed: f32,
        allow_midway: bool,
        active: bool,
        rng: &mut StdRng,
    ) -> Self {
        let mut col = Self {
            x,
            font_size,
            glyph_height: (font_size as f32).max(1.0),
            screen_h,
            rain_speed,
            allow_midway,
            active,
            symbols: Vec::new(),
            age: 0,
            wait_time: rng.random_range(60..=240),
            starts_midway: false,
            y_offset: 0.0,
            max_length: 0,
            speed: 0.0,
        };
        col.reset(rng);
        col
    }

    /// Re-rolls the replay parameters for the next streak. Called from the
    /// constructor and on every INACTIVE -> ACTIVE transition; never touches
    /// `active` or `wait_time`.
    pub fn reset(&mut self, rng: &mut StdRng) {
        self.starts_midway = self.allow_midway && rng.random_bool(0.5);

        if self.starts_midway {
            let lo = self.screen_h / 3.0;
            let hi = (self.screen_h - self.glyph_height * 4.0).max(lo);
            self.y_offset = rng.random_range(lo..=hi);
            let max_possible =
                (((self.screen_h - self.y_offset) / self.glyph_height).floor() as usize).max(4);
            self.max_length = rng.random_range(4..=max_possible);
        } else {
            self.y_offset = rng.random_range(-300.0..=0.0);
            let visible_rows = self.screen_h / self.glyph_height;
            let lo = ((visible_rows * 0.6) as usize).max(1);
            let hi = ((visible_rows * 1.2) as usize).max(lo);
            self.max_length = rng.random_range(lo..=hi);
        }

        self.symbols.clear();
        self.age = 0;
        self.speed = (1.2 + (36.0 - self.font_size as f32) * 0.1) * self.rain_speed;
    }

    pub fn update(&mut self, rng: &mut StdRng, glyphs: &[char]) {
        if self.active {
            if self.symbols.len() < self.max_length {
                let y = self
                    .symbols
                    .last()
                    .map(|s| s.y + self.glyph_height)
                    .unwrap_or(self.y_offset);
                let glyph = glyphs
                    .get(rng.random_range(0..glyphs.len().max(1)))
                    .copied()
                    .unwrap_or('0');
                self.symbols.push(Symbol::new(self.x, y, glyph));
            } else {
                for s in &mut self.symbols {
                    s.advance(self.speed);
                }
                let (screen_h, glyph_height) = (self.screen_h, self.glyph_height);
                self.symbols.retain(|s| s.visible(screen_h, glyph_height));
                if self.symbols.is_empty() {
                    self.active = false;
                }
            }
        } else {
            self.age += 1;
            if self.age > self.wait_time {
                self.active = true;
                self.reset(rng);
            }
        }
    }

    pub fn draw(&self, painter: &mut Painter<'_>, theme: &Theme, debug: bool) {
        let last = self.symbols.len().wrapping_sub(1);
        for (i, s) in self.symbols.iter().enumerate() {
            s.draw(painter, theme, i == last && self.active);
        }
        if debug && self.active {
            painter.draw_guideline(self.x, GUIDELINE_RGB);
        }
    }
}
