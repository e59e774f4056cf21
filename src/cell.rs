// Copyright (c) 2026 glyphrain contributors

use crossterm::style::Color;

/// One terminal cell. The background is globally black (set once by the
/// terminal layer), so cells only carry a glyph, a foreground and boldness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: None,
        bold: false,
    };
}
