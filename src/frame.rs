// Copyright (c) 2026 glyphrain contributors

use crate::cell::Cell;

/// In-memory cell buffer for one frame. The rain redraws the whole screen
/// every tick, so the buffer is cleared at the top of each frame and the
/// terminal layer diffs it against the last presented frame.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells[i]
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips_inside_bounds() {
        let mut f = Frame::new(3, 2);
        f.set(
            2,
            1,
            Cell {
                ch: 'x',
                fg: None,
                bold: true,
            },
        );
        assert_eq!(f.get(2, 1).unwrap().ch, 'x');
        assert!(f.get(2, 1).unwrap().bold);
    }

    #[test]
    fn set_out_of_bounds_is_ignored() {
        let mut f = Frame::new(3, 2);
        f.set(
            3,
            0,
            Cell {
                ch: 'x',
                fg: None,
                bold: false,
            },
        );
        f.set(
            0,
            2,
            Cell {
                ch: 'x',
                fg: None,
                bold: false,
            },
        );
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(f.get(x, y).unwrap().ch, ' ');
            }
        }
    }

    #[test]
    fn clear_resets_every_cell_to_blank() {
        let mut f = Frame::new(2, 2);
        f.set(
            0,
            0,
            Cell {
                ch: 'q',
                fg: None,
                bold: false,
            },
        );
        f.clear();
        assert_eq!(f.get(0, 0).unwrap().ch, ' ');
    }
}
