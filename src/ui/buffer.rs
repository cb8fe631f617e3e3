/// In-memory surface: a 2D grid of cells.
///
/// Every `present()` snapshots the grid, as text and as raw cells, so a
/// whole run can be replayed frame by frame with its colours. Writes
/// landing outside the grid are counted and rejected the way a real
/// terminal backend rejects them.

use std::io;

use unicode_width::UnicodeWidthChar;

use crate::domain::palette::Attr;
use crate::ui::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub attr: Attr,
    /// Right half of a wide char (not printed on its own).
    pub cont: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', attr: Attr::DEFAULT, cont: false };
}

#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    frames: Vec<Vec<String>>,
    frame_cells: Vec<Vec<Cell>>,
    puts: usize,
    out_of_bounds: usize,
    key_waits: usize,
    rejected: Vec<(usize, usize)>,
    fail_present: bool,
}

impl FrameBuffer {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (width, height) = (cols as usize, rows as usize);
        FrameBuffer {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
            frames: Vec::new(),
            frame_cells: Vec::new(),
            puts: 0,
            out_of_bounds: 0,
            key_waits: 0,
            rejected: Vec::new(),
            fail_present: false,
        }
    }

    /// Make any write covering `(row, col)` fail, like a backend that
    /// refuses the last cell of the screen.
    pub fn reject_cell(&mut self, row: usize, col: usize) {
        self.rejected.push((row, col));
    }

    /// Make every `present()` fail from now on.
    pub fn fail_presents(&mut self) {
        self.fail_present = true;
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            Cell::BLANK
        }
    }

    /// Visible text of a row, trailing blanks trimmed.
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        let line: String = self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .filter(|c| !c.cont)
            .map(|c| c.ch)
            .collect();
        line.trim_end().to_string()
    }

    /// Text snapshots, one per `present()`.
    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    /// The cell at `(row, col)` as it was when frame `frame` was presented.
    pub fn frame_cell(&self, frame: usize, row: usize, col: usize) -> Cell {
        match self.frame_cells.get(frame) {
            Some(cells) if row < self.height && col < self.width => cells[row * self.width + col],
            _ => Cell::BLANK,
        }
    }

    pub fn puts(&self) -> usize {
        self.puts
    }

    pub fn out_of_bounds(&self) -> usize {
        self.out_of_bounds
    }

    pub fn key_waits(&self) -> usize {
        self.key_waits
    }

    fn snapshot(&self) -> Vec<String> {
        (0..self.height).map(|r| self.row_text(r)).collect()
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = cell;
        }
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (u16, u16) {
        (self.width as u16, self.height as u16)
    }

    fn put(&mut self, row: u16, col: u16, text: &str, attr: Attr) -> io::Result<()> {
        let (row, col) = (row as usize, col as usize);
        let span = text.chars().map(|c| c.width().unwrap_or(0)).sum::<usize>();

        if row >= self.height || col + span > self.width {
            self.out_of_bounds += 1;
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("write of {span} cols at ({row}, {col}) leaves the surface"),
            ));
        }
        if self.rejected.iter().any(|&(r, c)| r == row && c >= col && c < col + span) {
            return Err(io::Error::other("cell rejected by backend"));
        }

        self.puts += 1;
        let mut x = col;
        for ch in text.chars() {
            match ch.width().unwrap_or(0) {
                0 => {}
                1 => {
                    self.set(row, x, Cell { ch, attr, cont: false });
                    x += 1;
                }
                _ => {
                    self.set(row, x, Cell { ch, attr, cont: false });
                    self.set(row, x + 1, Cell { ch: ' ', attr, cont: true });
                    x += 2;
                }
            }
        }
        Ok(())
    }

    fn clear_all(&mut self) -> io::Result<()> {
        self.cells.fill(Cell::BLANK);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        if self.fail_present {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "surface closed"));
        }
        let snap = self.snapshot();
        self.frames.push(snap);
        self.frame_cells.push(self.cells.clone());
        Ok(())
    }

    fn wait_for_key(&mut self) -> io::Result<()> {
        self.key_waits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_chars_take_two_cells() {
        let mut fb = FrameBuffer::new(8, 1);
        fb.put(0, 1, "🔥x", Attr::DEFAULT).unwrap();
        assert_eq!(fb.cell(0, 1).ch, '🔥');
        assert!(fb.cell(0, 2).cont);
        assert_eq!(fb.cell(0, 3).ch, 'x');
        assert_eq!(fb.row_text(0), " 🔥x");
    }

    #[test]
    fn overrun_is_rejected_and_counted() {
        let mut fb = FrameBuffer::new(4, 2);
        assert!(fb.put(0, 2, "abc", Attr::DEFAULT).is_err());
        assert!(fb.put(2, 0, "a", Attr::DEFAULT).is_err());
        assert_eq!(fb.out_of_bounds(), 2);
        assert_eq!(fb.puts(), 0);
        assert_eq!(fb.row_text(0), "");
    }

    #[test]
    fn present_snapshots_rows() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put(1, 0, "ab", Attr::DEFAULT).unwrap();
        fb.present().unwrap();
        fb.clear_all().unwrap();
        fb.present().unwrap();
        assert_eq!(fb.frames().len(), 2);
        assert_eq!(fb.frames()[0], vec!["".to_string(), "ab".to_string()]);
        assert_eq!(fb.frames()[1], vec![String::new(), String::new()]);
    }

    #[test]
    fn presented_frames_keep_their_attributes() {
        let hot = Attr::fg(crossterm::style::Color::Red).bold();
        let mut fb = FrameBuffer::new(3, 1);
        fb.put(0, 1, "x", hot).unwrap();
        fb.present().unwrap();
        fb.put(0, 1, "y", Attr::DEFAULT).unwrap();
        fb.present().unwrap();

        assert_eq!(fb.frame_cell(0, 0, 1), Cell { ch: 'x', attr: hot, cont: false });
        assert_eq!(fb.frame_cell(1, 0, 1).attr, Attr::DEFAULT);
        assert_eq!(fb.frame_cell(0, 0, 0), Cell::BLANK);
        assert_eq!(fb.frame_cell(5, 0, 1), Cell::BLANK);
    }
}
