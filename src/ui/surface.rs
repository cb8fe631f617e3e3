/// Surface trait and the safe writer that owns every screen write.
///
/// Backends only know how to put text, clear, flush and read a key.
/// All clipping and the per-cell failure policy live in `SafeWriter`:
///   - a write starting outside the terminal is a no-op
///   - a write running past the right edge is cut to fit
///   - a failed put is counted and dropped, never propagated
///
/// `clear_all`, `present` and `wait_for_key` failures mean the surface
/// itself is gone; those are returned to the caller.

use std::io;

use tracing::trace;
use unicode_width::UnicodeWidthChar;

use crate::domain::geometry::AnimationBox;
use crate::domain::palette::Attr;

pub trait Surface {
    /// `(cols, rows)`.
    fn size(&self) -> (u16, u16);
    fn put(&mut self, row: u16, col: u16, text: &str, attr: Attr) -> io::Result<()>;
    fn clear_all(&mut self) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
    /// Block until one key press arrives; the key is discarded.
    fn wait_for_key(&mut self) -> io::Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (u16, u16) {
        (**self).size()
    }
    fn put(&mut self, row: u16, col: u16, text: &str, attr: Attr) -> io::Result<()> {
        (**self).put(row, col, text, attr)
    }
    fn clear_all(&mut self) -> io::Result<()> {
        (**self).clear_all()
    }
    fn present(&mut self) -> io::Result<()> {
        (**self).present()
    }
    fn wait_for_key(&mut self) -> io::Result<()> {
        (**self).wait_for_key()
    }
}

/// Cut `text` to at most `max_cols` display columns.
/// A wide char that would straddle the limit is dropped.
pub fn clip_to_width(text: &str, max_cols: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_cols {
            return &text[..idx];
        }
        used += w;
    }
    text
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

pub struct SafeWriter<S: Surface> {
    surface: S,
    cols: usize,
    rows: usize,
    blank: Attr,
    dropped: u64,
}

impl<S: Surface> SafeWriter<S> {
    /// Snapshot the surface size; `blank` is the attribute used for clears.
    pub fn new(surface: S, blank: Attr) -> Self {
        let (cols, rows) = surface.size();
        SafeWriter {
            surface,
            cols: cols as usize,
            rows: rows as usize,
            blank,
            dropped: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Writes that reached the backend and failed there.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn write_at(&mut self, row: usize, col: usize, text: &str, attr: Attr) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        let text = clip_to_width(text, self.cols - col);
        if text.is_empty() {
            return;
        }
        // Both coordinates are below a u16 terminal size here.
        if let Err(e) = self.surface.put(row as u16, col as u16, text, attr) {
            self.dropped += 1;
            trace!(row, col, error = %e, "dropped cell write");
        }
    }

    pub fn write_char(&mut self, row: usize, col: usize, ch: char, attr: Attr) {
        let mut buf = [0u8; 4];
        self.write_at(row, col, ch.encode_utf8(&mut buf), attr);
    }

    /// Center `text` horizontally on `row`; starts at column 0 when too wide.
    pub fn write_centered(&mut self, row: usize, text: &str, attr: Attr) {
        let col = self.cols.saturating_sub(display_width(text)) / 2;
        self.write_at(row, col, text, attr);
    }

    /// Blank every cell of the box's row span.
    pub fn clear_region(&mut self, area: &AnimationBox) {
        let blanks = " ".repeat(area.width);
        for r in 0..area.height {
            self.write_at(area.row(r), area.origin_col, &blanks, self.blank);
        }
    }

    pub fn clear_all(&mut self) -> io::Result<()> {
        self.surface.clear_all()
    }

    pub fn present(&mut self) -> io::Result<()> {
        self.surface.present()
    }

    pub fn wait_for_key(&mut self) -> io::Result<()> {
        self.surface.wait_for_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer::FrameBuffer;

    fn writer(cols: u16, rows: u16) -> SafeWriter<FrameBuffer> {
        SafeWriter::new(FrameBuffer::new(cols, rows), Attr::DEFAULT)
    }

    #[test]
    fn out_of_bounds_start_is_noop() {
        let mut w = writer(10, 3);
        w.write_at(3, 0, "x", Attr::DEFAULT);
        w.write_at(0, 10, "x", Attr::DEFAULT);
        w.write_at(99, 99, "x", Attr::DEFAULT);
        assert_eq!(w.surface().puts(), 0);
        assert_eq!(w.surface().out_of_bounds(), 0);
    }

    #[test]
    fn right_overrun_is_truncated() {
        let mut w = writer(10, 3);
        w.write_at(1, 7, "abcdef", Attr::DEFAULT);
        assert_eq!(w.surface().row_text(1), "       abc");
        assert_eq!(w.surface().out_of_bounds(), 0);
    }

    #[test]
    fn wide_char_not_split_at_edge() {
        assert_eq!(clip_to_width("a🔥b", 2), "a");
        assert_eq!(clip_to_width("a🔥b", 3), "a🔥");
        assert_eq!(clip_to_width("", 3), "");
        let mut w = writer(4, 1);
        w.write_at(0, 2, "x🔥", Attr::DEFAULT);
        assert_eq!(w.surface().row_text(0), "  x");
    }

    #[test]
    fn backend_failures_are_swallowed_and_counted() {
        let mut fb = FrameBuffer::new(10, 3);
        fb.reject_cell(2, 9);
        let mut w = SafeWriter::new(fb, Attr::DEFAULT);
        w.write_at(2, 9, "#", Attr::DEFAULT);
        w.write_at(2, 8, "##", Attr::DEFAULT);
        w.write_at(0, 0, "ok", Attr::DEFAULT);
        assert_eq!(w.dropped(), 2);
        assert_eq!(w.surface().row_text(0), "ok");
    }

    #[test]
    fn clear_region_blanks_box_rows_only() {
        let area = AnimationBox::resolve(20, 8, "abc").unwrap();
        let mut w = writer(20, 8);
        for r in 0..8 {
            w.write_at(r, 0, &"x".repeat(20), Attr::DEFAULT);
        }
        w.clear_region(&area);
        for r in 0..8 {
            let row = w.surface().row_text(r);
            let inside = r >= area.origin_row && r < area.origin_row + area.height;
            let blanked = row
                .chars()
                .skip(area.origin_col)
                .take(area.width)
                .all(|c| c == ' ');
            assert_eq!(blanked, inside, "row {r}: {row:?}");
        }
    }

    #[test]
    fn centered_text_clamps_to_left_edge() {
        let mut w = writer(6, 1);
        w.write_centered(0, "abcdefgh", Attr::DEFAULT);
        assert_eq!(w.surface().row_text(0), "abcdef");
        let mut w = writer(7, 1);
        w.write_centered(0, "abc", Attr::DEFAULT);
        assert_eq!(w.surface().row_text(0), "  abc");
    }
}
