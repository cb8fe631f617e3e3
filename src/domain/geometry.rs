/// Geometry resolver: box size, name truncation, and centering.
///
/// The "paper" is a fixed four-row box:
///   row 0: top border
///   row 1: `│ name │`
///   row 2: bottom border
///   row 3: flame spill below the paper
///
/// Widths are measured in chars: each char of the display name owns one
/// column so that consumption can swap it for exactly one flame glyph.
/// Names are narrowed first (see [`narrow_name`]) so chars and columns agree.

use unicode_width::UnicodeWidthChar;

pub const BORDER: usize = 1;
pub const PAD_X: usize = 1;
pub const H_OVERHEAD: usize = (BORDER + PAD_X) * 2;
pub const BOX_HEIGHT: usize = 4;

pub const TRUNC_SUFFIX: &str = "...";
/// Columns kept free of the name: borders, padding, suffix, and a 2-col margin.
pub const TRUNC_RESERVE: usize = TRUNC_SUFFIX.len() + H_OVERHEAD + 2;

/// The placed paper box. Built once per run, read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationBox {
    pub width: usize,
    pub height: usize,
    pub origin_row: usize,
    pub origin_col: usize,
    pub display_name: String,
    pub name_len: usize,
}

/// Rejection: the box does not fit strictly inside the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TooSmall {
    pub term_cols: usize,
    pub term_rows: usize,
    pub box_width: usize,
    pub box_height: usize,
}

/// Stand-in for a char that does not occupy exactly one column.
pub const WIDE_STAND_IN: char = '?';

/// Make every char of `raw` exactly one column wide.
///
/// Wide chars (CJK, emoji) and control chars become [`WIDE_STAND_IN`];
/// zero-width marks are dropped.
pub fn narrow_name(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c.width() {
            Some(1) => Some(c),
            Some(0) => None,
            _ => Some(WIDE_STAND_IN),
        })
        .collect()
}

/// Longest name (suffix included) that may be shown on a terminal this wide.
pub fn max_name_len(term_cols: usize) -> usize {
    term_cols.saturating_sub(TRUNC_RESERVE)
}

/// Truncate `raw` to `max_len` chars, ending in `...` when it was cut.
///
/// Below three columns there is no room for a prefix, so the suffix itself
/// is cut down (`"."`, `".."`) and a zero budget yields an empty name.
pub fn fit_name(raw: &str, max_len: usize) -> String {
    if raw.chars().count() <= max_len {
        return raw.to_string();
    }
    let keep = max_len.saturating_sub(TRUNC_SUFFIX.len());
    raw.chars()
        .take(keep)
        .chain(TRUNC_SUFFIX.chars())
        .take(max_len)
        .collect()
}

impl AnimationBox {
    /// Size, truncate and center the box for a `cols × rows` terminal.
    pub fn resolve(cols: u16, rows: u16, raw_name: &str) -> Result<Self, TooSmall> {
        let (cols, rows) = (cols as usize, rows as usize);

        let display_name = fit_name(&narrow_name(raw_name), max_name_len(cols));
        let name_len = display_name.chars().count();
        let width = BORDER * 2 + PAD_X * 2 + name_len;
        let height = BOX_HEIGHT;

        if width >= cols || height >= rows {
            return Err(TooSmall {
                term_cols: cols,
                term_rows: rows,
                box_width: width,
                box_height: height,
            });
        }

        Ok(AnimationBox {
            width,
            height,
            origin_row: (rows - height) / 2,
            origin_col: (cols - width) / 2,
            display_name,
            name_len,
        })
    }

    /// Screen row of box row `r` (0 = top border, 3 = spill row).
    pub fn row(&self, r: usize) -> usize {
        self.origin_row + r
    }

    /// Width between the two vertical bars.
    pub fn interior_width(&self) -> usize {
        self.width.saturating_sub(BORDER * 2)
    }

    /// First column inside the left bar.
    pub fn interior_col(&self) -> usize {
        self.origin_col + BORDER
    }

    /// Column of the first name char.
    pub fn name_col(&self) -> usize {
        self.origin_col + BORDER + PAD_X
    }

    /// Column of the right vertical bar.
    pub fn right_bar_col(&self) -> usize {
        self.origin_col + self.width - BORDER
    }

    pub fn center_col(&self) -> usize {
        self.origin_col + self.width / 2
    }

    /// The first `n` chars of the display name.
    pub fn name_prefix(&self, n: usize) -> String {
        self.display_name.chars().take(n).collect()
    }
}
