/// Glyph cycles: infinite round-robin sources of symbols and colours.
///
/// Every draw call pulls the next element whether or not the cell ends up
/// on screen, so the sequence depends only on call order, never on the
/// terminal size.

use super::palette::{Attr, Palette};

pub const FLAME_CHARS: [char; 13] = [
    '&', '*', '^', '✸', '✺', '✹', '✵', '#', '@', 'W', 'V', 'M', '~',
];
pub const EMBER_CHARS: [char; 7] = ['∴', '∵', '.', '*', '·', '°', ':'];
pub const ASH_CHARS: [char; 8] = ['.', '`', ' ', ':', '.', ' ', '~', '-'];

/// A fixed, non-empty sequence with a wrapping cursor.
#[derive(Clone, Debug)]
pub struct GlyphCycle<T: Copy> {
    items: Vec<T>,
    cursor: usize,
}

impl<T: Copy> GlyphCycle<T> {
    /// Panics on an empty sequence: a cycle must always have a next element.
    pub fn new(items: Vec<T>) -> Self {
        assert!(!items.is_empty(), "glyph cycle needs at least one element");
        GlyphCycle { items, cursor: 0 }
    }

    /// Return the current element and step the cursor (wrapping).
    pub fn advance(&mut self) -> T {
        let item = self.items[self.cursor];
        self.cursor = (self.cursor + 1) % self.items.len();
        item
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// The four run-scoped cycles. No two share a cursor.
#[derive(Clone, Debug)]
pub struct Glyphs {
    pub flame: GlyphCycle<char>,
    pub flame_color: GlyphCycle<Attr>,
    pub ember: GlyphCycle<char>,
    pub ash: GlyphCycle<char>,
}

impl Glyphs {
    pub fn new(palette: &Palette) -> Self {
        Glyphs {
            flame: GlyphCycle::new(FLAME_CHARS.to_vec()),
            flame_color: GlyphCycle::new(palette.flame_colors()),
            ember: GlyphCycle::new(EMBER_CHARS.to_vec()),
            ash: GlyphCycle::new(ASH_CHARS.to_vec()),
        }
    }

    /// Next flame glyph paired with the next flame colour.
    pub fn next_flame(&mut self) -> (char, Attr) {
        let ch = self.flame.advance();
        (ch, self.flame_color.advance())
    }

    pub fn next_ember(&mut self) -> char {
        self.ember.advance()
    }

    pub fn next_ash(&mut self) -> char {
        self.ash.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::palette::{ColorDepth, Role};

    #[test]
    fn wraps_after_full_length() {
        let mut c = GlyphCycle::new(vec!['a', 'b', 'c']);
        assert_eq!(c.len(), 3);
        assert_eq!(c.advance(), 'a');
        assert_eq!(c.advance(), 'b');
        assert_eq!(c.advance(), 'c');
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.advance(), 'a');
    }

    #[test]
    fn nth_value_is_deterministic() {
        let palette = Palette::resolve(ColorDepth::Extended);
        let mut a = Glyphs::new(&palette);
        let mut b = Glyphs::new(&palette);
        for _ in 0..500 {
            assert_eq!(a.next_flame(), b.next_flame());
            assert_eq!(a.next_ember(), b.next_ember());
            assert_eq!(a.next_ash(), b.next_ash());
        }
    }

    #[test]
    fn nth_flame_matches_table() {
        let mut g = Glyphs::new(&Palette::resolve(ColorDepth::Basic));
        let seen: Vec<char> = (0..FLAME_CHARS.len() * 2).map(|_| g.flame.advance()).collect();
        for (n, ch) in seen.iter().enumerate() {
            assert_eq!(*ch, FLAME_CHARS[n % FLAME_CHARS.len()]);
        }
    }

    #[test]
    fn cycles_do_not_share_cursors() {
        let mut g = Glyphs::new(&Palette::resolve(ColorDepth::Basic));
        for _ in 0..5 {
            g.next_ember();
        }
        assert_eq!(g.flame.cursor(), 0);
        assert_eq!(g.ash.cursor(), 0);
        assert_eq!(g.ember.cursor(), 5);
        assert_eq!(g.next_ash(), ASH_CHARS[0]);
    }

    #[test]
    fn flame_colour_follows_warm_rotation() {
        let palette = Palette::resolve(ColorDepth::Extended);
        let mut g = Glyphs::new(&palette);
        let colours: Vec<Attr> = (0..8).map(|_| g.next_flame().1).collect();
        let expected = [
            Role::FlameRed,
            Role::FlameOrange,
            Role::FlameYellow,
            Role::FlameOrange,
        ];
        for (n, attr) in colours.iter().enumerate() {
            assert_eq!(*attr, palette.get(expected[n % 4]));
        }
    }

    #[test]
    #[should_panic]
    fn empty_cycle_is_rejected() {
        let _ = GlyphCycle::<char>::new(Vec::new());
    }
}
