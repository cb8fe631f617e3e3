/// Pure drawing logic: box geometry, glyph cycles, palette.

pub mod geometry;
pub mod glyph;
pub mod palette;
