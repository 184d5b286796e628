//! Tiny 3x5 pixel font for HUD numbers

/// Glyph grid size in font pixels
pub const GLYPH_W: usize = 3;
pub const GLYPH_H: usize = 5;
/// Blank columns between glyphs
pub const GLYPH_GAP: usize = 1;

const DIGITS: [[&str; GLYPH_H]; 10] = [
    ["XXX", "X.X", "X.X", "X.X", "XXX"],
    [".X.", "XX.", ".X.", ".X.", "XXX"],
    ["XXX", "..X", "XXX", "X..", "XXX"],
    ["XXX", "..X", "XXX", "..X", "XXX"],
    ["X.X", "X.X", "XXX", "..X", "..X"],
    ["XXX", "X..", "XXX", "..X", "XXX"],
    ["XXX", "X..", "XXX", "X.X", "XXX"],
    ["XXX", "..X", ".X.", ".X.", ".X."],
    ["XXX", "X.X", "XXX", "X.X", "XXX"],
    ["XXX", "X.X", "XXX", "..X", "XXX"],
];

/// Pixel rows for a character; unknown characters render blank
pub fn glyph(ch: char) -> Option<&'static [&'static str; GLYPH_H]> {
    ch.to_digit(10).map(|d| &DIGITS[d as usize])
}

/// Width of `len` glyphs at `px` canvas pixels per font pixel
pub fn text_width(len: usize, px: f32) -> f32 {
    if len == 0 {
        return 0.0;
    }
    (len * (GLYPH_W + GLYPH_GAP) - GLYPH_GAP) as f32 * px
}

/// Zero-padded score the way the runner HUD shows it ("00042")
pub fn padded_score(score: u64, width: usize) -> String {
    format!("{:0width$}", score, width = width)
}
