//! The cell type and its attribute bitfield, plus the tagged palette/direct-color value.

bitflags::bitflags! {
    /// Per-cell rendition attributes.
    ///
    /// `WIDE`/`WDUMMY` encode the wide-character pairing invariant: a `WIDE` cell occupies two
    /// columns and its right-hand neighbor is a `WDUMMY` cell whose code point must never be
    /// drawn independently. `WRAP` marks the rightmost cell of a row that wrapped, which the
    /// selection snap logic relies on to treat a wrapped line as one logical line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellAttr: u16 {
        const BOLD      = 1 << 0;
        const FAINT     = 1 << 1;
        const ITALIC    = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK     = 1 << 4;
        const REVERSE   = 1 << 5;
        const INVISIBLE = 1 << 6;
        const STRUCK    = 1 << 7;
        const WRAP      = 1 << 8;
        const WIDE      = 1 << 9;
        const WDUMMY    = 1 << 10;
    }
}

/// A terminal color: either an indexed palette entry or a 24-bit direct color.
///
/// Corresponds to the glyph's `fg`/`bg` fields being "a palette index (0-255) or a 24-bit direct
/// color distinguished by a tagged high bit" — realized here as an enum tag rather than a raw
/// `u32` with a hidden bit, since that is the idiomatic Rust rendition of the same contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

/// One screen cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub code_point: char,
    pub attr: CellAttr,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const BLANK_CHAR: char = ' ';

    #[must_use]
    pub fn blank() -> Self {
        Self {
            code_point: Self::BLANK_CHAR,
            attr: CellAttr::empty(),
            fg: Color::Default,
            bg: Color::Default,
        }
    }

    #[must_use]
    pub fn blank_with(attr: CellAttr, fg: Color, bg: Color) -> Self {
        Self {
            code_point: Self::BLANK_CHAR,
            attr,
            fg,
            bg,
        }
    }

    #[must_use]
    pub fn is_wide(&self) -> bool {
        self.attr.contains(CellAttr::WIDE)
    }

    #[must_use]
    pub fn is_wdummy(&self) -> bool {
        self.attr.contains(CellAttr::WDUMMY)
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::blank()
    }
}
