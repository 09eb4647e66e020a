use super::glyph::{CellAttr, Color};

bitflags::bitflags! {
    /// Cursor state bits, distinct from `TermMode` because they belong to the cursor itself and
    /// are duplicated across the two saved-cursor slots (one per screen buffer).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CursorState: u8 {
        /// Set when the last write landed in the final column; the next printable character
        /// triggers a wrap instead of being placed immediately. Never set unless
        /// `cursor.x == cols - 1` — see the crate-level wrap invariant.
        const WRAPNEXT = 1 << 0;
        /// DECOM is active: cursor motion is clamped to the scroll region, and absolute
        /// positioning is region-relative.
        const ORIGIN = 1 << 1;
    }
}

/// Cursor position plus the pen (attributes/colors) new glyphs are written with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    pub attr: CellAttr,
    pub fg: Color,
    pub bg: Color,
    pub state: CursorState,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            attr: CellAttr::empty(),
            fg: Color::Default,
            bg: Color::Default,
            state: CursorState::empty(),
        }
    }
}

/// Visible cursor shape, driven by DECSCUSR (`CSI Ps SP q`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    BlinkingBlock,
    SteadyBlock,
    BlinkingUnderline,
    SteadyUnderline,
    BlinkingBar,
    SteadyBar,
}

impl CursorStyle {
    #[must_use]
    pub fn from_param(n: u16) -> Option<Self> {
        match n {
            0 | 1 => Some(Self::BlinkingBlock),
            2 => Some(Self::SteadyBlock),
            3 => Some(Self::BlinkingUnderline),
            4 => Some(Self::SteadyUnderline),
            5 => Some(Self::BlinkingBar),
            6 => Some(Self::SteadyBar),
            _ => None,
        }
    }
}
