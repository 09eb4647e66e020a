//! Terminal-wide mode bitmask and the cursor's own small state bitmask.

bitflags::bitflags! {
    /// Mode bits that affect how the grid/executor/input-translator behave.
    ///
    /// Initial value per the data model is `WRAP | UTF8`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TermMode: u32 {
        const WRAP          = 1 << 0;
        const INSERT         = 1 << 1;
        const APPKEYPAD      = 1 << 2;
        const ALTSCREEN      = 1 << 3;
        const CRLF           = 1 << 4;
        const MOUSE_X10      = 1 << 5;
        const MOUSE_BUTTON   = 1 << 6;
        const MOUSE_MOTION   = 1 << 7;
        const MOUSE_MANY     = 1 << 8;
        const MOUSE_SGR      = 1 << 9;
        const REVERSE        = 1 << 10;
        const KBDLOCK        = 1 << 11;
        const HIDE           = 1 << 12;
        const ECHO           = 1 << 13;
        const APPCURSOR      = 1 << 14;
        const EIGHT_BIT      = 1 << 15;
        const BLINK          = 1 << 16;
        const FOCUS          = 1 << 17;
        const BRCKTPASTE     = 1 << 18;
        const PRINT          = 1 << 19;
        const UTF8           = 1 << 20;
        const ORIGIN         = 1 << 21;
    }
}

impl Default for TermMode {
    fn default() -> Self {
        TermMode::WRAP | TermMode::UTF8
    }
}

impl TermMode {
    /// The DECSET mouse-reporting bits are mutually exclusive: selecting one clears the others.
    pub const MOUSE_MASK: TermMode = TermMode::MOUSE_X10
        .union(TermMode::MOUSE_BUTTON)
        .union(TermMode::MOUSE_MOTION)
        .union(TermMode::MOUSE_MANY);

    pub fn set_exclusive_mouse_mode(&mut self, bit: TermMode) {
        self.remove(Self::MOUSE_MASK);
        self.insert(bit);
    }
}
