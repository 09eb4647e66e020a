//! CSI final-byte constants and the DEC private-mode enum.
//!
//! Constant naming follows
//! `core/pty_mux/vt_100_ansi_parser/protocols/csi_codes/constants.rs`; the private-mode enum
//! follows the sibling `private_mode.rs`, extended with the additional modes this engine's
//! spec requires (mouse reporting, focus events, bracketed paste, alt-screen 1047/1049) that the
//! teacher's subset left unimplemented.

use super::params::ParamsExt;

pub const CUU_CURSOR_UP: char = 'A';
pub const CUD_CURSOR_DOWN: char = 'B';
pub const CUF_CURSOR_FORWARD: char = 'C';
pub const CUB_CURSOR_BACKWARD: char = 'D';
pub const CNL_CURSOR_NEXT_LINE: char = 'E';
pub const CPL_CURSOR_PREV_LINE: char = 'F';
pub const CHA_CURSOR_COLUMN: char = 'G';
pub const CUP_CURSOR_POSITION: char = 'H';
pub const HVP_CURSOR_POSITION: char = 'f';
pub const CHT_CURSOR_TAB_FORWARD: char = 'I';
pub const CBT_CURSOR_TAB_BACKWARD: char = 'Z';
pub const ED_ERASE_DISPLAY: char = 'J';
pub const EL_ERASE_LINE: char = 'K';
pub const SU_SCROLL_UP: char = 'S';
pub const SD_SCROLL_DOWN: char = 'T';
pub const DECSTBM_SET_MARGINS: char = 'r';
pub const IL_INSERT_LINE: char = 'L';
pub const DL_DELETE_LINE: char = 'M';
pub const DCH_DELETE_CHAR: char = 'P';
pub const ICH_INSERT_CHAR: char = '@';
pub const ECH_ERASE_CHAR: char = 'X';
pub const VPA_VERTICAL_POSITION: char = 'd';
pub const HPA_HORIZONTAL_POSITION: char = '`';
pub const SGR_SET_GRAPHICS: char = 'm';
pub const DA_DEVICE_ATTRIBUTES: char = 'c';
pub const TBC_TAB_CLEAR: char = 'g';
pub const SM_SET_MODE: char = 'h';
pub const RM_RESET_MODE: char = 'l';
pub const DSR_DEVICE_STATUS: char = 'n';
pub const SCOSC_SAVE_CURSOR: char = 's';
pub const SCORC_RESTORE_CURSOR: char = 'u';
pub const DECSCUSR_CURSOR_STYLE: char = 'q';

/// DA reply this engine reports (VT220 with a small capability set).
pub const DA_REPLY: &str = "\x1b[?62;1;6c";

/// A recognized CSI final byte, replacing the source's `goto unknown` fallthrough with a tagged
/// enum per this crate's redesign notes — unrecognized finals fall through to `Unknown` and are
/// logged, not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiFinal {
    Icf,
    CursorUp,
    CursorDown,
    CursorForward,
    CursorBackward,
    CursorNextLine,
    CursorPrevLine,
    CursorColumn,
    CursorPosition,
    CursorTabForward,
    CursorTabBackward,
    EraseDisplay,
    EraseLine,
    InsertLine,
    DeleteLine,
    DeleteChar,
    ScrollUp,
    ScrollDown,
    EraseChar,
    DeviceAttributes,
    VerticalPosAbs,
    HorizontalPosAbs,
    TabClear,
    SetMode,
    ResetMode,
    Sgr,
    DeviceStatusReport,
    SetMargins,
    SaveCursor,
    RestoreCursor,
    CursorStyle,
    Unknown(char),
}

impl CsiFinal {
    #[must_use]
    pub fn from_char(c: char) -> Self {
        match c {
            ICH_INSERT_CHAR => Self::Icf,
            CUU_CURSOR_UP => Self::CursorUp,
            CUD_CURSOR_DOWN => Self::CursorDown,
            CUF_CURSOR_FORWARD => Self::CursorForward,
            CUB_CURSOR_BACKWARD => Self::CursorBackward,
            CNL_CURSOR_NEXT_LINE => Self::CursorNextLine,
            CPL_CURSOR_PREV_LINE => Self::CursorPrevLine,
            CHA_CURSOR_COLUMN => Self::CursorColumn,
            CUP_CURSOR_POSITION | HVP_CURSOR_POSITION => Self::CursorPosition,
            CHT_CURSOR_TAB_FORWARD => Self::CursorTabForward,
            CBT_CURSOR_TAB_BACKWARD => Self::CursorTabBackward,
            ED_ERASE_DISPLAY => Self::EraseDisplay,
            EL_ERASE_LINE => Self::EraseLine,
            IL_INSERT_LINE => Self::InsertLine,
            DL_DELETE_LINE => Self::DeleteLine,
            DCH_DELETE_CHAR => Self::DeleteChar,
            SU_SCROLL_UP => Self::ScrollUp,
            SD_SCROLL_DOWN => Self::ScrollDown,
            ECH_ERASE_CHAR => Self::EraseChar,
            DA_DEVICE_ATTRIBUTES => Self::DeviceAttributes,
            VPA_VERTICAL_POSITION => Self::VerticalPosAbs,
            HPA_HORIZONTAL_POSITION => Self::HorizontalPosAbs,
            TBC_TAB_CLEAR => Self::TabClear,
            SM_SET_MODE => Self::SetMode,
            RM_RESET_MODE => Self::ResetMode,
            SGR_SET_GRAPHICS => Self::Sgr,
            DSR_DEVICE_STATUS => Self::DeviceStatusReport,
            DECSTBM_SET_MARGINS => Self::SetMargins,
            SCOSC_SAVE_CURSOR => Self::SaveCursor,
            SCORC_RESTORE_CURSOR => Self::RestoreCursor,
            DECSCUSR_CURSOR_STYLE => Self::CursorStyle,
            other => Self::Unknown(other),
        }
    }
}

/// DEC Private Mode types for `CSI ? ... h/l` sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateModeType {
    AppCursor,
    ReverseVideo,
    OriginMode,
    AutoWrap,
    ShowCursor,
    MouseX10,
    MouseButtonEvent,
    MouseMotion,
    MouseAnyEvent,
    MouseSgr,
    FocusEvents,
    EightBitInput,
    AltScreen1047,
    SaveCursorDec,
    AltScreen1049,
    BracketedPaste,
    Other(u16),
}

impl PrivateModeType {
    #[must_use]
    pub fn as_u16(self) -> u16 {
        match self {
            Self::AppCursor => 1,
            Self::ReverseVideo => 5,
            Self::OriginMode => 6,
            Self::AutoWrap => 7,
            Self::MouseX10 => 9,
            Self::ShowCursor => 25,
            Self::MouseButtonEvent => 1000,
            Self::MouseMotion => 1002,
            Self::MouseAnyEvent => 1003,
            Self::FocusEvents => 1004,
            Self::MouseSgr => 1006,
            Self::EightBitInput => 1034,
            Self::AltScreen1047 => 1047,
            Self::SaveCursorDec => 1048,
            Self::AltScreen1049 => 1049,
            Self::BracketedPaste => 2004,
            Self::Other(n) => n,
        }
    }
}

impl From<u16> for PrivateModeType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::AppCursor,
            5 => Self::ReverseVideo,
            6 => Self::OriginMode,
            7 => Self::AutoWrap,
            9 => Self::MouseX10,
            25 => Self::ShowCursor,
            1000 => Self::MouseButtonEvent,
            1002 => Self::MouseMotion,
            1003 => Self::MouseAnyEvent,
            1004 => Self::FocusEvents,
            1006 => Self::MouseSgr,
            1034 => Self::EightBitInput,
            1047 => Self::AltScreen1047,
            1048 => Self::SaveCursorDec,
            1049 => Self::AltScreen1049,
            2004 => Self::BracketedPaste,
            n => Self::Other(n),
        }
    }
}

impl From<&vte::Params> for PrivateModeType {
    fn from(params: &vte::Params) -> Self {
        params.nth_opt(0).unwrap_or(0).into()
    }
}
