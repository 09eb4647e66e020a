//! `vte::Perform` implementation: turns parser callbacks into `Screen` mutations, pty-bound
//! reply bytes, and host-bound [`EngineEvent`]s.
//!
//! Grounded in
//! `core/pty_mux/vt_100_ansi_parser/perform.rs`'s `impl Perform for AnsiToOfsBufPerformer`: the
//! same `print`/`execute`/`csi_dispatch`/`osc_dispatch`/`esc_dispatch`/`hook`/`put`/`unhook`
//! split, generalized from that file's PTY-multiplexer subset to the full CSI/DECSET/OSC table
//! this engine's spec requires, and with unknown finals logged via `tracing::warn!` rather than
//! silently dropped (same "log-and-ignore" contract, carried over verbatim).

use super::csi::{CsiFinal, PrivateModeType};
use super::events::EngineEvent;
use super::params::ParamsExt;
use super::sgr;
use crate::grid::{Charset, CursorStyle, Screen, TermMode};

const BACKSPACE: u8 = 0x08;
const TAB: u8 = 0x09;
const LINE_FEED: u8 = 0x0A;
const VERTICAL_TAB: u8 = 0x0B;
const FORM_FEED: u8 = 0x0C;
const CARRIAGE_RETURN: u8 = 0x0D;
const BELL: u8 = 0x07;
const SHIFT_OUT: u8 = 0x0E;
const SHIFT_IN: u8 = 0x0F;

/// Borrows the screen plus two host-facing outlets for the duration of one parser feed.
pub struct Performer<'a> {
    pub screen: &'a mut Screen,
    pub replies: &'a mut Vec<u8>,
    pub events: &'a mut Vec<EngineEvent>,
}

impl Performer<'_> {
    fn is_crlf(&self) -> bool {
        self.screen.mode.contains(TermMode::CRLF)
    }
}

impl vte::Perform for Performer<'_> {
    fn print(&mut self, c: char) {
        self.screen.put_char(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            BACKSPACE => self.screen.move_rel(-1, 0),
            TAB => self.screen.put_tab(1),
            LINE_FEED | VERTICAL_TAB | FORM_FEED => {
                let first_col = self.is_crlf();
                self.screen.newline(first_col);
            }
            CARRIAGE_RETURN => {
                let y = self.screen.cursor().y;
                self.screen.move_to(0, y);
            }
            BELL => self.events.push(EngineEvent::Bell),
            SHIFT_OUT => self.screen.charset.shift(1),
            SHIFT_IN => self.screen.charset.shift(0),
            other => tracing::trace!(byte = other, "unhandled C0/C1 control"),
        }
    }

    fn csi_dispatch(
        &mut self,
        params: &vte::Params,
        intermediates: &[u8],
        _ignore: bool,
        c: char,
    ) {
        let private = intermediates.first() == Some(&b'?');
        let final_byte = CsiFinal::from_char(c);
        dispatch_csi(self, final_byte, params, private, intermediates);
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], _bell_terminated: bool) {
        match super::osc::parse_osc(params) {
            Some(super::osc::OscEvent::SetTitle(t)) => self.events.push(EngineEvent::SetTitle(t)),
            Some(super::osc::OscEvent::SetIconName(t)) => {
                self.events.push(EngineEvent::SetIconName(t));
            }
            Some(super::osc::OscEvent::SetTitleAndIcon(t)) => {
                self.events.push(EngineEvent::SetTitle(t.clone()));
                self.events.push(EngineEvent::SetIconName(t));
            }
            Some(super::osc::OscEvent::SetPalette { index, spec }) => {
                self.events.push(EngineEvent::SetPalette { index, spec });
            }
            Some(super::osc::OscEvent::ResetPalette(idx)) => {
                self.events.push(EngineEvent::ResetPalette(idx));
            }
            None => {}
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        match (intermediates.first(), byte) {
            (None, b'D') => {
                // IND: index down, scrolling if already at the bottom margin.
                self.screen.newline(false);
            }
            (None, b'E') => self.screen.newline(true), // NEL
            (None, b'H') => {
                let x = self.screen.cursor().x;
                self.screen.set_tab_stop(x, true); // HTS
            }
            (None, b'M') => {
                // RI: reverse index, scrolling down if already at the top margin.
                let cursor = self.screen.cursor();
                if cursor.y == self.screen.scroll_region.top {
                    self.screen.scroll_down(self.screen.scroll_region.top, 1);
                } else {
                    self.screen.move_rel(0, -1);
                }
            }
            (None, b'7') => self.screen.save_cursor(),
            (None, b'8') => self.screen.restore_cursor(),
            (None, b'c') => self.screen.reset(), // RIS
            (None, b'=') => self.screen.mode.insert(TermMode::APPKEYPAD),
            (None, b'>') => self.screen.mode.remove(TermMode::APPKEYPAD),
            (Some(b'('), n) => self.screen.charset.designate(0, Charset::from_designator(n)),
            (Some(b')'), n) => self.screen.charset.designate(1, Charset::from_designator(n)),
            (Some(b'*'), n) => self.screen.charset.designate(2, Charset::from_designator(n)),
            (Some(b'+'), n) => self.screen.charset.designate(3, Charset::from_designator(n)),
            _ => tracing::warn!(byte, "unrecognized ESC dispatch, ignoring"),
        }
    }

    fn hook(&mut self, _params: &vte::Params, _intermediates: &[u8], _ignore: bool, _c: char) {
        // DCS entered; this engine does not act on device-control strings beyond consuming them.
    }

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}
}

fn csi_param_list(params: &vte::Params) -> Vec<u16> {
    params.iter().filter_map(|group| group.first().copied()).collect()
}

fn dispatch_csi(
    p: &mut Performer<'_>,
    final_byte: CsiFinal,
    params: &vte::Params,
    private: bool,
    intermediates: &[u8],
) {
    use CsiFinal::*;
    let n1 = || params.nth_or_1(0) as usize;

    match final_byte {
        Icf => p.screen.insert_blanks(n1()),
        CursorUp => p.screen.move_rel(0, -(n1() as isize)),
        CursorDown => p.screen.move_rel(0, n1() as isize),
        CursorForward => p.screen.move_rel(n1() as isize, 0),
        CursorBackward => p.screen.move_rel(-(n1() as isize), 0),
        CursorNextLine => {
            p.screen.move_rel(0, n1() as isize);
            let y = p.screen.cursor().y;
            p.screen.move_to(0, y);
        }
        CursorPrevLine => {
            p.screen.move_rel(0, -(n1() as isize));
            let y = p.screen.cursor().y;
            p.screen.move_to(0, y);
        }
        CursorColumn => {
            let y = p.screen.cursor().y;
            p.screen.move_to(n1() - 1, y);
        }
        CursorPosition => {
            let row = params.nth_or_1(0) as usize;
            let col = params.nth_or_1(1) as usize;
            p.screen.move_to(col.saturating_sub(1), row.saturating_sub(1));
        }
        CursorTabForward => p.screen.put_tab(n1() as isize),
        CursorTabBackward => p.screen.put_tab(-(n1() as isize)),
        EraseDisplay => erase_display(p, params.nth_or(0, 0)),
        EraseLine => erase_line(p, params.nth_or(0, 0)),
        InsertLine => p.screen.insert_lines(n1()),
        DeleteLine => p.screen.delete_lines(n1()),
        DeleteChar => p.screen.delete_chars(n1()),
        ScrollUp => {
            let top = p.screen.scroll_region.top;
            p.screen.scroll_up(top, n1());
        }
        ScrollDown => {
            let top = p.screen.scroll_region.top;
            p.screen.scroll_down(top, n1());
        }
        EraseChar => {
            let cursor = p.screen.cursor();
            let end = (cursor.x + n1()).min(p.screen.cols()) - 1;
            p.screen.clear_region(cursor.x, cursor.y, end, cursor.y);
        }
        DeviceAttributes => p.replies.extend_from_slice(super::csi::DA_REPLY.as_bytes()),
        VerticalPosAbs => {
            let x = p.screen.cursor().x;
            p.screen.move_to(x, n1() - 1);
        }
        HorizontalPosAbs => {
            let y = p.screen.cursor().y;
            p.screen.move_to(n1() - 1, y);
        }
        TabClear => tab_clear(p, params.nth_or(0, 0)),
        SetMode => set_reset_mode(p, params, private, true),
        ResetMode => set_reset_mode(p, params, private, false),
        Sgr => {
            let list = csi_param_list(params);
            let mut cursor = p.screen.cursor();
            sgr::apply_sgr(&mut cursor, &list);
            p.screen.set_cursor(cursor);
        }
        DeviceStatusReport => device_status_report(p, params),
        SetMargins => {
            let top = params.nth_or_1(0) as usize;
            let bot_default = p.screen.rows();
            let bot = params.nth_or(1, bot_default as u16) as usize;
            p.screen.scroll_region = crate::grid::ScrollRegion::set(p.screen.rows(), top, bot);
            p.screen.move_to(0, 0);
        }
        SaveCursor => p.screen.save_cursor(),
        RestoreCursor => p.screen.restore_cursor(),
        CursorStyle if intermediates.first() == Some(&b' ') => {
            if let Some(style) = CursorStyle::from_param(params.nth_or(0, 0)) {
                p.screen.cursor_style = style;
            }
        }
        CursorStyle => {}
        Unknown(c) => tracing::warn!(final_byte = %c, "unrecognized CSI final, ignoring"),
    }
}

fn erase_display(p: &mut Performer<'_>, mode: u16) {
    let (cols, rows) = (p.screen.cols(), p.screen.rows());
    let cursor = p.screen.cursor();
    match mode {
        0 => p.screen.clear_region(cursor.x, cursor.y, cols - 1, rows - 1),
        1 => p.screen.clear_region(0, 0, cursor.x, cursor.y),
        2 | 3 => p.screen.clear_region(0, 0, cols - 1, rows - 1),
        other => tracing::warn!(mode = other, "unrecognized ED mode"),
    }
}

fn erase_line(p: &mut Performer<'_>, mode: u16) {
    let cols = p.screen.cols();
    let cursor = p.screen.cursor();
    match mode {
        0 => p.screen.clear_region(cursor.x, cursor.y, cols - 1, cursor.y),
        1 => p.screen.clear_region(0, cursor.y, cursor.x, cursor.y),
        2 => p.screen.clear_region(0, cursor.y, cols - 1, cursor.y),
        other => tracing::warn!(mode = other, "unrecognized EL mode"),
    }
}

fn tab_clear(p: &mut Performer<'_>, mode: u16) {
    match mode {
        0 => {
            let x = p.screen.cursor().x;
            p.screen.set_tab_stop(x, false);
        }
        3 => p.screen.clear_all_tabs(),
        other => tracing::warn!(mode = other, "unrecognized TBC mode"),
    }
}

fn device_status_report(p: &mut Performer<'_>, params: &vte::Params) {
    match params.nth_or_1(0) {
        6 => {
            let cursor = p.screen.cursor();
            let reply = format!("\x1b[{};{}R", cursor.y + 1, cursor.x + 1);
            p.replies.extend_from_slice(reply.as_bytes());
        }
        other => tracing::warn!(n = other, "unrecognized DSR request"),
    }
}

fn set_reset_mode(p: &mut Performer<'_>, params: &vte::Params, private: bool, set: bool) {
    for group in params.iter() {
        let Some(&n) = group.first() else { continue };
        if private {
            apply_private_mode(p, n.into(), set);
        } else {
            tracing::trace!(n, set, "ANSI (non-private) mode, not modeled");
        }
    }
}

fn apply_private_mode(p: &mut Performer<'_>, mode: PrivateModeType, set: bool) {
    use crate::grid::CursorState;
    match mode {
        PrivateModeType::AppCursor => p.screen.mode.set(TermMode::APPCURSOR, set),
        PrivateModeType::ReverseVideo => {
            p.screen.mode.set(TermMode::REVERSE, set);
            // Every cell's displayed polarity just flipped; redraw the whole screen (`st.c`
            // pairs this MODBIT toggle with a full `tfulldirt()`).
            p.screen.mark_all_dirty();
        }
        PrivateModeType::OriginMode => {
            let mut cursor = p.screen.cursor();
            cursor.state.set(CursorState::ORIGIN, set);
            p.screen.set_cursor(cursor);
            p.screen.mode.set(TermMode::ORIGIN, set);
            p.screen.move_to(0, 0);
        }
        PrivateModeType::AutoWrap => p.screen.mode.set(TermMode::WRAP, set),
        PrivateModeType::ShowCursor => p.screen.mode.set(TermMode::HIDE, !set),
        PrivateModeType::MouseX10 => {
            if set {
                p.screen.mode.set_exclusive_mouse_mode(TermMode::MOUSE_X10);
            } else {
                p.screen.mode.remove(TermMode::MOUSE_X10);
            }
        }
        PrivateModeType::MouseButtonEvent => {
            if set {
                p.screen.mode.set_exclusive_mouse_mode(TermMode::MOUSE_BUTTON);
            } else {
                p.screen.mode.remove(TermMode::MOUSE_BUTTON);
            }
        }
        PrivateModeType::MouseMotion => {
            if set {
                p.screen.mode.set_exclusive_mouse_mode(TermMode::MOUSE_MOTION);
            } else {
                p.screen.mode.remove(TermMode::MOUSE_MOTION);
            }
        }
        PrivateModeType::MouseAnyEvent => {
            if set {
                p.screen.mode.set_exclusive_mouse_mode(TermMode::MOUSE_MANY);
            } else {
                p.screen.mode.remove(TermMode::MOUSE_MANY);
            }
        }
        PrivateModeType::MouseSgr => p.screen.mode.set(TermMode::MOUSE_SGR, set),
        PrivateModeType::FocusEvents => p.screen.mode.set(TermMode::FOCUS, set),
        PrivateModeType::EightBitInput => p.screen.mode.set(TermMode::EIGHT_BIT, set),
        PrivateModeType::AltScreen1047 => {
            let currently_alt = p.screen.mode.contains(TermMode::ALTSCREEN);
            if set && !currently_alt {
                p.screen.swap_screen();
            } else if !set && currently_alt {
                let (cols, rows) = (p.screen.cols(), p.screen.rows());
                p.screen.clear_region(0, 0, cols - 1, rows - 1);
                p.screen.swap_screen();
            }
        }
        PrivateModeType::SaveCursorDec => {
            if set {
                p.screen.save_cursor();
            } else {
                p.screen.restore_cursor();
            }
        }
        PrivateModeType::AltScreen1049 => {
            let currently_alt = p.screen.mode.contains(TermMode::ALTSCREEN);
            if set {
                p.screen.save_cursor();
                if !currently_alt {
                    let (cols, rows) = (p.screen.cols(), p.screen.rows());
                    p.screen.swap_screen();
                    p.screen.clear_region(0, 0, cols - 1, rows - 1);
                }
            } else {
                if currently_alt {
                    p.screen.swap_screen();
                }
                p.screen.restore_cursor();
            }
        }
        PrivateModeType::BracketedPaste => p.screen.mode.set(TermMode::BRCKTPASTE, set),
        PrivateModeType::Other(n) => tracing::warn!(mode = n, set, "unrecognized DEC private mode"),
    }
}
