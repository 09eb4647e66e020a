use crate::grid::TermMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

impl MouseButton {
    fn base_code(self) -> u16 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::WheelUp => 64,
            Self::WheelDown => 65,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    Motion(Option<MouseButton>),
}

/// Encode a mouse event for the child, respecting whichever of the four mutually exclusive
/// tracking modes (X10, normal, button-motion, any-motion) and the SGR-extended-coordinate mode
/// are currently set. Returns `None` when no tracking mode is active or this event kind isn't
/// reported under the active one (e.g. plain motion with no button held under button-motion
/// tracking).
pub fn encode_mouse(kind: MouseEventKind, col: u16, row: u16, mode: TermMode) -> Option<Vec<u8>> {
    let report = match kind {
        MouseEventKind::Press(btn) => Some((btn.base_code(), false)),
        MouseEventKind::Release(btn) => {
            if mode.contains(TermMode::MOUSE_X10) {
                None
            } else {
                Some((btn.base_code(), true))
            }
        }
        MouseEventKind::Motion(btn) => {
            if mode.contains(TermMode::MOUSE_MANY) {
                Some((btn.map_or(35, MouseButton::base_code) + 32, false))
            } else if mode.contains(TermMode::MOUSE_MOTION) {
                btn.map(|b| (b.base_code() + 32, false))
            } else {
                None
            }
        }
    };

    if mode.contains(TermMode::MOUSE_X10) {
        let (code, _release) = report?;
        return Some(x10_report(code, col, row));
    }
    if mode.intersects(TermMode::MOUSE_BUTTON | TermMode::MOUSE_MOTION | TermMode::MOUSE_MANY) {
        let (code, release) = report?;
        return Some(if mode.contains(TermMode::MOUSE_SGR) {
            sgr_report(code, col, row, release)
        } else {
            let code = if release { 3 } else { code };
            x10_report(code, col, row)
        });
    }
    None
}

/// `ESC [ M <32+code> <32+col> <32+row>`, each coordinate clamped to stay a printable byte
/// (xterm stops reporting past column/row 223 in this legacy encoding).
fn x10_report(code: u16, col: u16, row: u16) -> Vec<u8> {
    let clamp = |v: u16| -> u8 { (v.min(223) + 32) as u8 };
    vec![0x1b, b'[', b'M', (code + 32) as u8, clamp(col), clamp(row)]
}

/// `ESC [ < code ; col ; row (M|m)`, unbounded coordinates, trailing `M` for press/motion and
/// `m` for release.
fn sgr_report(code: u16, col: u16, row: u16, release: bool) -> Vec<u8> {
    let trailer = if release { 'm' } else { 'M' };
    format!("\x1b[<{code};{col};{row}{trailer}").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tracking_mode_yields_none() {
        assert_eq!(
            encode_mouse(MouseEventKind::Press(MouseButton::Left), 1, 1, TermMode::default()),
            None
        );
    }

    #[test]
    fn x10_press_report() {
        let mut mode = TermMode::default();
        mode.set_exclusive_mouse_mode(TermMode::MOUSE_X10);
        let bytes = encode_mouse(MouseEventKind::Press(MouseButton::Left), 5, 10, mode).unwrap();
        assert_eq!(bytes, vec![0x1b, b'[', b'M', 32, 5 + 32, 10 + 32]);
    }

    #[test]
    fn sgr_release_uses_lowercase_trailer() {
        let mut mode = TermMode::default();
        mode.set_exclusive_mouse_mode(TermMode::MOUSE_BUTTON);
        mode.insert(TermMode::MOUSE_SGR);
        let bytes =
            encode_mouse(MouseEventKind::Release(MouseButton::Left), 3, 4, mode).unwrap();
        assert_eq!(bytes, b"\x1b[<0;3;4m");
    }

    #[test]
    fn motion_without_button_ignored_under_button_event_tracking() {
        let mut mode = TermMode::default();
        mode.set_exclusive_mouse_mode(TermMode::MOUSE_BUTTON);
        assert_eq!(encode_mouse(MouseEventKind::Motion(None), 1, 1, mode), None);
    }

    #[test]
    fn any_motion_reports_even_without_button() {
        let mut mode = TermMode::default();
        mode.set_exclusive_mouse_mode(TermMode::MOUSE_MANY);
        mode.insert(TermMode::MOUSE_SGR);
        let bytes = encode_mouse(MouseEventKind::Motion(None), 2, 2, mode).unwrap();
        assert_eq!(bytes, b"\x1b[<35;2;2M");
    }
}
