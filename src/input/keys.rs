use crate::grid::TermMode;

/// A key the host reports, already resolved past any platform keysym table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySym {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Esc,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Function(u8),
    Keypad(KeypadKey),
}

/// The numeric keypad, distinct from the top-row digits: under `APPKEYPAD` these send `ESC O`
/// application codes instead of their plain-ASCII form (`original_source/config.def.h`'s table
/// leaves this block at `appkey = 0` only because X keeps keypad keysyms separate from the main
/// keyboard block; the tri-state still applies, it is just never exercised by that default
/// config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Decimal,
    Divide,
    Multiply,
    Subtract,
    Add,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    const NONE: Self = Self { ctrl: false, shift: false, alt: false };

    /// xterm's modifier parameter: 1 + shift(1) + alt(2) + ctrl(4).
    fn csi_code(self) -> u8 {
        1 + u8::from(self.shift) + if self.alt { 2 } else { 0 } + if self.ctrl { 4 } else { 0 }
    }
}

/// One mode bit's requirement for a key-table entry: `Any` never excludes the entry, `RequireSet`
/// / `RequireClear` exclude it unless the bit is set / clear. Mirrors `st.c`'s `appkey`,
/// `appcursor`, and `crlf` signed-char fields (`0`, `+1`, `-1`) one for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Any,
    RequireSet,
    RequireClear,
}

impl Toggle {
    fn matches(self, set: bool) -> bool {
        match self {
            Toggle::Any => true,
            Toggle::RequireSet => set,
            Toggle::RequireClear => !set,
        }
    }
}

/// A key-table entry's tri-state requirement against the three mode bits the key table can
/// condition on. Unlisted bits default to `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModeReq {
    appkey: Toggle,
    appcursor: Toggle,
    crlf: Toggle,
}

impl ModeReq {
    const ANY: Self = Self { appkey: Toggle::Any, appcursor: Toggle::Any, crlf: Toggle::Any };

    const fn appcursor(t: Toggle) -> Self {
        Self { appcursor: t, ..Self::ANY }
    }

    const fn appkey(t: Toggle) -> Self {
        Self { appkey: t, ..Self::ANY }
    }

    const fn crlf(t: Toggle) -> Self {
        Self { crlf: t, ..Self::ANY }
    }

    fn matches(self, mode: TermMode) -> bool {
        self.appkey.matches(mode.contains(TermMode::APPKEYPAD))
            && self.appcursor.matches(mode.contains(TermMode::APPCURSOR))
            && self.crlf.matches(mode.contains(TermMode::CRLF))
    }
}

/// The first entry whose requirement matches `mode` wins; falls back to the last entry's bytes if
/// somehow none match (the tables below always include a catch-all `Any` entry, so this never
/// triggers in practice).
fn select(mode: TermMode, entries: &[(ModeReq, &[u8])]) -> Vec<u8> {
    entries
        .iter()
        .find(|(req, _)| req.matches(mode))
        .or_else(|| entries.last())
        .map_or_else(Vec::new, |(_, bytes)| bytes.to_vec())
}

/// Translate a key press (plus the terminal mode bits that condition it) into the bytes to write
/// to the child. Returns an empty vector for keys with no terminal representation.
pub fn encode_key(sym: KeySym, mods: Modifiers, mode: TermMode) -> Vec<u8> {
    match sym {
        KeySym::Char(ch) => encode_char(ch, mods),
        KeySym::Enter => enter_bytes(mods, mode),
        KeySym::Tab => {
            if mods == Modifiers::NONE {
                b"\t".to_vec()
            } else if mods == (Modifiers { shift: true, ctrl: false, alt: false }) {
                b"\x1b[Z".to_vec()
            } else {
                csi_letter(mods, b'I')
            }
        }
        KeySym::BackTab => b"\x1b[Z".to_vec(),
        KeySym::Backspace => {
            if mods.ctrl {
                vec![0x08]
            } else {
                vec![0x7f]
            }
        }
        KeySym::Esc => vec![0x1b],
        KeySym::Delete => csi_tilde(mods, 3),
        KeySym::Insert => csi_tilde(mods, 2),
        KeySym::Up => arrow(mods, mode, b'A'),
        KeySym::Down => arrow(mods, mode, b'B'),
        KeySym::Right => arrow(mods, mode, b'C'),
        KeySym::Left => arrow(mods, mode, b'D'),
        KeySym::Home => app_or_csi_letter(mods, mode, b'H'),
        KeySym::End => app_or_csi_letter(mods, mode, b'F'),
        KeySym::PageUp => csi_tilde(mods, 5),
        KeySym::PageDown => csi_tilde(mods, 6),
        KeySym::Function(n) => function_key(n, mods),
        KeySym::Keypad(key) => keypad_bytes(key, mode),
    }
}

fn encode_char(ch: char, mods: Modifiers) -> Vec<u8> {
    if mods.ctrl && !mods.alt {
        return encode_ctrl_char(ch, mods.shift);
    }
    if mods.alt && !mods.ctrl {
        let mut out = vec![0x1b];
        let mut buf = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        return out;
    }
    if mods.ctrl && mods.alt {
        if let Some(code) = ctrl_code(ch) {
            return vec![0x1b, code];
        }
    }
    let mut buf = [0u8; 4];
    ch.encode_utf8(&mut buf).as_bytes().to_vec()
}

fn ctrl_code(ch: char) -> Option<u8> {
    match ch {
        'a'..='z' => Some(ch as u8 - b'a' + 1),
        'A'..='Z' => Some(ch as u8 - b'A' + 1),
        _ => None,
    }
}

fn encode_ctrl_char(ch: char, shift: bool) -> Vec<u8> {
    match ch {
        'a'..='z' | 'A'..='Z' => {
            if let Some(code) = ctrl_code(ch) {
                return vec![code];
            }
            Vec::new()
        }
        ' ' | '`' => vec![0x00],
        '[' => vec![0x1b],
        '\\' => vec![0x1c],
        ']' => vec![0x1d],
        '^' => vec![0x1e],
        '_' => vec![0x1f],
        '2' => vec![0x00],
        '3' => vec![0x1b],
        '4' => vec![0x1c],
        '5' => vec![0x1d],
        '6' => vec![0x1e],
        '7' => vec![0x1f],
        '8' => vec![0x7f],
        _ => csi_u(ch as u32, Modifiers { ctrl: true, shift, alt: false }),
    }
}

fn csi_u(code: u32, mods: Modifiers) -> Vec<u8> {
    let m = mods.csi_code();
    if m == 1 {
        format!("\x1b[{code}u").into_bytes()
    } else {
        format!("\x1b[{code};{m}u").into_bytes()
    }
}

fn csi_letter(mods: Modifiers, letter: u8) -> Vec<u8> {
    format!("\x1b[1;{}{}", mods.csi_code(), letter as char).into_bytes()
}

fn csi_tilde(mods: Modifiers, code: u32) -> Vec<u8> {
    if mods == Modifiers::NONE {
        format!("\x1b[{code}~").into_bytes()
    } else {
        format!("\x1b[{code};{}~", mods.csi_code()).into_bytes()
    }
}

/// Enter/Return: unmodified and alt-modified forms go through the CRLF tri-state table
/// (`config.def.h`'s `XK_Return` rows); any other modifier combination falls back to the CSI-u
/// style this table already uses for other modified keys.
fn enter_bytes(mods: Modifiers, mode: TermMode) -> Vec<u8> {
    if mods.ctrl || mods.shift {
        return csi_letter(mods, b'M');
    }
    let esc_prefix: &[u8] = if mods.alt { b"\x1b" } else { b"" };
    let lf: Vec<u8> = [esc_prefix, b"\n".as_slice()].concat();
    let crlf: Vec<u8> = [esc_prefix, b"\r\n".as_slice()].concat();
    let entries = [
        (ModeReq::crlf(Toggle::RequireClear), lf.as_slice()),
        (ModeReq::crlf(Toggle::RequireSet), crlf.as_slice()),
    ];
    select(mode, &entries)
}

/// Arrow keys: DECCKM (`APPCURSOR`) selects `SS3` over `CSI` when unmodified; any modifier forces
/// the CSI-with-parameter form regardless of cursor-key mode, matching xterm.
fn arrow(mods: Modifiers, mode: TermMode, letter: u8) -> Vec<u8> {
    if mods != Modifiers::NONE {
        return csi_letter(mods, letter);
    }
    let csi: Vec<u8> = vec![0x1b, b'[', letter];
    let ss3: Vec<u8> = vec![0x1b, b'O', letter];
    let entries = [
        (ModeReq::appcursor(Toggle::RequireClear), csi.as_slice()),
        (ModeReq::appcursor(Toggle::RequireSet), ss3.as_slice()),
    ];
    select(mode, &entries)
}

fn app_or_csi_letter(mods: Modifiers, mode: TermMode, letter: u8) -> Vec<u8> {
    arrow(mods, mode, letter)
}

fn function_key(n: u8, mods: Modifiers) -> Vec<u8> {
    let (letter, tilde_code) = match n {
        1 => (Some(b'P'), None),
        2 => (Some(b'Q'), None),
        3 => (Some(b'R'), None),
        4 => (Some(b'S'), None),
        5 => (None, Some(15)),
        6 => (None, Some(17)),
        7 => (None, Some(18)),
        8 => (None, Some(19)),
        9 => (None, Some(20)),
        10 => (None, Some(21)),
        11 => (None, Some(23)),
        12 => (None, Some(24)),
        _ => return Vec::new(),
    };
    match (letter, tilde_code) {
        (Some(l), _) => {
            if mods == Modifiers::NONE {
                vec![0x1b, b'O', l]
            } else {
                csi_letter(mods, l)
            }
        }
        (_, Some(code)) => csi_tilde(mods, code),
        _ => unreachable!(),
    }
}

/// Numeric keypad: plain ASCII unless `APPKEYPAD` is set, in which case each key sends its `ESC O`
/// application-keypad code (xterm's keypad mapping; `config.def.h` leaves this bit unexercised
/// since X keeps the keypad keysyms out of its default `key[]` table, but the tri-state still
/// governs it here as SPEC_FULL's table calls for).
fn keypad_bytes(key: KeypadKey, mode: TermMode) -> Vec<u8> {
    let (plain, app): (&[u8], &[u8]) = match key {
        KeypadKey::Num0 => (b"0", b"\x1bOp"),
        KeypadKey::Num1 => (b"1", b"\x1bOq"),
        KeypadKey::Num2 => (b"2", b"\x1bOr"),
        KeypadKey::Num3 => (b"3", b"\x1bOs"),
        KeypadKey::Num4 => (b"4", b"\x1bOt"),
        KeypadKey::Num5 => (b"5", b"\x1bOu"),
        KeypadKey::Num6 => (b"6", b"\x1bOv"),
        KeypadKey::Num7 => (b"7", b"\x1bOw"),
        KeypadKey::Num8 => (b"8", b"\x1bOx"),
        KeypadKey::Num9 => (b"9", b"\x1bOy"),
        KeypadKey::Decimal => (b".", b"\x1bOn"),
        KeypadKey::Divide => (b"/", b"\x1bOo"),
        KeypadKey::Multiply => (b"*", b"\x1bOj"),
        KeypadKey::Subtract => (b"-", b"\x1bOm"),
        KeypadKey::Add => (b"+", b"\x1bOk"),
        KeypadKey::Enter => (b"\r", b"\x1bOM"),
    };
    let entries = [
        (ModeReq::appkey(Toggle::RequireClear), plain),
        (ModeReq::appkey(Toggle::RequireSet), app),
    ];
    select(mode, &entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_char_passthrough() {
        assert_eq!(encode_key(KeySym::Char('a'), Modifiers::default(), TermMode::default()), b"a");
    }

    #[test]
    fn ctrl_c_is_etx() {
        let mods = Modifiers { ctrl: true, shift: false, alt: false };
        assert_eq!(encode_key(KeySym::Char('c'), mods, TermMode::default()), vec![3]);
    }

    #[test]
    fn alt_x_is_esc_x() {
        let mods = Modifiers { ctrl: false, shift: false, alt: true };
        assert_eq!(encode_key(KeySym::Char('x'), mods, TermMode::default()), vec![0x1b, b'x']);
    }

    #[test]
    fn arrow_up_plain_is_csi_without_appcursor() {
        assert_eq!(
            encode_key(KeySym::Up, Modifiers::default(), TermMode::default()),
            b"\x1b[A"
        );
    }

    #[test]
    fn arrow_up_plain_is_ss3_with_appcursor() {
        let mode = TermMode::default() | TermMode::APPCURSOR;
        assert_eq!(encode_key(KeySym::Up, Modifiers::default(), mode), b"\x1bOA");
    }

    #[test]
    fn ctrl_arrow_ignores_appcursor() {
        let mode = TermMode::default() | TermMode::APPCURSOR;
        let mods = Modifiers { ctrl: true, shift: false, alt: false };
        assert_eq!(encode_key(KeySym::Up, mods, mode), b"\x1b[1;5A");
    }

    #[test]
    fn backspace_plain_is_del() {
        assert_eq!(encode_key(KeySym::Backspace, Modifiers::default(), TermMode::default()), vec![0x7f]);
    }

    #[test]
    fn f5_plain_uses_tilde_form() {
        assert_eq!(encode_key(KeySym::Function(5), Modifiers::default(), TermMode::default()), b"\x1b[15~");
    }

    #[test]
    fn enter_plain_is_lf_without_crlf_mode() {
        assert_eq!(encode_key(KeySym::Enter, Modifiers::default(), TermMode::default()), b"\n");
    }

    #[test]
    fn enter_is_crlf_with_crlf_mode() {
        let mode = TermMode::default() | TermMode::CRLF;
        assert_eq!(encode_key(KeySym::Enter, Modifiers::default(), mode), b"\r\n");
    }

    #[test]
    fn alt_enter_prefixes_esc_and_stays_crlf_aware() {
        let mods = Modifiers { alt: true, ..Modifiers::default() };
        let mode = TermMode::default() | TermMode::CRLF;
        assert_eq!(encode_key(KeySym::Enter, mods, mode), b"\x1b\r\n");
    }

    #[test]
    fn keypad_digit_plain_without_appkeypad() {
        assert_eq!(
            encode_key(KeySym::Keypad(KeypadKey::Num5), Modifiers::default(), TermMode::default()),
            b"5"
        );
    }

    #[test]
    fn keypad_digit_app_code_with_appkeypad() {
        let mode = TermMode::default() | TermMode::APPKEYPAD;
        assert_eq!(encode_key(KeySym::Keypad(KeypadKey::Num5), Modifiers::default(), mode), b"\x1bOu");
    }

    #[test]
    fn keypad_enter_app_code_with_appkeypad() {
        let mode = TermMode::default() | TermMode::APPKEYPAD;
        assert_eq!(encode_key(KeySym::Keypad(KeypadKey::Enter), Modifiers::default(), mode), b"\x1bOM");
    }
}
