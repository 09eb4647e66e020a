//! Host keyboard and mouse events to child-process byte sequences.
//!
//! Grounded in
//! `examples/r3bl-org-r3bl-open-core/tui/src/core/pty/pty_core/pty_input_events.rs`'s
//! algorithmic `KeyPress -> PtyInputEvent` conversion (CSI-modifier arithmetic, CSI-u fallback,
//! Ctrl-letter/Ctrl-number/Ctrl-symbol tables) generalized to this crate's own key/modifier types
//! and made mode-aware (DECCKM cursor-key mode, application keypad mode, CRLF mode) the way
//! `original_source/config.def.h`'s `Key key[]` table is mode-aware: each ambiguous key (arrows,
//! Home/End, Enter, the numeric keypad) has a small ordered list of candidate encodings, each
//! tagged with a tri-state requirement per mode bit (`Toggle::Any` / `RequireSet` /
//! `RequireClear`), and the first candidate whose requirements match the live mode wins — the
//! same "0 = any, +1 = require-set, -1 = require-clear" semantics `st.c`'s signed-char
//! `appkey`/`appcursor`/`crlf` fields encode, replacing the signed-char trick with a named enum.

mod keys;
mod mouse;

pub use keys::{encode_key, KeySym, KeypadKey, Modifiers};
pub use mouse::{encode_mouse, MouseButton, MouseEventKind};
