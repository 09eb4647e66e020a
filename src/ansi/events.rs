//! Events the command executor pushes out to the host, distinct from pty byte replies.

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Bell,
    SetTitle(String),
    SetIconName(String),
    SetPalette { index: u8, spec: String },
    ResetPalette(Option<u8>),
    /// Fired whenever the primary selection is created or extended, per this crate's resolution
    /// of the `x.c`-vs-`st.c` clip-copy-trigger open question (SPEC_FULL.md §9).
    ClipboardUpdate(String),
}
