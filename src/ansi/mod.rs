//! Escape-sequence parsing and command execution.
//!
//! The streaming state machine itself (byte classification, UTF-8 reassembly inside DCS/OSC
//! strings, parameter/intermediate accumulation) is the `vte` crate's `Parser`, the same crate
//! the codebase already depends on for ANSI parsing elsewhere. This module supplies the
//! `vte::Perform` implementation ("the command executor") that turns parser callbacks into
//! mutations of a [`crate::grid::Screen`], grounded in
//! `examples/r3bl-org-r3bl-open-core/tui/src/core/pty_mux/vt_100_ansi_parser/perform.rs` and its
//! sibling `operations/*` modules.

pub mod csi;
pub mod events;
pub mod osc;
pub mod params;
pub mod perform;
pub mod sgr;

pub use events::EngineEvent;
pub use perform::Performer;
