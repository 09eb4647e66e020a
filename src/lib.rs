//! A decoupled VT100/ANSI-X3.64-compatible terminal engine: escape-sequence interpreter, a
//! two-dimensional grid of styled cells, selection tracking, pty plumbing, and host-input
//! translation, with no rendering or windowing baked in.
//!
//! UTF-8 decoding has no dedicated module: `vte::Parser` already decodes the byte stream to
//! `char` (with the standard replacement-character policy for invalid sequences) before handing
//! codepoints to `ansi`'s `Perform` implementation, so a separate codec stage ahead of it would
//! just be redundant bookkeeping.
//!
//! The pieces compose as:
//!
//! - [`grid`]: the cell grid, cursor, scroll region, tab stops, and charset state.
//! - [`selection`]: mouse-selection tracking over the grid (linear and rectangular, word/line
//!   snapping).
//! - [`ansi`]: the `vte::Perform` implementation that turns parsed escape sequences into grid
//!   mutations.
//! - [`pty`]: master-side pty open/spawn/read/write/resize.
//! - [`input`]: host key and mouse events to child-bound byte sequences.
//! - [`engine`]: the [`engine::Term`] facade tying all of the above together.
//! - [`event_loop`]: the async loop a host runs to drive [`engine::Term`].
//!
//! A host renderer owns a [`engine::Term`], feeds it child output, and reads back dirty rows,
//! cursor position, and selection state to paint a screen; it never needs to understand escape
//! sequences itself.

pub mod ansi;
pub mod engine;
pub mod error;
pub mod event_loop;
pub mod grid;
pub mod input;
pub mod pty;
pub mod selection;

pub use engine::{EngineConfig, Term, TermBuilder};
pub use error::{Result, TermError};
