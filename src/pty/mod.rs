//! Master-side pty open, spawn, chunked reads/writes, and resize propagation.
//!
//! Grounded in `core/pty/pty_core.rs`'s use of `portable_pty::{CommandBuilder, MasterPty,
//! SlavePty}` and its `READ_BUFFER_SIZE` constant; the platform fork/exec/ioctl plumbing is left
//! entirely to `portable-pty` per this crate's SPEC_FULL.md §4.F note.

mod session;

pub use session::{PtySession, SpawnConfig};

/// Bytes pulled per read syscall. Matches the teacher's own `READ_BUFFER_SIZE`.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Per-syscall write cap; mirrors the serial-line heuristic in SPEC_FULL.md §4.F ("write at most
/// 256 bytes per syscall").
pub const WRITE_CHUNK_SIZE: usize = 256;
