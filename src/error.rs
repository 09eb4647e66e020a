//! Typed errors for the fatal paths of the engine (pty spawn, pty write, child wait).
//!
//! Decoding and protocol errors never construct a [`TermError`]: per the engine's error-handling
//! design they are logged via `tracing` and absorbed at the point of occurrence instead of
//! propagating. Only the categories that the host must actually react to surface here.

use std::io;

/// Errors that can terminate the engine or a pty session.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("failed to open pty: {0}")]
    PtyOpen(#[source] io::Error),

    #[error("failed to spawn child command: {0}")]
    Spawn(#[source] io::Error),

    #[error("pty write failed: {0}")]
    Write(#[source] io::Error),

    #[error("pty resize failed: {0}")]
    Resize(#[source] io::Error),

    #[error("failed to wait for child: {0}")]
    Wait(#[source] io::Error),

    #[error("child exited with status {0}")]
    ChildExited(i32),
}

pub type Result<T> = std::result::Result<T, TermError>;
