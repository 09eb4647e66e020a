//! The cooperative `tokio::select!` loop that multiplexes child output, host input, and the
//! periodic ticks a host renderer needs to notice dirty rows even when the child is quiet.
//!
//! Grounded directly in `core/pty_mux/mux.rs::run_event_loop`: a blocking-reader task bridges the
//! synchronous pty read (`core/pty/spawn_pty_read_channel.rs`'s `spawn_blocking` pattern) into an
//! unbounded channel, and the main loop's `tokio::select!` races that channel against host input
//! and two `tokio::time::interval` tickers, the same shape as the teacher's
//! `output_poll_interval`/`status_bar_interval` pair.

use std::io::Read;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::ansi::EngineEvent;
use crate::engine::Term;
use crate::error::Result;
use crate::input::{KeySym, Modifiers, MouseEventKind};

/// One tick of host-originated input, handed to the loop by whatever owns the terminal UI.
pub enum HostInput {
    Key(KeySym, Modifiers),
    Mouse(MouseEventKind, u16, u16),
    Paste(Vec<u8>),
    Resize(usize, usize, u16, u16),
}

/// What the loop surfaces back to the host each iteration it has something to report.
pub enum LoopEvent {
    /// Raw bytes as read from the child, handed over before parsing so a host with no
    /// grid-aware renderer can still mirror the byte stream directly.
    RawOutput(Vec<u8>),
    /// At least one row is dirty; the host should redraw and call `Term::clear_dirty`.
    NeedsRedraw,
    Engine(EngineEvent),
    ChildExited(Option<i32>),
}

const READ_CHANNEL_CAPACITY_HINT: usize = 64;
const DRAW_TICK: Duration = Duration::from_millis(16);
const BLINK_TICK: Duration = Duration::from_millis(500);

/// Spawn the blocking reader task that feeds raw child output into an unbounded channel.
/// Mirrors the teacher's reader task: synchronous `read()` in a loop, `Ok(0)` or `Err` ends it.
fn spawn_reader_task(mut reader: Box<dyn Read + Send>) -> UnboundedReceiver<Vec<u8>> {
    let (tx, rx): (UnboundedSender<Vec<u8>>, _) = unbounded_channel();
    tokio::task::spawn_blocking(move || {
        let mut buf = vec![0u8; crate::pty::READ_BUFFER_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Run the engine until the child exits or `host_input` closes, calling `on_event` for each
/// redraw/event/exit notification. `host_input` is owned by the caller (typically fed from a
/// separate task reading the host's actual keyboard/mouse device).
pub async fn run(
    term: &mut Term,
    mut host_input: UnboundedReceiver<HostInput>,
    mut on_event: impl FnMut(LoopEvent),
) -> Result<()> {
    let reader = term.pty_mut().try_clone_reader()?;
    let mut output_rx = spawn_reader_task(reader);

    let mut draw_interval = tokio::time::interval(DRAW_TICK);
    let mut blink_interval = tokio::time::interval(BLINK_TICK);
    let _ = READ_CHANNEL_CAPACITY_HINT;

    loop {
        tokio::select! {
            chunk = output_rx.recv() => {
                match chunk {
                    Some(bytes) => {
                        on_event(LoopEvent::RawOutput(bytes.clone()));
                        for event in term.feed(&bytes) {
                            on_event(LoopEvent::Engine(event));
                        }
                        on_event(LoopEvent::NeedsRedraw);
                    }
                    None => {
                        let status = term.try_wait()?;
                        on_event(LoopEvent::ChildExited(status.map(|s| s.exit_code() as i32)));
                        return Ok(());
                    }
                }
            }

            Some(input) = host_input.recv() => {
                match input {
                    HostInput::Key(sym, mods) => term.send_key(sym, mods)?,
                    HostInput::Mouse(kind, col, row) => term.send_mouse(kind, col, row)?,
                    HostInput::Paste(bytes) => term.paste(&bytes)?,
                    HostInput::Resize(cols, rows, pw, ph) => term.resize(cols, rows, pw, ph)?,
                }
            }

            _ = draw_interval.tick() => {
                on_event(LoopEvent::NeedsRedraw);
            }

            _ = blink_interval.tick() => {
                // Blink-phase toggling is a host rendering concern (the grid stores no blink
                // phase itself); this tick just gives the host a cadence to flip it on.
                on_event(LoopEvent::NeedsRedraw);
            }
        }

        if let Some(status) = term.try_wait()? {
            on_event(LoopEvent::ChildExited(Some(status.exit_code() as i32)));
            return Ok(());
        }
    }
}
