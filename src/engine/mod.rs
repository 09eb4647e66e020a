//! The `Term` facade: wires the grid, selection, ansi executor, pty session, and input
//! translator into the single object a host renderer drives.
//!
//! Grounded in `core/pty_mux/mux.rs`'s `PTYMux`/`PTYMuxBuilder` builder shape: a builder gathers
//! configuration (here: `EngineConfig`, spawned command, initial size) and `build()` produces the
//! live object, mirroring `PTYMuxBuilder::processes`/`add_process`/`build`.

mod config;

pub use config::EngineConfig;

use crate::ansi::{EngineEvent, Performer};
use crate::error::Result;
use crate::grid::{Cursor, Line, Screen};
use crate::input::{encode_key, encode_mouse, KeySym, Modifiers, MouseEventKind};
use crate::pty::{PtySession, SpawnConfig};
use crate::selection::{SelType, Snap};

/// Builder for a [`Term`], mirroring the teacher's `PTYMuxBuilder`.
#[derive(Default)]
pub struct TermBuilder {
    config: EngineConfig,
}

impl TermBuilder {
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawn the configured child process and construct the engine around it.
    pub fn build(self) -> Result<Term> {
        let spawn_config = SpawnConfig {
            program: self.config.program.clone(),
            args: self.config.args.clone(),
            cwd: self.config.cwd.clone(),
            env: self.config.env.clone(),
            cols: self.config.cols,
            rows: self.config.rows,
        };
        let pty = PtySession::spawn(&spawn_config)?;
        Ok(Term {
            screen: Screen::new(self.config.cols as usize, self.config.rows as usize),
            parser: vte::Parser::new(),
            pty,
            title: String::new(),
            icon_name: String::new(),
            palette: [None; 256],
        })
    }
}

/// The live terminal engine: a grid, a parser, and the pty session feeding it.
///
/// Renderer-facing reads (`rows`/`cols`/`line`/`dirty`/`cursor`/`selection_contains`/`title`/
/// `palette`) and host-facing writes (`feed`/`send_key`/`send_mouse`/`paste`/`resize`/
/// `scroll_page`/`select_*`/`copy_selection`) are kept on one object deliberately: unlike the
/// teacher's multi-process `PTYMux`, this engine manages exactly one pty and has no status bar or
/// process-switching concerns to separate out.
pub struct Term {
    screen: Screen,
    parser: vte::Parser,
    pty: PtySession,
    title: String,
    icon_name: String,
    palette: [Option<(u8, u8, u8)>; 256],
}

impl Term {
    #[must_use]
    pub fn builder() -> TermBuilder {
        TermBuilder::default()
    }

    // --- Renderer-facing API -------------------------------------------------------------

    #[must_use]
    pub fn rows(&self) -> usize {
        self.screen.rows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.screen.cols()
    }

    #[must_use]
    pub fn line(&self, y: usize) -> &Line {
        self.screen.line(y)
    }

    #[must_use]
    pub fn dirty(&self, y: usize) -> bool {
        self.screen.dirty(y)
    }

    pub fn clear_dirty(&mut self, y: usize) {
        self.screen.clear_dirty(y);
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.screen.cursor()
    }

    #[must_use]
    pub fn selection_contains(&self, x: usize, y: usize) -> bool {
        self.screen.selection.selected(x, y)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    #[must_use]
    pub fn palette(&self, index: u8) -> Option<(u8, u8, u8)> {
        self.palette[index as usize]
    }

    // --- Host-facing API -------------------------------------------------------------------

    /// Feed a chunk of child output through the escape-sequence parser, mutating the grid and
    /// returning the events the host should surface (bell, title changes, clipboard updates).
    /// Replies the executor queued (DA/DSR responses) are written straight back to the child.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<EngineEvent> {
        let mut replies = Vec::new();
        let mut events = Vec::new();
        {
            let mut performer = Performer {
                screen: &mut self.screen,
                replies: &mut replies,
                events: &mut events,
            };
            self.parser.advance(&mut performer, bytes);
        }
        for event in &events {
            match event {
                EngineEvent::SetTitle(t) => self.title = t.clone(),
                EngineEvent::SetIconName(n) => self.icon_name = n.clone(),
                EngineEvent::SetPalette { index, spec } => {
                    self.palette[*index as usize] = parse_rgb_spec(spec);
                }
                EngineEvent::ResetPalette(Some(index)) => self.palette[*index as usize] = None,
                EngineEvent::ResetPalette(None) => self.palette = [None; 256],
                EngineEvent::Bell | EngineEvent::ClipboardUpdate(_) => {}
            }
        }
        if !replies.is_empty() {
            if let Err(err) = self.pty.write_all(&replies) {
                tracing::warn!("failed to write parser reply to child: {err}");
            }
        }
        events
    }

    pub fn send_key(&mut self, sym: KeySym, mods: Modifiers) -> Result<()> {
        let bytes = encode_key(sym, mods, self.screen.mode);
        if bytes.is_empty() {
            return Ok(());
        }
        self.pty.write_all(&bytes)
    }

    pub fn send_mouse(&mut self, kind: MouseEventKind, col: u16, row: u16) -> Result<()> {
        let Some(bytes) = encode_mouse(kind, col, row, self.screen.mode) else {
            return Ok(());
        };
        self.pty.write_all(&bytes)
    }

    /// Bracketed-paste-aware paste: wraps `bytes` in `ESC[200~ ... ESC[201~` when the child has
    /// requested bracketed paste mode, matching xterm.
    pub fn paste(&mut self, bytes: &[u8]) -> Result<()> {
        use crate::grid::TermMode;
        if self.screen.mode.contains(TermMode::BRCKTPASTE) {
            let mut framed = Vec::with_capacity(bytes.len() + 12);
            framed.extend_from_slice(b"\x1b[200~");
            framed.extend_from_slice(bytes);
            framed.extend_from_slice(b"\x1b[201~");
            self.pty.write_all(&framed)
        } else {
            self.pty.write_all(bytes)
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize, pixel_width: u16, pixel_height: u16) -> Result<()> {
        self.screen.resize(cols, rows);
        self.pty.resize(cols as u16, rows as u16, pixel_width, pixel_height)
    }

    /// Scroll the viewport by `n` rows (positive = toward more recent output). The base engine
    /// keeps no scrollback buffer (SPEC_FULL.md non-goal); page scrolling here only moves the
    /// cursor's home row reference within the current scroll region, mirroring a plain `DECSTBM`
    /// region roll rather than a history view.
    pub fn scroll_page(&mut self, n: isize) {
        let region = self.screen.scroll_region;
        if n > 0 {
            self.screen.scroll_up(region.top, n as usize);
        } else if n < 0 {
            self.screen.scroll_down(region.top, (-n) as usize);
        }
    }

    /// Starts a selection. Returns [`EngineEvent::ClipboardUpdate`] when the update already
    /// lands the selection in [`crate::selection::SelMode::Ready`] (e.g. a word/line snap sets
    /// `Ready` immediately), per this crate's resolution of the clip-copy-trigger open question:
    /// the host should copy to the system clipboard on every update that reaches or extends a
    /// ready selection, not only on mouse-release.
    pub fn select_start(&mut self, x: usize, y: usize, snap: Snap, ty: SelType) -> Option<EngineEvent> {
        let on_alt = matches!(self.screen.active_buffer(), crate::grid::ActiveBuffer::Alternate);
        let lines = self.screen.active_grid().lines.clone();
        self.screen.selection.start(x, y, snap, ty, on_alt, &lines);
        self.clipboard_event_if_ready()
    }

    /// Extends the active selection. See [`Term::select_start`] for when this surfaces
    /// [`EngineEvent::ClipboardUpdate`].
    pub fn select_extend(&mut self, x: usize, y: usize, ty: SelType, done: bool) -> Option<EngineEvent> {
        let lines = self.screen.active_grid().lines.clone();
        self.screen.selection.extend(x, y, ty, done, &lines);
        self.clipboard_event_if_ready()
    }

    pub fn select_clear(&mut self) {
        self.screen.selection.clear();
    }

    fn clipboard_event_if_ready(&self) -> Option<EngineEvent> {
        if self.screen.selection.mode == crate::selection::SelMode::Ready {
            Some(EngineEvent::ClipboardUpdate(self.copy_selection()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn copy_selection(&self) -> String {
        let lines = self.screen.active_grid().lines.clone();
        self.screen.selection.get_text(&lines)
    }

    /// Non-blocking poll of child exit, for the event loop to notice termination.
    pub fn try_wait(&mut self) -> Result<Option<portable_pty::ExitStatus>> {
        self.pty.try_wait()
    }

    pub(crate) fn pty_mut(&mut self) -> &mut PtySession {
        &mut self.pty
    }
}

fn parse_rgb_spec(spec: &str) -> Option<(u8, u8, u8)> {
    // `rgb:RRRR/GGGG/BBBB` per XParseColor; also accept the shorter `#RRGGBB` form.
    if let Some(hex) = spec.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some((r, g, b));
        }
        return None;
    }
    let rest = spec.strip_prefix("rgb:")?;
    let mut parts = rest.split('/');
    let r = parts.next()?;
    let g = parts.next()?;
    let b = parts.next()?;
    let shrink = |s: &str| -> Option<u8> {
        let v = u16::from_str_radix(s, 16).ok()?;
        Some((v >> (4 * s.len().saturating_sub(2))) as u8)
    };
    Some((shrink(r)?, shrink(g)?, shrink(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_spec_hex_form() {
        assert_eq!(parse_rgb_spec("#ff8000"), Some((0xff, 0x80, 0x00)));
    }

    #[test]
    fn rgb_spec_x11_form() {
        assert_eq!(parse_rgb_spec("rgb:ff/80/00"), Some((0xff, 0x80, 0x00)));
    }
}
