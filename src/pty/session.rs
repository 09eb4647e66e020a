use std::io::{Read, Write};

use portable_pty::{native_pty_system, CommandBuilder, Child, MasterPty, PtySize};

use crate::error::{Result, TermError};

use super::WRITE_CHUNK_SIZE;

/// What to spawn and the initial geometry, injected by the CLI binary (configuration stays an
/// external value per SPEC_FULL.md §10.3; this engine never reads env vars itself beyond what it
/// explicitly sets for the child below).
pub struct SpawnConfig {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<std::path::PathBuf>,
    pub env: Vec<(String, String)>,
    pub cols: u16,
    pub rows: u16,
}

/// One pty-attached child process: the master handle, a writer to the pty, and the child handle.
/// Reading happens through a cloned reader handle (see [`PtySession::try_clone_reader`]) on the
/// event loop's own blocking task, not through this struct directly.
pub struct PtySession {
    master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    child: Box<dyn Child + Send + Sync>,
}

impl PtySession {
    pub fn spawn(config: &SpawnConfig) -> Result<Self> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: config.rows,
                cols: config.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| TermError::PtyOpen(std::io::Error::other(e)))?;

        let mut cmd = CommandBuilder::new(&config.program);
        cmd.args(&config.args);
        if let Some(cwd) = &config.cwd {
            cmd.cwd(cwd);
        }
        for (k, v) in &config.env {
            cmd.env(k, v);
        }
        // Mirrors SPEC_FULL.md §4.F's child-side environment contract.
        cmd.env("TERM", "xterm-256color");

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| TermError::Spawn(std::io::Error::other(e)))?;
        drop(pair.slave);

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| TermError::PtyOpen(std::io::Error::other(e)))?;

        Ok(Self {
            master: pair.master,
            writer,
            child,
        })
    }

    /// Write `bytes` in chunks no larger than [`WRITE_CHUNK_SIZE`], looping until the whole
    /// buffer is flushed. `std::io::Write` on the pty writer already blocks until each `write`
    /// call accepts some bytes, so no separate `select`-on-writability step is needed here.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        for chunk in bytes.chunks(WRITE_CHUNK_SIZE) {
            self.writer.write_all(chunk).map_err(TermError::Write)?;
        }
        self.writer.flush().map_err(TermError::Write)
    }

    pub fn resize(&mut self, cols: u16, rows: u16, pixel_width: u16, pixel_height: u16) -> Result<()> {
        self.master
            .resize(PtySize {
                rows,
                cols,
                pixel_width,
                pixel_height,
            })
            .map_err(|e| TermError::Resize(std::io::Error::other(e)))
    }

    /// Non-blocking poll of whether the child has exited, returning its status if so.
    pub fn try_wait(&mut self) -> Result<Option<portable_pty::ExitStatus>> {
        self.child.try_wait().map_err(TermError::Wait)
    }

    /// A second, independent reader handle onto the master side, for the event loop's blocking
    /// reader task. Mirrors the teacher's `try_clone_reader` use in its own reader task.
    pub fn try_clone_reader(&self) -> Result<Box<dyn Read + Send>> {
        self.master
            .try_clone_reader()
            .map_err(|e| TermError::PtyOpen(std::io::Error::other(e)))
    }

    pub fn kill(&mut self) -> Result<()> {
        self.child.kill().map_err(TermError::Wait)
    }
}
