//! Thin pass-through CLI binary: parses the platform-glue flag set, forks the requested command
//! behind a pty, and bridges stdin/stdout to it. Rendering stays outside the engine's contract
//! (the binary mirrors raw child output directly rather than painting from the grid), exactly
//! like a plain pty proxy; a real terminal emulator front end would instead poll [`vt_engine::Term`]
//! for dirty rows and paint them.
//!
//! CLI surface and grounded in the teacher's `clap`-derived binaries (e.g.
//! `r3bl-build-infra/src/cargo_rustdoc_fmt/cli_arg.rs`'s `#[derive(Parser)]` struct shape).

use std::io::Write;
use std::os::unix::io::AsRawFd;

use clap::Parser;
use miette::IntoDiagnostic;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc::unbounded_channel;

use vt_engine::event_loop::{self, HostInput, LoopEvent};
use vt_engine::input::{KeySym, Modifiers};
use vt_engine::{EngineConfig, Term};

/// Pass-through terminal engine host: runs a command behind a pty.
#[derive(Debug, Parser)]
#[command(name = "vt_engine", version, about = "A standalone VT100-compatible pty host")]
#[allow(dead_code)]
struct CliArgs {
    /// Start in 8-bit control-sequence mode (historical `-a`, accepted and ignored: the engine
    /// always accepts both 7-bit and 8-bit forms).
    #[arg(short = 'a')]
    eight_bit: bool,

    /// Window class (platform glue only, not part of the engine's contract).
    #[arg(short = 'c', value_name = "CLASS")]
    class: Option<String>,

    /// Font name (platform glue only).
    #[arg(short = 'f', value_name = "FONT")]
    font: Option<String>,

    /// Window geometry `COLSxROWS` (platform glue only; overrides default size).
    #[arg(short = 'g', value_name = "GEOMETRY")]
    geometry: Option<String>,

    /// Fixed-size window hint (platform glue only, ignored).
    #[arg(short = 'i')]
    fixed_geometry: bool,

    /// Write all child output to this file in addition to stdout.
    #[arg(short = 'o', value_name = "FILE")]
    output_log: Option<std::path::PathBuf>,

    /// Use this device instead of a pty-spawned child (not supported by this host; rejected).
    #[arg(short = 'l', value_name = "LINE")]
    line: Option<String>,

    /// Window/session name (platform glue only).
    #[arg(short = 'n', value_name = "NAME")]
    name: Option<String>,

    /// Initial window title (platform glue only).
    #[arg(short = 't', value_name = "TITLE")]
    title: Option<String>,

    /// Icon title (platform glue only).
    #[arg(short = 'T', value_name = "ICON_TITLE")]
    icon_title: Option<String>,

    /// Embed into this X window id (platform glue only, ignored).
    #[arg(short = 'w', value_name = "WINDOWID")]
    window_id: Option<String>,

    /// Print version and exit (handled by `--version`; `-v` kept for compatibility).
    #[arg(short = 'v')]
    version_flag: bool,

    /// Command to run and its arguments, after `-e`.
    #[arg(short = 'e', num_args = 0.., trailing_var_arg = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();

    if args.line.is_some() {
        miette::bail!("-l (serial line) is not supported by this host");
    }

    let (program, prog_args) = match args.command.split_first() {
        Some((program, rest)) => (program.clone(), rest.to_vec()),
        None => (std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string()), Vec::new()),
    };

    let (cols, rows) = args
        .geometry
        .as_deref()
        .and_then(parse_geometry)
        .unwrap_or((80, 24));

    let config = EngineConfig {
        program,
        args: prog_args,
        cols,
        rows,
        ..EngineConfig::default()
    };
    if let Some(title) = &args.title {
        tracing::debug!("requested initial title: {title}");
    }

    let mut term = Term::builder().config(config).build().into_diagnostic()?;

    let mut output_log = match &args.output_log {
        Some(path) => Some(std::fs::File::create(path).into_diagnostic()?),
        None => None,
    };

    let _raw_mode = RawModeGuard::enable().into_diagnostic()?;

    let (input_tx, input_rx) = unbounded_channel();
    tokio::spawn(async move {
        let mut stdin = tokio::io::stdin();
        let mut buf = [0u8; 256];
        loop {
            match stdin.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    for &byte in &buf[..n] {
                        if let Some(sym) = byte_to_keysym(byte) {
                            if input_tx.send(HostInput::Key(sym, Modifiers::default())).is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        }
    });

    let mut stdout = std::io::stdout();
    event_loop::run(&mut term, input_rx, |event| match event {
        LoopEvent::RawOutput(bytes) => {
            let _ = stdout.write_all(&bytes);
            let _ = stdout.flush();
            if let Some(file) = output_log.as_mut() {
                let _ = file.write_all(&bytes);
            }
        }
        LoopEvent::Engine(_) | LoopEvent::NeedsRedraw => {}
        LoopEvent::ChildExited(code) => {
            tracing::info!("child exited with status {:?}", code);
        }
    })
    .await
    .into_diagnostic()?;

    Ok(())
}

/// A byte from a raw-mode stdin read is already the exact byte to forward; wrapping it in
/// `KeySym::Char` (for printable bytes) keeps this host going through the same key-encoding path
/// as a structured keyboard event would, at the cost of re-deriving control bytes for the common
/// case. Non-UTF8-leading control bytes are forwarded by wrapping them as a synthetic character.
fn byte_to_keysym(byte: u8) -> Option<KeySym> {
    Some(KeySym::Char(byte as char))
}

/// `rustix`-backed raw mode, grounded in
/// `core/ansi/terminal_raw_mode/raw_mode_unix.rs`'s hand-rolled `cfmakeraw()` flag set (rustix's
/// termios binding has no `cfmakeraw` convenience itself): disables canonical mode, echo, and
/// signal generation so the child, not the local shell, sees each keystroke.
struct RawModeGuard {
    fd: std::os::unix::io::RawFd,
    original: rustix::termios::Termios,
}

impl RawModeGuard {
    fn enable() -> std::io::Result<Self> {
        use rustix::termios::{ControlModes, InputModes, LocalModes, OptionalActions, OutputModes, SpecialCodeIndex};

        let stdin = std::io::stdin();
        let fd = stdin.as_raw_fd();
        let original = rustix::termios::tcgetattr(&stdin)
            .map_err(|e| std::io::Error::from_raw_os_error(e.raw_os_error()))?;
        let mut raw = original.clone();

        raw.input_modes.remove(
            InputModes::IGNBRK
                | InputModes::BRKINT
                | InputModes::PARMRK
                | InputModes::ISTRIP
                | InputModes::INLCR
                | InputModes::IGNCR
                | InputModes::ICRNL
                | InputModes::IXON,
        );
        raw.output_modes.remove(OutputModes::OPOST);
        raw.local_modes.remove(
            LocalModes::ECHO | LocalModes::ECHONL | LocalModes::ICANON | LocalModes::ISIG | LocalModes::IEXTEN,
        );
        raw.control_modes.remove(ControlModes::CSIZE | ControlModes::PARENB);
        raw.control_modes.insert(ControlModes::CS8);
        raw.special_codes[SpecialCodeIndex::VMIN] = 1;
        raw.special_codes[SpecialCodeIndex::VTIME] = 0;

        rustix::termios::tcsetattr(&stdin, OptionalActions::Flush, &raw)
            .map_err(|e| std::io::Error::from_raw_os_error(e.raw_os_error()))?;
        Ok(Self { fd, original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Safety: `fd` is stdin's fd, open for the guard's whole lifetime.
        let stdin = unsafe { std::os::unix::io::BorrowedFd::borrow_raw(self.fd) };
        let _ = rustix::termios::tcsetattr(
            stdin,
            rustix::termios::OptionalActions::Flush,
            &self.original,
        );
    }
}

fn parse_geometry(geometry: &str) -> Option<(u16, u16)> {
    let (cols, rows) = geometry.split_once('x')?;
    Some((cols.parse().ok()?, rows.parse().ok()?))
}
