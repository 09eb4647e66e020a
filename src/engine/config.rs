use std::path::PathBuf;

/// Everything the engine needs to spawn its child and initialize its grid, gathered by the CLI
/// binary from `clap` arguments and passed in by value. The engine itself never reads environment
/// variables or files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    pub cols: u16,
    pub rows: u16,
    /// Reply string for the primary Device Attributes report (`ESC[?...c`); overridable so a host
    /// can masquerade as a specific terminal type.
    pub vtiden: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_shell(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            cols: 80,
            rows: 24,
            vtiden: "\x1b[?62;1;6c".to_string(),
        }
    }
}

fn default_shell() -> String {
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}
