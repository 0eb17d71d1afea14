use colored::Colorize;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::terminal;

/// Everything needed to start one child: where, what, and a label for
/// status output and window titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub label: String,
    /// Working directory; must exist at spawn time.
    pub dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

impl SpawnRequest {
    /// The command as a single shell line, for terminal emulators that take
    /// a command string rather than an argv.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Reference to a spawned child. The launcher records these but never waits
/// on or kills them; the processes belong to the user once started. When a
/// terminal emulator wraps the command, `pid` is the emulator's pid.
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    pub label: String,
    pub dir: PathBuf,
    pub pid: Option<u32>,
}

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("{label} command is empty")]
    EmptyCommand { label: String },
    #[error("{label} directory not found: {dir}")]
    MissingDirectory { label: String, dir: PathBuf },
    #[error("failed to start {label}: {source}")]
    Io {
        label: String,
        #[source]
        source: std::io::Error,
    },
}

/// Seam between the launch sequence and the operating system. Tests use a
/// recording implementation; production code uses [`TerminalSpawner`].
pub trait Spawner {
    fn spawn(&mut self, req: &SpawnRequest) -> Result<ProcessHandle, SpawnError>;
}

/// Spawns each request in a new terminal window, detached, so the child
/// keeps running after `devup` exits. Falls back to a windowless detached
/// spawn when no terminal emulator can be found.
#[derive(Debug, Default)]
pub struct TerminalSpawner;

impl TerminalSpawner {
    pub fn new() -> Self {
        Self
    }
}

impl Spawner for TerminalSpawner {
    fn spawn(&mut self, req: &SpawnRequest) -> Result<ProcessHandle, SpawnError> {
        let io_err = |source| SpawnError::Io {
            label: req.label.clone(),
            source,
        };

        let child = match terminal::session_command(req) {
            Some((program, args)) => Command::new(program)
                .args(args)
                .current_dir(&req.dir)
                .spawn()
                .map_err(io_err)?,
            None => {
                println!(
                    "  {} no terminal emulator found; running {} without a window",
                    "warn".yellow(),
                    req.label
                );
                Command::new(&req.program)
                    .args(&req.args)
                    .current_dir(&req.dir)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map_err(io_err)?
            }
        };

        Ok(ProcessHandle {
            label: req.label.clone(),
            dir: req.dir.clone(),
            pid: Some(child.id()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SpawnRequest {
        SpawnRequest {
            label: "backend".to_string(),
            dir: PathBuf::from("/tmp/app/backend"),
            program: "uv".to_string(),
            args: vec!["run".to_string(), "src/agent.py".to_string(), "dev".to_string()],
        }
    }

    #[test]
    fn command_line_joins_program_and_args() {
        assert_eq!(request().command_line(), "uv run src/agent.py dev");
    }

    #[test]
    fn command_line_bare_program() {
        let mut req = request();
        req.args.clear();
        assert_eq!(req.command_line(), "uv");
    }

    #[test]
    fn spawn_error_mentions_label_and_dir() {
        let err = SpawnError::MissingDirectory {
            label: "frontend".to_string(),
            dir: PathBuf::from("/tmp/app/frontend"),
        };
        let msg = err.to_string();
        assert!(msg.contains("frontend"));
        assert!(msg.contains("/tmp/app/frontend"));
    }
}
