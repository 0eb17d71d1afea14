use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::spawn::{SpawnError, SpawnRequest};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Directory of the backend agent, relative to the project root
    /// until [`LaunchConfig::resolve`] makes it absolute.
    #[serde(default = "default_backend_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_backend_command")]
    pub command: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            dir: default_backend_dir(),
            command: default_backend_command(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_frontend_command")]
    pub command: String,
    /// Address printed in the completion message once both servers are up.
    #[serde(default = "default_frontend_url")]
    pub url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: default_frontend_dir(),
            command: default_frontend_command(),
            url: default_frontend_url(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Head start given to the backend before the frontend is spawned.
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
        }
    }
}

impl LauncherConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

fn default_backend_dir() -> PathBuf {
    PathBuf::from("backend")
}

fn default_backend_command() -> String {
    "uv run src/agent.py dev".to_string()
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_frontend_command() -> String {
    "npm run dev".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_delay_secs() -> u64 {
    3
}

impl LaunchConfig {
    /// Load `devup.toml` from the project root. Errors if the file is missing.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("devup.toml");
        let content = std::fs::read_to_string(&path)?;
        let config: LaunchConfig = toml::from_str(&content)?;
        config.resolved(root)
    }

    /// Build the config for a project root: defaults, overridden by
    /// `devup.toml` when it exists. A missing file is not an error (launching
    /// is zero-config); a malformed one is.
    pub fn resolve(root: &Path) -> Result<Self> {
        let path = root.join("devup.toml");
        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            LaunchConfig::default()
        };
        config.resolved(root)
    }

    /// Anchor relative directories at the project root and validate the
    /// command lines, so everything downstream works on absolute paths.
    fn resolved(mut self, root: &Path) -> Result<Self> {
        if self.backend.dir.is_relative() {
            self.backend.dir = root.join(&self.backend.dir);
        }
        if self.frontend.dir.is_relative() {
            self.frontend.dir = root.join(&self.frontend.dir);
        }
        if split_command(&self.backend.command).is_none() {
            anyhow::bail!("backend command is empty in devup.toml");
        }
        if split_command(&self.frontend.command).is_none() {
            anyhow::bail!("frontend command is empty in devup.toml");
        }
        Ok(self)
    }

    pub fn backend_request(&self) -> Result<SpawnRequest, SpawnError> {
        request("backend", &self.backend.dir, &self.backend.command)
    }

    pub fn frontend_request(&self) -> Result<SpawnRequest, SpawnError> {
        request("frontend", &self.frontend.dir, &self.frontend.command)
    }
}

/// `resolved()` rejects empty commands in loaded configs, but the fields are
/// public, so a hand-built config is re-checked here rather than trusted.
fn request(label: &str, dir: &Path, command: &str) -> Result<SpawnRequest, SpawnError> {
    let (program, args) = split_command(command).ok_or_else(|| SpawnError::EmptyCommand {
        label: label.to_string(),
    })?;
    Ok(SpawnRequest {
        label: label.to_string(),
        dir: dir.to_path_buf(),
        program,
        args,
    })
}

/// Split a command line on whitespace into program + args.
/// Returns None for an empty/blank command. Quoting is not supported;
/// commands with spaces in arguments belong in a wrapper script.
pub fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}
