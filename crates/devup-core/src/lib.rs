//! Core library for `devup`: launch a project's backend agent and frontend
//! dev server in separate terminal windows, backend first.
//!
//! The CLI crate is a thin clap wrapper around [`launcher::launch`], which
//! takes an explicit [`config::LaunchConfig`] and a [`spawn::Spawner`]
//! implementation. Production code uses [`spawn::TerminalSpawner`]; tests
//! substitute a recording spawner.

pub mod config;
pub mod launcher;
pub mod spawn;

mod terminal;

pub use config::LaunchConfig;
pub use spawn::{ProcessHandle, SpawnError, SpawnRequest, Spawner, TerminalSpawner};
