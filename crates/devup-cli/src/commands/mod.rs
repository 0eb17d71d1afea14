pub mod doctor;
pub mod up;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "devup",
    version,
    about = "Launch the backend agent and frontend dev server, each in its own terminal window"
)]
pub struct Cli {
    // A bare `devup` (no subcommand) launches the servers.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the backend and frontend dev servers (the default)
    Up,
    /// Check project layout, config, and required tooling
    Doctor,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Up) {
        Commands::Up => up::run(),
        Commands::Doctor => doctor::run(),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "devup", &mut std::io::stdout());
            Ok(())
        }
    }
}
