use anyhow::Result;
use devup_core::config::LaunchConfig;
use devup_core::{launcher, TerminalSpawner};

pub fn run() -> Result<()> {
    let root = std::env::current_dir()?;
    let config = LaunchConfig::resolve(&root)?;

    let mut spawner = TerminalSpawner::new();
    launcher::launch(&config, &mut spawner)?;

    Ok(())
}
