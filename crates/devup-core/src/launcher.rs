//! The launch sequence: backend first, a fixed head start, then frontend.
//!
//! Strictly linear — one path, no retries, no readiness probing. The delay
//! is a best-effort ordering aid, not a guarantee that the backend is
//! reachable when the frontend starts. Spawned children are fire-and-forget:
//! the user stops them by closing their terminal windows.

use colored::Colorize;

use crate::config::LaunchConfig;
use crate::spawn::{ProcessHandle, SpawnError, SpawnRequest, Spawner};

/// Start both dev servers and return their handles. A backend spawn failure
/// propagates immediately; the frontend is never attempted in that case.
pub fn launch(
    config: &LaunchConfig,
    spawner: &mut dyn Spawner,
) -> Result<Vec<ProcessHandle>, SpawnError> {
    println!("{}", "Starting development servers...".bold());

    let backend = config.backend_request()?;
    ensure_dir_exists(&backend)?;
    println!(
        "  {} {} ({})",
        "spawn".green(),
        backend.label,
        backend.command_line()
    );
    let backend_handle = spawner.spawn(&backend)?;

    // Give the backend a head start before the frontend tries to reach it.
    std::thread::sleep(config.launcher.delay());

    let frontend = config.frontend_request()?;
    ensure_dir_exists(&frontend)?;
    println!(
        "  {} {} ({})",
        "spawn".green(),
        frontend.label,
        frontend.command_line()
    );
    let frontend_handle = spawner.spawn(&frontend)?;

    println!();
    println!("{}", "Both servers are starting in their own windows.".green().bold());
    println!("  Open {} once the frontend is ready.", config.frontend.url.cyan());
    println!("  To stop the servers, close their terminal windows.");

    Ok(vec![backend_handle, frontend_handle])
}

fn ensure_dir_exists(req: &SpawnRequest) -> Result<(), SpawnError> {
    if req.dir.is_dir() {
        Ok(())
    } else {
        Err(SpawnError::MissingDirectory {
            label: req.label.clone(),
            dir: req.dir.clone(),
        })
    }
}
