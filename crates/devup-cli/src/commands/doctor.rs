use anyhow::Result;
use colored::Colorize;
use devup_core::config::{split_command, LaunchConfig};
use std::path::Path;
use std::process::Command;

struct CheckResult {
    passed: bool,
    message: String,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

fn check_config_file(root: &Path) -> CheckResult {
    let path = root.join("devup.toml");
    if !path.exists() {
        return CheckResult::pass("devup.toml not found (using defaults)");
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match content.parse::<toml::Table>() {
            Ok(_) => CheckResult::pass("devup.toml found and valid"),
            Err(e) => CheckResult::fail(format!("devup.toml has invalid TOML: {}", e)),
        },
        Err(e) => CheckResult::fail(format!("devup.toml unreadable: {}", e)),
    }
}

fn check_service_dir(label: &str, dir: &Path) -> CheckResult {
    if dir.is_dir() {
        CheckResult::pass(format!("{} directory found ({})", label, dir.display()))
    } else {
        CheckResult::fail(format!("{} directory missing: {}", label, dir.display()))
    }
}

/// The program a service command starts with must be on PATH, otherwise the
/// launch will open a window that dies immediately.
fn check_command_tool(label: &str, command: &str) -> CheckResult {
    let Some((program, _)) = split_command(command) else {
        return CheckResult::fail(format!("{} command is empty", label));
    };
    match Command::new(&program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let short = version.split_whitespace().last().unwrap_or(&version);
            CheckResult::pass(format!("{} ({})", program, short))
        }
        Ok(_) => CheckResult::fail(format!("{} found but returned an error", program)),
        Err(_) => CheckResult::fail(format!(
            "{} not found on PATH (needed by the {} command)",
            program, label
        )),
    }
}

fn check_frontend_deps(dir: &Path) -> CheckResult {
    if !dir.join("package.json").exists() {
        return CheckResult::fail("frontend/package.json not found");
    }
    if dir.join("node_modules").exists() {
        CheckResult::pass("frontend dependencies installed")
    } else {
        CheckResult::fail("node_modules not found (run: cd frontend && npm install)")
    }
}

pub fn run() -> Result<()> {
    let root = std::env::current_dir()?;
    let config = LaunchConfig::resolve(&root)?;

    println!("{}", "Devup Doctor".bold());
    println!();

    println!("{}", "Project Layout".bold().underline());
    let layout_checks = vec![
        check_config_file(&root),
        check_service_dir("backend", &config.backend.dir),
        check_service_dir("frontend", &config.frontend.dir),
        check_frontend_deps(&config.frontend.dir),
    ];
    print_checks(&layout_checks);

    println!();
    println!("{}", "Tools".bold().underline());
    let tool_checks = vec![
        check_command_tool("backend", &config.backend.command),
        check_command_tool("frontend", &config.frontend.command),
    ];
    print_checks(&tool_checks);

    let all_checks: Vec<&CheckResult> = layout_checks.iter().chain(tool_checks.iter()).collect();
    let total = all_checks.len();
    let passed = all_checks.iter().filter(|c| c.passed).count();
    let failed = total - passed;

    println!();
    let summary = format!("{}/{} checks passed", passed, total);
    if failed == 0 {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.yellow().bold());
        println!(
            "{}",
            format!("{} issue(s) found — see above for details", failed).yellow()
        );
    }

    Ok(())
}

fn print_checks(checks: &[CheckResult]) {
    for check in checks {
        if check.passed {
            println!("  {} {}", "\u{2713}".green(), check.message);
        } else {
            println!("  {} {}", "\u{2717}".red(), check.message);
        }
    }
}
