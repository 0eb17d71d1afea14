//! Platform-specific construction of the "open a new terminal window and run
//! this command in this directory" invocation.

use crate::spawn::SpawnRequest;

/// Program + args that open a new terminal session for the request, or None
/// when the platform offers no terminal emulator (caller falls back to a
/// windowless detached spawn). The returned command is run with the
/// request's directory as its working directory.
#[cfg(windows)]
pub(crate) fn session_command(req: &SpawnRequest) -> Option<(String, Vec<String>)> {
    // `start` opens a new console window titled with the label; `cmd /K`
    // keeps the window open after the command exits so errors stay visible.
    Some((
        "cmd".to_string(),
        vec![
            "/C".to_string(),
            "start".to_string(),
            format!("devup {}", req.label),
            "cmd".to_string(),
            "/K".to_string(),
            req.command_line(),
        ],
    ))
}

#[cfg(target_os = "macos")]
pub(crate) fn session_command(req: &SpawnRequest) -> Option<(String, Vec<String>)> {
    // The shell sees the directory first, AppleScript the whole script:
    // quote for the shell, then escape for AppleScript.
    let shell_line = format!(
        "cd {} && {}",
        shell_quote(&req.dir.to_string_lossy()),
        req.command_line()
    );
    let script = format!(
        "tell application \"Terminal\" to do script \"{}\"",
        applescript_escape(&shell_line),
    );
    Some(("osascript".to_string(), vec!["-e".to_string(), script]))
}

#[cfg(target_os = "macos")]
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Single-quote a string for `sh -c`, escaping embedded apostrophes, so
/// paths with spaces or quotes survive the `cd`.
#[cfg(not(windows))]
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(not(any(windows, target_os = "macos")))]
pub(crate) fn session_command(req: &SpawnRequest) -> Option<(String, Vec<String>)> {
    // $TERMINAL first (user preference), then the common emulators.
    if let Ok(term) = std::env::var("TERMINAL") {
        if !term.is_empty() && find_on_path(&term).is_some() {
            return Some((term.clone(), emulator_args(&term, req)));
        }
    }
    for candidate in [
        "x-terminal-emulator",
        "gnome-terminal",
        "konsole",
        "xfce4-terminal",
        "xterm",
    ] {
        if find_on_path(candidate).is_some() {
            return Some((candidate.to_string(), emulator_args(candidate, req)));
        }
    }
    None
}

/// Arg shape per emulator. Emulators that can set a working directory get
/// the native flag; the rest get a `cd` inside `sh -c`.
#[cfg(not(any(windows, target_os = "macos")))]
fn emulator_args(emulator: &str, req: &SpawnRequest) -> Vec<String> {
    let dir = req.dir.to_string_lossy().to_string();
    let cmd = req.command_line();
    match emulator {
        "gnome-terminal" => vec![
            "--working-directory".to_string(),
            dir,
            "--".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            cmd,
        ],
        "konsole" => vec![
            "--workdir".to_string(),
            dir,
            "-e".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            cmd,
        ],
        "xfce4-terminal" => vec![
            "--working-directory".to_string(),
            dir,
            "-x".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            cmd,
        ],
        "xterm" => vec![
            "-T".to_string(),
            format!("devup {}", req.label),
            "-e".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            format!("cd {} && {}", shell_quote(&dir), cmd),
        ],
        _ => vec![
            "-e".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            format!("cd {} && {}", shell_quote(&dir), cmd),
        ],
    }
}

#[cfg(not(any(windows, target_os = "macos")))]
fn find_on_path(program: &str) -> Option<std::path::PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

#[cfg(all(test, not(any(windows, target_os = "macos"))))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> SpawnRequest {
        SpawnRequest {
            label: "frontend".to_string(),
            dir: PathBuf::from("/home/dev/app/frontend"),
            program: "npm".to_string(),
            args: vec!["run".to_string(), "dev".to_string()],
        }
    }

    #[test]
    fn gnome_terminal_uses_working_directory_flag() {
        let args = emulator_args("gnome-terminal", &request());
        assert_eq!(args[0], "--working-directory");
        assert_eq!(args[1], "/home/dev/app/frontend");
        assert_eq!(args.last().unwrap(), "npm run dev");
    }

    #[test]
    fn konsole_uses_workdir_flag() {
        let args = emulator_args("konsole", &request());
        assert_eq!(args[0], "--workdir");
        assert!(args.contains(&"-e".to_string()));
    }

    #[test]
    fn xterm_cds_inside_shell() {
        let args = emulator_args("xterm", &request());
        let script = args.last().unwrap();
        assert!(script.starts_with("cd '/home/dev/app/frontend' && "));
        assert!(script.ends_with("npm run dev"));
    }

    #[test]
    fn xterm_quotes_dirs_with_spaces() {
        let mut req = request();
        req.dir = PathBuf::from("/home/dev/my projects/frontend");
        let args = emulator_args("xterm", &req);
        let script = args.last().unwrap();
        assert!(script.starts_with("cd '/home/dev/my projects/frontend' && "));
    }

    #[test]
    fn shell_quote_plain_path() {
        assert_eq!(shell_quote("/home/dev/app"), "'/home/dev/app'");
    }

    #[test]
    fn shell_quote_escapes_apostrophes() {
        // sh sees: 'it' \' 's-mine' concatenated back into it's-mine
        assert_eq!(shell_quote("/home/x/it's-mine"), r"'/home/x/it'\''s-mine'");
    }

    #[test]
    fn generic_emulator_survives_apostrophe_in_dir() {
        let mut req = request();
        req.dir = PathBuf::from("/home/x/it's-mine/frontend");
        let args = emulator_args("footerm", &req);
        let script = args.last().unwrap();
        assert!(script.starts_with(r"cd '/home/x/it'\''s-mine/frontend' && "));
        assert!(script.ends_with("npm run dev"));
    }

    #[test]
    fn unknown_emulator_gets_generic_shape() {
        let args = emulator_args("footerm", &request());
        assert_eq!(args[0], "-e");
        assert!(args.last().unwrap().contains("npm run dev"));
    }

    #[test]
    fn find_on_path_locates_sh() {
        // sh exists on any unix-like CI box
        assert!(find_on_path("sh").is_some());
    }

    #[test]
    fn find_on_path_misses_nonsense() {
        assert!(find_on_path("devup-no-such-binary-xyz").is_none());
    }
}
