//! Shared subprocess plumbing for the command-backed adapters.

use std::process::Command;

use crate::domain::AppError;

/// Run a command and return trimmed stdout, mapping spawn failures and
/// non-zero exits to `AppError::Command` with the command line and stderr.
pub(crate) fn run(program: &str, args: &[&str], envs: &[(&str, &str)]) -> Result<String, AppError> {
    let rendered = render_command(program, args);

    let mut command = Command::new(program);
    command.args(args);
    for (key, value) in envs {
        command.env(key, value);
    }

    let output = command
        .output()
        .map_err(|e| AppError::Command { command: rendered.clone(), details: e.to_string() })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AppError::Command {
            command: rendered,
            details: if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a command, caring only about success.
pub(crate) fn succeeds(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let output = run("echo", &["hello"], &[]).unwrap();
        assert_eq!(output, "hello");
    }

    #[test]
    fn missing_program_reports_command_line() {
        let err = run("hostup-no-such-program", &["--flag"], &[]).unwrap_err();
        match err {
            AppError::Command { command, .. } => {
                assert_eq!(command, "hostup-no-such-program --flag");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nonzero_exit_carries_stderr() {
        let err = run("sh", &["-c", "echo boom >&2; exit 3"], &[]).unwrap_err();
        match err {
            AppError::Command { details, .. } => assert_eq!(details, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn succeeds_reflects_exit_status() {
        assert!(succeeds("true", &[]));
        assert!(!succeeds("false", &[]));
        assert!(!succeeds("hostup-no-such-program", &[]));
    }
}
