//! External command invocation
//!
//! The version, publish, and formatter commands all come from config as
//! plain strings ("npx changeset version"). They are split on whitespace;
//! commands needing shell features should be wrapped in a script.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, instrument};

use crate::error::CommandError;

/// Result type for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

/// Captured output of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or(CommandError::Empty)?;
    Ok((program, parts.collect()))
}

/// Check that a configured command's program can be found on PATH
pub fn command_available(command: &str) -> bool {
    match split_command(command) {
        Ok((program, _)) => which::which(&program).is_ok(),
        Err(_) => false,
    }
}

/// Run a configured command in `cwd`, capturing output.
///
/// A non-zero exit status is an error carrying the captured stderr.
#[instrument(fields(command, cwd = %cwd.display()))]
pub fn run_command(command: &str, cwd: &Path) -> Result<CommandOutput> {
    let (program, args) = split_command(command)?;

    let start = std::time::Instant::now();
    let output = Command::new(&program)
        .args(&args)
        .current_dir(cwd)
        .output()
        .map_err(|e| CommandError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;

    let stdout = String::from_utf8(output.stdout)
        .map_err(|_| CommandError::InvalidOutput(command.to_string()))?;
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    info!(
        command,
        success = output.status.success(),
        duration_ms = start.elapsed().as_millis(),
        "command finished"
    );

    if !output.status.success() {
        return Err(CommandError::NonZero {
            command: command.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

/// Run a configured command feeding `input` on stdin and capturing stdout.
///
/// Used for external formatters that work as stdin/stdout filters.
#[instrument(skip(input), fields(command, cwd = %cwd.display(), input_len = input.len()))]
pub fn run_command_with_stdin(command: &str, cwd: &Path, input: &str) -> Result<CommandOutput> {
    let (program, args) = split_command(command)?;

    let mut child = Command::new(&program)
        .args(&args)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CommandError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .map_err(|e| CommandError::SpawnFailed {
                command: command.to_string(),
                source: e,
            })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| CommandError::SpawnFailed {
            command: command.to_string(),
            source: e,
        })?;

    let stdout = String::from_utf8(output.stdout)
        .map_err(|_| CommandError::InvalidOutput(command.to_string()))?;
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    debug!(
        command,
        success = output.status.success(),
        output_len = stdout.len(),
        "filter command finished"
    );

    if !output.status.success() {
        return Err(CommandError::NonZero {
            command: command.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_command_captures_stdout() {
        let temp = TempDir::new().unwrap();
        let output = run_command("echo hello", temp.path()).unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn test_run_command_nonzero() {
        let temp = TempDir::new().unwrap();
        let result = run_command("false", temp.path());
        assert!(matches!(result, Err(CommandError::NonZero { .. })));
    }

    #[test]
    fn test_run_missing_command() {
        let temp = TempDir::new().unwrap();
        let result = run_command("definitely-not-a-real-binary-xyz", temp.path());
        assert!(matches!(result, Err(CommandError::SpawnFailed { .. })));
    }

    #[test]
    fn test_empty_command() {
        let temp = TempDir::new().unwrap();
        let result = run_command("   ", temp.path());
        assert!(matches!(result, Err(CommandError::Empty)));
    }

    #[test]
    fn test_stdin_filter() {
        let temp = TempDir::new().unwrap();
        let output = run_command_with_stdin("cat", temp.path(), "piped text").unwrap();
        assert_eq!(output.stdout, "piped text");
    }

    #[test]
    fn test_command_available() {
        assert!(command_available("echo hi"));
        assert!(!command_available("definitely-not-a-real-binary-xyz"));
        assert!(!command_available(""));
    }
}
