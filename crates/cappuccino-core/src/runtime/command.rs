//! Child process execution for `exec` entries and git

use crate::error::{EngineError, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Split a command line on whitespace into program and arguments.
/// No shell quoting is interpreted.
pub fn split_command(command_line: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Run `command_line` inside `dir` and wait for it to exit.
///
/// Non-zero exit is an error carrying the captured stderr. With no `limit`
/// the call waits as long as the child runs.
pub async fn run_command(
    dir: &Path,
    command_line: &str,
    limit: Option<Duration>,
) -> Result<CommandOutput> {
    let (program, args) =
        split_command(command_line).ok_or_else(|| EngineError::Spawn {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        })?;

    run(dir, program, &args, limit).await
}

/// Run `program` with `args` inside `dir`
pub async fn run(
    dir: &Path,
    program: &str,
    args: &[&str],
    limit: Option<Duration>,
) -> Result<CommandOutput> {
    let label = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %label, dir = %dir.display(), "spawning");

    let child = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| EngineError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let waited = match limit {
        Some(limit) => match timeout(limit, child.wait_with_output()).await {
            Ok(waited) => waited,
            // Dropping the future drops the child, which kills it
            Err(_) => {
                return Err(EngineError::Timeout {
                    command: label,
                    timeout: limit,
                })
            }
        },
        None => child.wait_with_output().await,
    };

    let output = waited.map_err(|source| EngineError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !stdout.trim().is_empty() {
        debug!(command = %label, "{}", stdout.trim_end());
    }

    if !output.status.success() {
        return Err(EngineError::CommandFailed {
            command: label,
            code: output.status.code(),
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}
