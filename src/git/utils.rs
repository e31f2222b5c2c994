use std::path::Path;
use std::process::Command;

use super::gateway::GitError;
use crate::log_debug;

/// Executes a git command in `cwd` and returns its trimmed stdout.
///
/// A non-zero exit is reported as [`GitError::CommandFailed`] carrying the
/// process exit code, so callers can hand it back to their own caller.
pub fn run_git_command(args: &[&str], cwd: &Path) -> Result<String, GitError> {
    let command = args.join(" ");
    log_debug!("Running git {} in {}", command, cwd.display());

    let output = Command::new("git").args(args).current_dir(cwd).output()?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command,
            // killed by a signal
            code: output.status.code().unwrap_or(1),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| GitError::InvalidOutput(command))?;

    Ok(stdout.trim().to_string())
}
