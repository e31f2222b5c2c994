//! Installing this binary as the repository's `commit-msg` hook.

use crate::git::{GitError, VersionControlGateway};
use crate::log_debug;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name git looks for in the hooks directory
pub const HOOK_NAME: &str = "commit-msg";

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("Could not locate the hooks directory: {0}")]
    HooksDir(#[source] GitError),
    #[error("Could not resolve the path of this executable: {0}")]
    CurrentExe(#[source] io::Error),
    #[error("Failed to install hook at {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// Exit code to report; a failing git lookup passes its own code through
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::HooksDir(e) => e
                .exit_code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            Self::CurrentExe(_) | Self::Copy { .. } => 1,
        }
    }
}

/// Absolute, symlink-free path of the running executable
pub fn executable_path() -> Result<PathBuf, InstallError> {
    env::current_exe()
        .and_then(fs::canonicalize)
        .map_err(InstallError::CurrentExe)
}

/// Copies the running executable into the repository's hooks directory.
///
/// Returns the path of the installed hook. An existing `commit-msg` hook is
/// replaced.
pub fn install_hook(gateway: &impl VersionControlGateway) -> Result<PathBuf, InstallError> {
    let source = executable_path()?;
    install_hook_from(gateway, &source)
}

/// Like [`install_hook`], copying `source` instead of the running binary.
pub fn install_hook_from(
    gateway: &impl VersionControlGateway,
    source: &Path,
) -> Result<PathBuf, InstallError> {
    let hooks_dir = gateway.hooks_directory().map_err(InstallError::HooksDir)?;
    let hook_path = hooks_dir.join(HOOK_NAME);
    log_debug!("Installing {} to {}", source.display(), hook_path.display());

    let copy_err = |err: io::Error| InstallError::Copy {
        path: hook_path.clone(),
        source: err,
    };

    fs::create_dir_all(&hooks_dir).map_err(copy_err)?;
    if hook_path.exists() {
        log_debug!("Replacing existing hook at {}", hook_path.display());
    }
    fs::copy(source, &hook_path).map_err(copy_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&hook_path).map_err(copy_err)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms).map_err(copy_err)?;
    }

    Ok(hook_path)
}
