use std::path::PathBuf;

/// Errors raised while talking to git
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error(transparent)]
    Repository(#[from] git2::Error),
    #[error("Failed to execute git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git {command} failed with exit code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
    #[error("Invalid UTF-8 output from git {0}")]
    InvalidOutput(String),
}

impl GitError {
    /// Exit code of the failed git process, if one ran
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// The few questions the hook asks of version control.
///
/// Everything in the ticket pipeline goes through this trait, so the core
/// logic runs against an in-memory double in tests.
pub trait VersionControlGateway {
    /// Name of the checked-out branch, `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>, GitError>;

    /// Repository-scoped config lookup, `None` when the key is unset
    fn config_value(&self, key: &str) -> Result<Option<String>, GitError>;

    /// Directory git runs hooks from
    fn hooks_directory(&self) -> Result<PathBuf, GitError>;
}
