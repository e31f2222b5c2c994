use crate::git::gateway::{GitError, VersionControlGateway};
use crate::git::utils::run_git_command;
use crate::log_debug;
use anyhow::{Context, Result};
use git2::{ConfigLevel, ErrorCode, Repository};
use std::env;
use std::path::{Path, PathBuf};

/// Represents a Git repository and provides methods for interacting with it.
#[derive(Debug, Clone)]
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Creates a new `GitRepo` for the repository containing `repo_path`.
    pub fn new(repo_path: &Path) -> Self {
        Self {
            repo_path: repo_path.to_path_buf(),
        }
    }

    /// Creates a `GitRepo` for the current working directory, which is where
    /// git runs its hooks from.
    pub fn from_current_dir() -> Result<Self> {
        let current_dir = env::current_dir().context("Failed to read current directory")?;
        Ok(Self::new(&current_dir))
    }

    /// Open the repository, searching upwards from the stored path
    pub fn open_repo(&self) -> Result<Repository, git2::Error> {
        Repository::discover(&self.repo_path)
    }

    /// Returns the repository path
    pub fn repo_path(&self) -> &PathBuf {
        &self.repo_path
    }

    /// Writes `key` to the repository-local git config.
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), GitError> {
        let repo = self.open_repo()?;
        let mut config = repo.config()?.open_level(ConfigLevel::Local)?;
        config.set_str(key, value)?;
        log_debug!("Set {} = {}", key, value);
        Ok(())
    }
}

impl VersionControlGateway for GitRepo {
    fn current_branch(&self) -> Result<Option<String>, GitError> {
        let repo = self.open_repo()?;

        if repo.head_detached()? {
            log_debug!("HEAD is detached");
            return Ok(None);
        }

        let branch = match repo.head() {
            Ok(head) => head.shorthand().map(str::to_string),
            // No commits yet: HEAD still names the branch it will create
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = repo.find_reference("HEAD")?;
                head.symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string)
            }
            Err(e) => return Err(e.into()),
        };

        log_debug!("Current branch: {:?}", branch);
        Ok(branch)
    }

    fn config_value(&self, key: &str) -> Result<Option<String>, GitError> {
        let repo = self.open_repo()?;
        let config = repo.config()?;
        match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn hooks_directory(&self) -> Result<PathBuf, GitError> {
        // Asking git itself honours core.hooksPath and worktrees
        let hooks = run_git_command(&["rev-parse", "--git-path", "hooks"], &self.repo_path)?;
        Ok(self.repo_path.join(hooks))
    }
}
