// Git module providing the version control seam used by the hook

mod gateway;
mod repository;
mod utils;

pub use gateway::{GitError, VersionControlGateway};
pub use repository::GitRepo;
pub use utils::run_git_command;
