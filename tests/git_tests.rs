use anyhow::Result;
use git_ticket::git::{GitError, VersionControlGateway, run_git_command};

use test_utils::{GitTestHelper, setup_git_repo, setup_temp_dir, setup_unborn_repo};

#[test]
fn test_current_branch_on_main() -> Result<()> {
    let (_temp_dir, git_repo) = setup_git_repo();
    assert_eq!(git_repo.current_branch()?.as_deref(), Some("main"));
    Ok(())
}

#[test]
fn test_current_branch_keeps_slashes() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let helper = GitTestHelper::new(&temp_dir)?;
    helper.checkout_new_branch("feature/ABC-123-login")?;

    assert_eq!(
        git_repo.current_branch()?.as_deref(),
        Some("feature/ABC-123-login")
    );
    Ok(())
}

#[test]
fn test_current_branch_detached_head_is_none() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let helper = GitTestHelper::new(&temp_dir)?;
    helper.detach_head()?;

    assert_eq!(git_repo.current_branch()?, None);
    Ok(())
}

#[test]
fn test_current_branch_before_first_commit() -> Result<()> {
    let (_temp_dir, git_repo) = setup_unborn_repo("feature/XYZ-9-bootstrap");
    assert_eq!(
        git_repo.current_branch()?.as_deref(),
        Some("feature/XYZ-9-bootstrap")
    );
    Ok(())
}

#[test]
fn test_current_branch_from_subdirectory() -> Result<()> {
    let (temp_dir, _) = setup_git_repo();
    let helper = GitTestHelper::new(&temp_dir)?;
    helper.checkout_new_branch("ABC-1")?;
    let nested = temp_dir.path().join("src/deep");
    std::fs::create_dir_all(&nested)?;

    let git_repo = git_ticket::GitRepo::new(&nested);
    assert_eq!(git_repo.current_branch()?.as_deref(), Some("ABC-1"));
    Ok(())
}

#[test]
fn test_current_branch_outside_repository_fails() {
    let (_temp_dir, git_repo) = setup_temp_dir();
    assert!(matches!(
        git_repo.current_branch(),
        Err(GitError::Repository(_))
    ));
}

#[test]
fn test_config_value_lookup() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let helper = GitTestHelper::new(&temp_dir)?;

    assert_eq!(git_repo.config_value("ticket.bracketStyle")?, None);

    helper.set_config("ticket.bracketStyle", "curly")?;
    assert_eq!(
        git_repo.config_value("ticket.bracketStyle")?.as_deref(),
        Some("curly")
    );
    Ok(())
}

#[test]
fn test_set_config_value_writes_local_config() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    git_repo.set_config_value("ticket.contextPosition", "start")?;

    let helper = GitTestHelper::new(&temp_dir)?;
    let local = std::fs::read_to_string(helper.git_dir().join("config"))?;
    assert!(local.contains("[ticket]"));
    assert!(local.contains("contextPosition = start"));
    assert_eq!(
        git_repo.config_value("ticket.contextPosition")?.as_deref(),
        Some("start")
    );
    Ok(())
}

#[test]
fn test_hooks_directory_default() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let hooks = git_repo.hooks_directory()?;

    let expected = temp_dir.path().join(".git").join("hooks");
    assert_eq!(hooks.canonicalize().ok(), expected.canonicalize().ok());
    assert!(hooks.ends_with(".git/hooks"));
    Ok(())
}

#[test]
fn test_hooks_directory_honours_hooks_path() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let helper = GitTestHelper::new(&temp_dir)?;
    helper.set_config("core.hooksPath", ".githooks")?;

    let hooks = git_repo.hooks_directory()?;
    assert!(hooks.ends_with(".githooks"), "got {}", hooks.display());
    Ok(())
}

#[test]
fn test_hooks_directory_outside_repository_reports_exit_code() {
    let (_temp_dir, git_repo) = setup_temp_dir();
    let err = git_repo
        .hooks_directory()
        .expect_err("no repository to ask");
    assert!(matches!(err, GitError::CommandFailed { .. }));
    assert_eq!(err.exit_code(), Some(128));
}

#[test]
fn test_run_git_command_trims_output() -> Result<()> {
    let (temp_dir, _) = setup_git_repo();
    let out = run_git_command(&["rev-parse", "--abbrev-ref", "HEAD"], temp_dir.path())?;
    assert_eq!(out, "main");
    Ok(())
}
