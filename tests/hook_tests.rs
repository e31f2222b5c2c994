use anyhow::Result;
use git_ticket::config::{BRACKET_STYLE_KEY, CONTEXT_POSITION_KEY};
use git_ticket::hook::FatalReason;
use git_ticket::{HookOutcome, SkipReason, run_commit_msg_hook};
use std::fs;

use test_utils::{
    GitTestHelper, setup_git_repo, setup_temp_dir, setup_unborn_repo, write_message_file,
};

#[test]
fn test_ticket_added_after_colon_by_default() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    GitTestHelper::new(&temp_dir)?.checkout_new_branch("feature/ABC-123-login")?;
    let message_file = write_message_file(&temp_dir, "fix: broken login\n");

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert!(matches!(outcome, HookOutcome::Modified { .. }));
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(
        fs::read_to_string(&message_file)?,
        "fix: [ABC-123] broken login\n"
    );
    Ok(())
}

#[test]
fn test_main_branch_leaves_message_alone() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let message_file = write_message_file(&temp_dir, "fix: broken login\n");

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(outcome, HookOutcome::Unchanged(SkipReason::NoTicket));
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(fs::read_to_string(&message_file)?, "fix: broken login\n");
    Ok(())
}

#[test]
fn test_start_position_round_brackets_from_git_config() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    let helper = GitTestHelper::new(&temp_dir)?;
    helper.checkout_new_branch("ABC-7")?;
    helper.set_config(CONTEXT_POSITION_KEY, "start")?;
    helper.set_config(BRACKET_STYLE_KEY, "round")?;
    let message_file = write_message_file(&temp_dir, "initial commit");

    run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(fs::read_to_string(&message_file)?, "(ABC-7) initial commit");
    Ok(())
}

#[test]
fn test_message_already_mentioning_ticket_is_untouched() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    GitTestHelper::new(&temp_dir)?.checkout_new_branch("ABC-7")?;
    let message_file = write_message_file(&temp_dir, "ABC-7: fix\n");

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(outcome, HookOutcome::Unchanged(SkipReason::AlreadyPresent));
    assert_eq!(fs::read_to_string(&message_file)?, "ABC-7: fix\n");
    Ok(())
}

#[test]
fn test_empty_message_fails_without_touching_file() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    GitTestHelper::new(&temp_dir)?.checkout_new_branch("X-1")?;
    let message_file = write_message_file(&temp_dir, "");

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(outcome, HookOutcome::Fatal(FatalReason::EmptyMessage));
    assert_ne!(outcome.exit_code(), 0);
    assert_eq!(fs::read_to_string(&message_file)?, "");
    Ok(())
}

#[test]
fn test_running_twice_is_idempotent() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    GitTestHelper::new(&temp_dir)?.checkout_new_branch("bugfix/proj-88-crash")?;
    let message_file =
        write_message_file(&temp_dir, "fix(parser): crash on empty input\n\nDetails: here\n");

    run_commit_msg_hook(&git_repo, &message_file)?;
    let once = fs::read_to_string(&message_file)?;
    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;
    let twice = fs::read_to_string(&message_file)?;

    assert_eq!(
        once,
        "fix(parser): [PROJ-88] crash on empty input\n\nDetails: here\n"
    );
    assert_eq!(once, twice);
    assert_eq!(outcome, HookOutcome::Unchanged(SkipReason::AlreadyPresent));
    Ok(())
}

#[test]
fn test_detached_head_leaves_message_alone() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    GitTestHelper::new(&temp_dir)?.detach_head()?;
    let message_file = write_message_file(&temp_dir, "fix: thing\n");

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(outcome, HookOutcome::Unchanged(SkipReason::NoBranch));
    assert_eq!(fs::read_to_string(&message_file)?, "fix: thing\n");
    Ok(())
}

#[test]
fn test_first_commit_on_unborn_branch() -> Result<()> {
    let (temp_dir, git_repo) = setup_unborn_repo("ABC-1-bootstrap");
    let message_file = write_message_file(&temp_dir, "chore: bootstrap\n");

    run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(
        fs::read_to_string(&message_file)?,
        "chore: [ABC-1] bootstrap\n"
    );
    Ok(())
}

#[test]
fn test_outside_repository_is_a_no_op() -> Result<()> {
    let (temp_dir, git_repo) = setup_temp_dir();
    let message_file = write_message_file(&temp_dir, "fix: thing\n");

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(outcome, HookOutcome::Unchanged(SkipReason::NoBranch));
    Ok(())
}

#[test]
fn test_non_utf8_message_is_kept_byte_for_byte() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    GitTestHelper::new(&temp_dir)?.checkout_new_branch("ABC-1")?;
    let message_file = temp_dir.path().join("COMMIT_EDITMSG");
    let latin1 = b"fix: caf\xe9 menu\n";
    fs::write(&message_file, latin1)?;

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(outcome, HookOutcome::Unchanged(SkipReason::NotUtf8));
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(fs::read(&message_file)?, latin1);
    Ok(())
}

#[test]
fn test_non_utf8_message_without_subject_is_still_fatal() -> Result<()> {
    let (temp_dir, git_repo) = setup_git_repo();
    GitTestHelper::new(&temp_dir)?.checkout_new_branch("ABC-1")?;
    let message_file = temp_dir.path().join("COMMIT_EDITMSG");
    fs::write(&message_file, b"\nbody caf\xe9\n")?;

    let outcome = run_commit_msg_hook(&git_repo, &message_file)?;

    assert_eq!(outcome, HookOutcome::Fatal(FatalReason::EmptyMessage));
    Ok(())
}

#[test]
fn test_missing_message_file_is_an_error() {
    let (temp_dir, git_repo) = setup_git_repo();
    let missing = temp_dir.path().join("does-not-exist");
    let err = run_commit_msg_hook(&git_repo, &missing).expect_err("file is missing");
    assert!(err.to_string().contains("Failed to read commit message"));
}
