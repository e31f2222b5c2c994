//! git-ticket - a git `commit-msg` hook that adds ticket ids to commit messages
//!
//! The ticket id (`ABC-123`) is taken from the current branch name and spliced
//! into the first line of the message, in the bracket style and position set
//! in git config. Messages that already mention the ticket are left alone.

#![allow(clippy::uninlined_format_args)] // Style preference

pub mod cli;
pub mod common;
pub mod config;
pub mod format;
pub mod git;
pub mod hook;
pub mod install;
pub mod logger;
pub mod ticket;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::{BracketStyle, ContextPosition, HookConfig};
pub use git::{GitRepo, VersionControlGateway};
pub use hook::{HookOutcome, SkipReason, rewrite_message, run_commit_msg_hook};
pub use ticket::{TicketId, extract_ticket};
