//! The `commit-msg` pipeline: branch → ticket → config → rewritten message.
//!
//! Every stage returns a value instead of exiting, and only the top-level
//! [`HookOutcome`] decides the process exit code.

use crate::config::HookConfig;
use crate::format::apply;
use crate::git::VersionControlGateway;
use crate::ticket::{TicketId, extract_ticket};
use crate::{log_debug, log_warn};

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

/// Why the hook left the message alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Detached HEAD, or the branch could not be read
    NoBranch,
    /// The branch name holds no ticket id
    NoTicket,
    /// The first line already mentions the ticket
    AlreadyPresent,
    /// The configured position needs a colon and the first line has none
    NoInsertionPoint,
    /// The message file is not UTF-8, so its bytes are kept as they are
    NotUtf8,
}

/// Why the hook must reject the commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    EmptyMessage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoBranch => "no current branch",
            Self::NoTicket => "no ticket id in branch name",
            Self::AlreadyPresent => "ticket id already in message",
            Self::NoInsertionPoint => "no colon in first line",
            Self::NotUtf8 => "message is not valid UTF-8",
        })
    }
}

impl fmt::Display for FatalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => f.write_str("commit message is empty"),
        }
    }
}

/// Result of one hook run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Modified { ticket: TicketId, content: String },
    Unchanged(SkipReason),
    Fatal(FatalReason),
}

impl HookOutcome {
    /// Process exit code for this outcome; only fatal outcomes fail
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Modified { .. } | Self::Unchanged(_) => 0,
            Self::Fatal(_) => 1,
        }
    }
}

/// A commit message split into the editable subject line and the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    first_line: String,
    /// Everything from the first line terminator on, verbatim
    rest: String,
}

impl CommitMessage {
    pub fn parse(content: &str) -> Self {
        let end = content.find('\n').unwrap_or(content.len());
        let first = &content[..end];
        // a CRLF terminator stays with the rest
        let first_line = first.strip_suffix('\r').unwrap_or(first);
        Self {
            first_line: first_line.to_string(),
            rest: content[first_line.len()..].to_string(),
        }
    }

    pub fn first_line(&self) -> &str {
        &self.first_line
    }

    pub fn with_first_line(&self, first_line: String) -> Self {
        Self {
            first_line,
            rest: self.rest.clone(),
        }
    }

    /// Reassembles the full message text
    pub fn to_content(&self) -> String {
        format!("{}{}", self.first_line, self.rest)
    }
}

/// Decides whether and how to rewrite `content`, without touching the disk.
pub fn rewrite_message(content: &str, gateway: &impl VersionControlGateway) -> HookOutcome {
    let message = CommitMessage::parse(content);
    if message.first_line().is_empty() {
        return HookOutcome::Fatal(FatalReason::EmptyMessage);
    }

    let branch = match gateway.current_branch() {
        Ok(Some(branch)) => branch,
        Ok(None) => {
            log_debug!("No branch checked out, leaving message alone");
            return HookOutcome::Unchanged(SkipReason::NoBranch);
        }
        Err(e) => {
            log_warn!("Could not determine current branch: {}", e);
            return HookOutcome::Unchanged(SkipReason::NoBranch);
        }
    };

    let Some(ticket) = extract_ticket(&branch) else {
        log_debug!("Branch '{}' has no ticket id", branch);
        return HookOutcome::Unchanged(SkipReason::NoTicket);
    };

    if ticket.is_mentioned_in(message.first_line()) {
        log_debug!("Message already mentions {}", ticket);
        return HookOutcome::Unchanged(SkipReason::AlreadyPresent);
    }

    let config = HookConfig::resolve(gateway);
    let first_line = apply(
        &ticket,
        message.first_line(),
        config.context_position,
        config.bracket_style,
    );
    if first_line == message.first_line() {
        log_debug!("No place to insert {} in '{}'", ticket, first_line);
        return HookOutcome::Unchanged(SkipReason::NoInsertionPoint);
    }
    log_debug!("Rewrote subject to: {}", first_line);

    HookOutcome::Modified {
        content: message.with_first_line(first_line).to_content(),
        ticket,
    }
}

/// Runs the hook against the message file git handed us.
///
/// The file is only rewritten for [`HookOutcome::Modified`]. I/O failures
/// are errors; everything else is reported through the outcome. A message in
/// another encoding is never rewritten, but an empty one is still rejected.
pub fn run_commit_msg_hook(
    gateway: &impl VersionControlGateway,
    message_file: &Path,
) -> Result<HookOutcome> {
    let _span = tracing::debug_span!("commit_msg_hook", file = %message_file.display()).entered();

    let bytes = fs::read(message_file)
        .with_context(|| format!("Failed to read commit message from {}", message_file.display()))?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            let lossy = String::from_utf8_lossy(e.as_bytes());
            if CommitMessage::parse(&lossy).first_line().is_empty() {
                return Ok(HookOutcome::Fatal(FatalReason::EmptyMessage));
            }
            log_warn!(
                "Commit message in {} is not valid UTF-8, leaving it alone",
                message_file.display()
            );
            return Ok(HookOutcome::Unchanged(SkipReason::NotUtf8));
        }
    };

    let outcome = rewrite_message(&content, gateway);
    if let HookOutcome::Modified { content, ticket } = &outcome {
        fs::write(message_file, content).with_context(|| {
            format!("Failed to write commit message to {}", message_file.display())
        })?;
        tracing::debug!(%ticket, "commit message updated");
    }

    Ok(outcome)
}
