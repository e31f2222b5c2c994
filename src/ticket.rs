//! Ticket id extraction from branch names.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// ASCII word characters, a hyphen, then digits. `ABC-123`, `proj_x-7`.
static TICKET_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+-[0-9]+").ok());

/// An issue tracker reference such as `ABC-123`, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `line` already references this ticket, ignoring case.
    ///
    /// This is the rule the hook uses to stay idempotent across amends.
    pub fn is_mentioned_in(&self, line: &str) -> bool {
        line.to_ascii_uppercase().contains(&self.0)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pulls the first ticket id out of a branch name.
///
/// `feature/abc-123-login` yields `ABC-123`. Branches like `main` or
/// `develop` yield `None`, which callers treat as "nothing to do".
pub fn extract_ticket(branch_name: &str) -> Option<TicketId> {
    let pattern = TICKET_PATTERN.as_ref()?;
    pattern
        .find(branch_name)
        .map(|m| TicketId(m.as_str().to_ascii_uppercase()))
}
