//! Splicing a ticket id into the first line of a commit message.

use crate::config::{BracketStyle, ContextPosition};
use crate::ticket::TicketId;

/// Wraps the ticket id in the delimiters of `style`.
pub fn bracketize(ticket: &TicketId, style: BracketStyle) -> String {
    let (open, close) = style.delimiters();
    format!("{open}{ticket}{close}")
}

/// Inserts the bracketed ticket into `line` at `position`.
///
/// For the colon positions, a line without a colon comes back untouched.
/// Whitespace around the insertion point collapses to single spaces; every
/// other character of `line` is kept as is.
pub fn apply(
    ticket: &TicketId,
    line: &str,
    position: ContextPosition,
    style: BracketStyle,
) -> String {
    let context = bracketize(ticket, style);

    let index = match (position, line.find(':')) {
        (ContextPosition::Start, _) => return format!("{context} {line}"),
        (_, None) => return line.to_string(),
        (ContextPosition::BeforeColon, Some(colon)) => colon,
        (ContextPosition::AfterColon, Some(colon)) => colon + ':'.len_utf8(),
    };

    let (head, tail) = line.split_at(index);
    let separator = if position == ContextPosition::AfterColon {
        " "
    } else {
        ""
    };
    format!(
        "{} {context}{separator}{}",
        head.trim_end(),
        tail.trim_start()
    )
}
