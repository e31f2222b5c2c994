//! Hook configuration: bracket style and insertion position.
//!
//! Values live in git's own config store under the `ticket` section, so they
//! can be set per repository (`git config ticket.bracketStyle round`) or
//! globally. Anything missing, empty or unrecognized falls back to the
//! defaults below.

use crate::git::VersionControlGateway;
use crate::{log_debug, log_warn};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Git config key for [`BracketStyle`]
pub const BRACKET_STYLE_KEY: &str = "ticket.bracketStyle";
/// Git config key for [`ContextPosition`]
pub const CONTEXT_POSITION_KEY: &str = "ticket.contextPosition";

/// Delimiters wrapped around the ticket id when it is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStyle {
    None,
    Round,
    #[default]
    Square,
    Curly,
}

impl BracketStyle {
    pub const ALL: &'static [BracketStyle] = &[Self::None, Self::Round, Self::Square, Self::Curly];

    /// Name as written in git config and on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Round => "round",
            Self::Square => "square",
            Self::Curly => "curly",
        }
    }

    /// Opening and closing delimiter, empty for [`BracketStyle::None`]
    pub const fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            Self::None => ("", ""),
            Self::Round => ("(", ")"),
            Self::Square => ("[", "]"),
            Self::Curly => ("{", "}"),
        }
    }

    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

/// Where the ticket id goes on the first line of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextPosition {
    /// In front of everything
    Start,
    /// Right before the first colon: `fix [ABC-1]: message`
    BeforeColon,
    /// Right after the first colon: `fix: [ABC-1] message`
    #[default]
    AfterColon,
}

impl ContextPosition {
    pub const ALL: &'static [ContextPosition] =
        &[Self::Start, Self::BeforeColon, Self::AfterColon];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::BeforeColon => "before_colon",
            Self::AfterColon => "after_colon",
        }
    }

    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

/// A config value that names no known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValueError {
    #[error("Unknown bracket style: '{0}'. Supported: none, round, square, curly")]
    BracketStyle(String),
    #[error("Unknown context position: '{0}'. Supported: start, before_colon, after_colon")]
    ContextPosition(String),
}

impl FromStr for BracketStyle {
    type Err = ConfigValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|style| style.name() == s)
            .copied()
            .ok_or_else(|| ConfigValueError::BracketStyle(s.to_string()))
    }
}

impl FromStr for ContextPosition {
    type Err = ConfigValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|position| position.name() == s)
            .copied()
            .ok_or_else(|| ConfigValueError::ContextPosition(s.to_string()))
    }
}

impl fmt::Display for BracketStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ContextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Effective settings for one hook run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HookConfig {
    pub bracket_style: BracketStyle,
    pub context_position: ContextPosition,
}

impl HookConfig {
    /// Reads both settings through `gateway`, field by field.
    ///
    /// Never fails: lookup errors and bad values are reported as warnings and
    /// the affected field keeps its default.
    pub fn resolve(gateway: &impl VersionControlGateway) -> Self {
        let defaults = Self::default();
        let config = Self {
            bracket_style: lookup(gateway, BRACKET_STYLE_KEY).unwrap_or(defaults.bracket_style),
            context_position: lookup(gateway, CONTEXT_POSITION_KEY)
                .unwrap_or(defaults.context_position),
        };
        log_debug!("Resolved hook configuration: {:?}", config);
        config
    }

    /// Renders the settings as a `[ticket]` TOML table for display
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        #[derive(Serialize)]
        struct Listing<'a> {
            ticket: &'a HookConfig,
        }
        toml::to_string(&Listing { ticket: self })
    }
}

fn lookup<T>(gateway: &impl VersionControlGateway, key: &str) -> Option<T>
where
    T: FromStr<Err = ConfigValueError>,
{
    let raw = match gateway.config_value(key) {
        Ok(Some(value)) if !value.trim().is_empty() => value,
        Ok(_) => return None,
        Err(e) => {
            log_warn!("Could not read {}, using default: {}", key, e);
            return None;
        }
    };

    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            log_warn!("Ignoring {}, using default: {}", key, e);
            None
        }
    }
}
