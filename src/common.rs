use crate::config::{BracketStyle, ContextPosition, HookConfig};
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct ConfigParams {
    /// Delimiters around the inserted ticket id
    #[arg(
        long,
        help = "Delimiters around the ticket id (none, round, square, curly)",
        value_parser = bracket_style_parser
    )]
    pub bracket_style: Option<BracketStyle>,

    /// Where the ticket id goes on the first line
    #[arg(
        long,
        help = "Where to insert the ticket id (start, before_colon, after_colon)",
        value_parser = context_position_parser
    )]
    pub context_position: Option<ContextPosition>,
}

impl ConfigParams {
    /// Overlays the given flags on `config`, returning whether anything changed
    pub fn apply_to_config(&self, config: &mut HookConfig) -> bool {
        let mut changes_made = false;

        if let Some(style) = self.bracket_style
            && config.bracket_style != style
        {
            config.bracket_style = style;
            changes_made = true;
        }

        if let Some(position) = self.context_position
            && config.context_position != position
        {
            config.context_position = position;
            changes_made = true;
        }

        changes_made
    }

    pub fn is_empty(&self) -> bool {
        self.bracket_style.is_none() && self.context_position.is_none()
    }
}

/// Validates a bracket style name
pub fn bracket_style_parser(s: &str) -> Result<BracketStyle, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid bracket style '{}'. Available styles: {}",
            s,
            BracketStyle::all_names().join(", ")
        )
    })
}

/// Validates a context position name
pub fn context_position_parser(s: &str) -> Result<ContextPosition, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid context position '{}'. Available positions: {}",
            s,
            ContextPosition::all_names().join(", ")
        )
    })
}
