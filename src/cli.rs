use crate::common::ConfigParams;
use crate::config::{BRACKET_STYLE_KEY, CONTEXT_POSITION_KEY, HookConfig};
use crate::git::GitRepo;
use crate::hook::{HookOutcome, run_commit_msg_hook};
use crate::install::{HOOK_NAME, executable_path, install_hook};
use crate::{log_debug, log_info, ui};
use anyhow::Context;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "git-ticket: put the branch's ticket id into every commit message",
    long_about = "git-ticket is a commit-msg hook. Installed into a repository, it reads the ticket id \
                  (such as ABC-123) from the current branch name and adds it to the first line of \
                  each commit message, unless the message already mentions it.",
    disable_version_flag = true,
    args_conflicts_with_subcommands = true,
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Commit message file passed by git to the commit-msg hook
    #[arg(
        value_name = "MESSAGE_FILE",
        help = "Commit message file (git passes this when running the hook)"
    )]
    pub message_file: Option<PathBuf>,

    /// Log debug messages
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to stderr"
    )]
    pub log: bool,

    /// Specify a log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Append log messages to a file"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Install git-ticket as the repository's commit-msg hook
    #[command(
        about = "Install as the commit-msg hook of the current repository",
        long_about = "Copy this executable into the repository's hooks directory as 'commit-msg'. \
                      Respects core.hooksPath."
    )]
    Install,

    /// Show or change the hook configuration
    #[command(
        about = "Show or change the hook configuration",
        long_about = "Set the bracket style and insertion position in the repository's git config \
                      (ticket.bracketStyle, ticket.contextPosition). Without flags, prints the \
                      effective configuration."
    )]
    Config {
        #[command(flatten)]
        common: ConfigParams,

        /// Print the effective configuration
        #[arg(short, long, help = "Print the effective configuration")]
        print: bool,
    },
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub fn main() -> anyhow::Result<ExitCode> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.log {
        crate::logger::set_verbose_logging(true);
    }
    if let Some(log_file) = cli.log_file.as_deref() {
        crate::logger::set_log_file(log_file)
            .with_context(|| format!("Failed to open log file {log_file}"))?;
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
        crate::logger::set_log_to_stderr(false);
    }

    match (cli.command, cli.message_file) {
        (Some(command), _) => handle_command(command),
        (None, Some(message_file)) => handle_hook(&message_file),
        (None, None) => handle_print_path(),
    }
}

/// Handle the command based on parsed arguments
pub fn handle_command(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Install => handle_install(),
        Commands::Config { common, print } => handle_config(&common, print),
    }
}

/// Runs the commit-msg pipeline against the file git handed us
fn handle_hook(message_file: &Path) -> anyhow::Result<ExitCode> {
    log_debug!("Running commit-msg hook on {}", message_file.display());
    let repo = GitRepo::from_current_dir()?;
    let outcome = run_commit_msg_hook(&repo, message_file)?;

    match &outcome {
        HookOutcome::Modified { ticket, .. } => {
            log_info!("Added {} to the commit message", ticket);
        }
        HookOutcome::Unchanged(reason) => {
            log_debug!("Commit message left unchanged: {}", reason);
        }
        HookOutcome::Fatal(reason) => {
            ui::print_error(&format!("git-ticket: {reason}"));
        }
    }

    Ok(ExitCode::from(outcome.exit_code()))
}

/// Prints where this executable lives, for wiring it up by hand
fn handle_print_path() -> anyhow::Result<ExitCode> {
    let path = executable_path()?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn handle_install() -> anyhow::Result<ExitCode> {
    let repo = GitRepo::from_current_dir()?;
    match install_hook(&repo) {
        Ok(hook_path) => {
            ui::print_success(&format!("✅ Installed {HOOK_NAME} hook"));
            ui::print_message(&format!("   {}", hook_path.display()));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            ui::print_warning(&format!("git-ticket: {e}"));
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

fn handle_config(common: &ConfigParams, print: bool) -> anyhow::Result<ExitCode> {
    let repo = GitRepo::from_current_dir()?;
    let mut config = HookConfig::resolve(&repo);

    // passed flags are written locally even when they match the effective value
    if !common.is_empty() {
        if let Some(style) = common.bracket_style {
            repo.set_config_value(BRACKET_STYLE_KEY, style.name())
                .with_context(|| format!("Failed to set {BRACKET_STYLE_KEY}"))?;
        }
        if let Some(position) = common.context_position {
            repo.set_config_value(CONTEXT_POSITION_KEY, position.name())
                .with_context(|| format!("Failed to set {CONTEXT_POSITION_KEY}"))?;
        }
        if common.apply_to_config(&mut config) {
            log_debug!("Effective configuration changed");
        }
        ui::print_success("Configuration updated successfully");
    }

    if print || common.is_empty() {
        let listing = config
            .to_toml()
            .context("Failed to render configuration")?;
        ui::print_message(listing.trim_end());
    }

    Ok(ExitCode::SUCCESS)
}
