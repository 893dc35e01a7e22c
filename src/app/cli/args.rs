//! Command line arguments
//!
//! Global options configure the API connection, output and logging; the
//! subcommand selects what is queried. Values given here override the
//! configuration file.

use crate::core::validation::{parse_timeout, LOG_FORMATS, LOG_LEVELS};
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "bdsquery")]
#[command(about = "Query a Bedrock Dedicated Server status API")]
#[command(after_help = "Output modes: text, image (omit --mode to use the configured defaults)")]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Base URL of the status API
    #[arg(short = 'u', long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Access token sent with every request
    #[arg(short = 't', long = "token", value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (1-120)
    #[arg(short = 'T', long = "timeout", value_name = "SECONDS", value_parser = parse_timeout, global = true)]
    pub timeout: Option<u64>,

    /// Directory for rendered images
    #[arg(short = 'O', long = "output-dir", value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, overrides_with = "no_color", global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, overrides_with = "color", global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS, global = true)]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: QueryCommand,
}

/// What to query
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand {
    /// Show details of one online player
    Player {
        /// Player name
        name: String,

        #[command(flatten)]
        output: ModeArg,
    },

    /// Show server status
    Status {
        #[command(flatten)]
        output: ModeArg,
    },

    /// List online players
    Players {
        #[command(flatten)]
        output: ModeArg,
    },
}

/// Per-query output mode override
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeArg {
    /// Output mode for this query (text or image)
    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    pub mode: Option<String>,
}

impl QueryCommand {
    /// Raw `--mode` value; unrecognised values fall back to the configured modes
    pub fn mode_override(&self) -> Option<&str> {
        match self {
            QueryCommand::Player { output, .. }
            | QueryCommand::Status { output }
            | QueryCommand::Players { output } => output.mode.as_deref(),
        }
    }
}

impl Args {
    /// Full clap command with build metadata and help styles
    pub fn styled_command(color: bool) -> clap::Command {
        Self::command()
            .version(crate::long_version())
            .styles(crate::core::styles::palette_to_clap(color))
    }

    /// Parse `argv`; help, version and usage errors come back as `clap::Error`
    pub fn try_parse_with<I, T>(argv: I, color: bool) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::styled_command(color);
        let matches = command.try_get_matches_from_mut(argv)?;
        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
    }

    /// `Some(true)` for `--color`, `Some(false)` for `--no-color`, else `None`
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Log file from the command line; `none` and `-` disable file logging
    pub fn log_file_choice(&self) -> Option<Option<PathBuf>> {
        self.log_file.as_ref().map(|path| {
            let raw = path.to_string_lossy();
            if raw.eq_ignore_ascii_case("none") || raw == "-" {
                None
            } else {
                Some(path.clone())
            }
        })
    }
}

/// Color choice from the raw command line, before full parsing.
///
/// Help and usage errors are rendered before the configuration is read, so
/// their styling depends only on the flags and the terminal.
pub fn initial_color_choice<S: AsRef<str>>(argv: &[S]) -> Option<bool> {
    argv.iter()
        .skip(1)
        .take_while(|arg| arg.as_ref() != "--")
        .fold(None, |choice, arg| match arg.as_ref() {
            "--color" => Some(true),
            "--no-color" => Some(false),
            _ => choice,
        })
}
