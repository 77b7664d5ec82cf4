//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Headless harness for the page enhancer
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (missing file means defaults)
    #[arg(short = 'C', long, default_value = "enhance.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Enhance a page and report what got bound
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        page: PageArgs,

        /// Print the report as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Enhance a page, replay interactions and print the resulting HTML
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        page: PageArgs,

        /// Interaction to replay, in order: click:SEL, submit:SEL,
        /// fill:SEL=VALUE or reveal:SEL
        #[arg(short, long = "action", value_name = "ACTION")]
        actions: Vec<Action>,

        /// Write the resulting HTML to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}

/// Page loading arguments shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct PageArgs {
    /// HTML page to load
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub page: PathBuf,

    /// Pretend images lack native `loading` support (use the observer path)
    #[arg(long)]
    pub no_native_lazy: bool,

    /// Pretend there is no visibility observer
    #[arg(long)]
    pub no_observer: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn page_args(&self) -> &PageArgs {
        match &self.command {
            Commands::Check { page, .. } | Commands::Run { page, .. } => page,
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// One replayed interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Click(String),
    Submit(String),
    Fill { selector: String, value: String },
    Reveal(String),
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected KIND:SELECTOR, got `{s}`"))?;

        if rest.trim().is_empty() {
            return Err(format!("`{kind}` needs a selector"));
        }

        match kind {
            "click" => Ok(Self::Click(rest.to_string())),
            "submit" => Ok(Self::Submit(rest.to_string())),
            "reveal" => Ok(Self::Reveal(rest.to_string())),
            "fill" => {
                // The value starts at the first `=` after any attribute brackets.
                let search_from = rest.rfind(']').map_or(0, |i| i + 1);
                let split = rest[search_from..]
                    .find('=')
                    .map(|i| search_from + i)
                    .ok_or_else(|| format!("expected fill:SELECTOR=VALUE, got `{s}`"))?;
                let selector = rest[..split].trim();
                if selector.is_empty() {
                    return Err(format!("`fill` needs a selector, got `{s}`"));
                }
                Ok(Self::Fill {
                    selector: selector.to_string(),
                    value: rest[split + 1..].to_string(),
                })
            }
            other => Err(format!(
                "unknown action `{other}` (expected click, submit, fill or reveal)"
            )),
        }
    }
}
