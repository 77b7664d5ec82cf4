//! enhance - headless harness for the page enhancer.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use enhance::{EnhanceConfig, debug, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.page_args().verbose);

    let config = EnhanceConfig::load(&cli.config)?;
    debug!("config"; "site `{}`", config.site.name);

    match &cli.command {
        Commands::Check { page, json } => cli::check::check_page(page, *json, &config),
        Commands::Run {
            page,
            actions,
            output,
        } => cli::run::run_page(page, actions, output.as_deref(), &config),
    }
}
