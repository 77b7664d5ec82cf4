//! `run` command: enhance a page, replay interactions, emit the result.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use enhance::dom::sim::Dispatch;
use enhance::utils::plural_count;
use enhance::{EnhanceConfig, SimDocument, debug, initialize, log};

use super::common::load_page;
use super::{Action, PageArgs};

/// Execute run command
pub fn run_page(
    args: &PageArgs,
    actions: &[Action],
    output: Option<&Path>,
    config: &EnhanceConfig,
) -> Result<()> {
    let doc = load_page(args)?;
    let html = replay(&doc, actions, config)?;

    // Stdout carries the HTML unless an output file is given.
    match output {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            for line in doc.console() {
                log!("console"; "{}", line);
            }
            log!("run"; "wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

/// Initialize `doc`, apply `actions` in order and serialize the result.
fn replay(doc: &SimDocument, actions: &[Action], config: &EnhanceConfig) -> Result<String> {
    initialize(doc, config);
    for action in actions {
        apply(doc, action)?;
    }
    Ok(doc.to_html())
}

fn apply(doc: &SimDocument, action: &Action) -> Result<()> {
    match action {
        Action::Click(selector) => {
            let node = doc.select_one(selector)?;
            report("click", &doc.describe(node), doc.click(node));
        }
        Action::Submit(selector) => {
            let node = doc.select_one(selector)?;
            report("submit", &doc.describe(node), doc.submit(node));
        }
        Action::Fill { selector, value } => {
            let node = doc.select_one(selector)?;
            doc.set_value(node, value);
            debug!("fill"; "{} = {:?}", doc.describe(node), value);
        }
        Action::Reveal(selector) => {
            let node = doc.select_one(selector)?;
            let notified = doc.reveal(node);
            debug!("reveal"; "{} ({})", doc.describe(node), plural_count(notified, "watcher"));
        }
    }
    Ok(())
}

fn report(kind: &str, target: &str, dispatch: Dispatch) {
    let module = if dispatch.default_prevented { "blocked" } else { kind };
    debug!(
        module;
        "{} {} ({})",
        kind,
        target,
        plural_count(dispatch.handlers_run, "handler")
    );
}
