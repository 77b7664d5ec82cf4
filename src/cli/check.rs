//! `check` command: enhance a page and report what got bound.

use anyhow::Result;
use serde::Serialize;

use enhance::utils::plural_count;
use enhance::{DomQuery, EnhanceConfig, Enhanced, LazyMode, SimDocument, initialize, log};

use super::PageArgs;
use super::common::load_page;

/// Machine-readable `check` output.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub page: String,
    pub enhanced: Enhanced,
    /// Lines the page wrote to its console during setup.
    pub console: Vec<String>,
    /// In-page links whose fragment names no element.
    pub unresolved_anchors: Vec<String>,
}

/// Execute check command
pub fn check_page(args: &PageArgs, json: bool, config: &EnhanceConfig) -> Result<()> {
    let doc = load_page(args)?;
    let report = build_report(&doc, args, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn build_report(doc: &SimDocument, args: &PageArgs, config: &EnhanceConfig) -> CheckReport {
    let enhanced = initialize(doc, config);
    CheckReport {
        page: args.page.display().to_string(),
        enhanced,
        console: doc.console(),
        unresolved_anchors: unresolved_anchors(doc, config),
    }
}

/// Hrefs of scroll-enhanced links whose fragment does not resolve.
fn unresolved_anchors(doc: &SimDocument, config: &EnhanceConfig) -> Vec<String> {
    doc.query_all(&config.scroll.selector)
        .into_iter()
        .filter_map(|link| doc.attr(&link, "href"))
        .filter(|href| {
            let id = href.get(1..).unwrap_or("");
            id.is_empty() || doc.element_by_id(id).is_none()
        })
        .collect()
}

fn print_report(report: &CheckReport) {
    let enhanced = &report.enhanced;

    for line in &report.console {
        log!("console"; "{}", line);
    }

    if enhanced.menu {
        log!("ok"; "menu toggle bound");
    } else {
        log!("skip"; "menu toggle or panel not found");
    }
    log!("ok"; "{} validated", plural_count(enhanced.forms, "form"));
    log!("ok"; "{} scroll smoothly", plural_count(enhanced.links, "link"));

    let images = plural_count(enhanced.lazy.images, "image");
    match enhanced.lazy.mode {
        LazyMode::Native => log!("ok"; "{} resolved eagerly (native path)", images),
        LazyMode::Observer => log!("ok"; "{} watched for visibility", images),
        LazyMode::Unavailable => log!("skip"; "no lazy-loading facility, images untouched"),
    }

    if !report.unresolved_anchors.is_empty() {
        log!(
            "warning";
            "{} will fall back to native navigation:",
            plural_count(report.unresolved_anchors.len(), "anchor")
        );
        for href in &report.unresolved_anchors {
            eprintln!("- {href}");
        }
    }
}
