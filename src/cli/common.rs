//! Helpers shared by the harness commands.

use std::fs;

use anyhow::{Context, Result};
use enhance::SimDocument;
use enhance::debug;

use super::PageArgs;

/// Read and parse the page, applying the capability switches.
pub fn load_page(args: &PageArgs) -> Result<SimDocument> {
    let source = fs::read_to_string(&args.page)
        .with_context(|| format!("failed to read `{}`", args.page.display()))?;

    let doc = SimDocument::parse(&source)
        .with_context(|| format!("failed to parse `{}`", args.page.display()))?
        .with_native_lazy_loading(!args.no_native_lazy)
        .with_visibility_observer(!args.no_observer);

    debug!("page"; "loaded {} ({} bytes)", args.page.display(), source.len());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn page_args(path: &std::path::Path) -> PageArgs {
        PageArgs {
            page: path.to_path_buf(),
            no_native_lazy: true,
            no_observer: false,
            verbose: false,
        }
    }

    #[test]
    fn test_load_page_applies_switches() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<p>hi</p>").unwrap();

        let doc = load_page(&page_args(file.path())).unwrap();
        assert!(!enhance::DomQuery::supports_native_lazy_loading(&doc));
        assert_eq!(doc.to_html(), "<p>hi</p>");
    }

    #[test]
    fn test_load_missing_page() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_page(&page_args(&dir.path().join("nope.html"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
