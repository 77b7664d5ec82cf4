//! Counted nouns for log lines.

/// `"1 form"`, `"3 forms"`, `"0 links"`.
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "link"), "0 links");
        assert_eq!(plural_count(1, "form"), "1 form");
        assert_eq!(plural_count(2, "image"), "2 images");
    }
}
