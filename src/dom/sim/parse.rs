//! HTML → arena conversion via `tl`.

use super::tree::{Attrs, Dom, NodeId};
use crate::dom::DomError;
use crate::utils::html;

/// Parse `source` and append its nodes under the document root.
pub(super) fn parse_into(dom: &mut Dom, source: &str) -> Result<(), DomError> {
    let (doctype, body) = split_doctype(source);
    dom.doctype = doctype;

    let vdom = tl::parse(body, tl::ParserOptions::default())
        .map_err(|err| DomError::HtmlParse(format!("{err:?}")))?;
    let parser = vdom.parser();

    let root = dom.root();
    for handle in vdom.children() {
        convert(dom, root, *handle, parser);
    }
    Ok(())
}

/// Split a leading `<!DOCTYPE ...>` off the source.
fn split_doctype(source: &str) -> (Option<String>, &str) {
    let trimmed = source.trim_start();
    let is_doctype = trimmed
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"));
    if !is_doctype {
        return (None, source);
    }
    match trimmed.find('>') {
        Some(end) => {
            let decl = trimmed[2..end].trim();
            let rest = decl.get(7..).unwrap_or("").trim();
            let doctype = if rest.is_empty() {
                "DOCTYPE".to_string()
            } else {
                format!("DOCTYPE {rest}")
            };
            (Some(doctype), &trimmed[end + 1..])
        }
        None => (None, source),
    }
}

/// Attributes of a start tag, read from the tag's source text.
///
/// `tl`'s attribute map drops the first byte of an attribute that follows a
/// valueless one (`<input required type="email">`), so the start tag is
/// tokenized here. Names are lowercased, values unescaped, and the first
/// occurrence of a name wins.
fn start_tag_attrs(raw: &str) -> Attrs {
    let bytes = raw.as_bytes();
    let len = bytes.len();
    let ends_name = |b: u8| b.is_ascii_whitespace() || b == b'/' || b == b'>';
    let skip_space = |mut i: usize| {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    let mut attrs = Attrs::new();

    // Past `<tag`.
    let mut i = skip_space(1);
    while i < len && !ends_name(bytes[i]) {
        i += 1;
    }

    loop {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len || bytes[i] == b'>' {
            break;
        }

        let start = i;
        while i < len && !ends_name(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        if start == i {
            // Stray `=`.
            i += 1;
            continue;
        }
        let key = raw[start..i].to_ascii_lowercase();

        let mut value = "";
        let after = skip_space(i);
        if after < len && bytes[after] == b'=' {
            let j = skip_space(after + 1);
            match bytes.get(j) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let open = j + 1;
                    let close = raw[open..]
                        .find(char::from(quote))
                        .map_or(len, |offset| open + offset);
                    value = &raw[open..close];
                    i = (close + 1).min(len);
                }
                _ => {
                    let mut end = j;
                    while end < len && !bytes[end].is_ascii_whitespace() && bytes[end] != b'>' {
                        end += 1;
                    }
                    value = &raw[j..end];
                    i = end;
                }
            }
        }

        if !attrs.iter().any(|(k, _)| *k == key) {
            attrs.push((key, html::unescape(value).into_owned()));
        }
    }
    attrs
}

fn convert(dom: &mut Dom, parent: NodeId, handle: tl::NodeHandle, parser: &tl::Parser) {
    let Some(node) = handle.get(parser) else {
        return;
    };

    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_ascii_lowercase();

            // Stray markup declarations carry no content.
            if name.starts_with('!') {
                return;
            }

            let attrs = start_tag_attrs(&tag.raw().as_utf8_str());
            let element = dom.create_element(parent, name.clone(), attrs);
            for child in tag.children().top().iter() {
                convert(dom, element, *child, parser);
            }

            if name == "textarea" {
                dom.seed_textarea_value(element);
            }
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            let raw = dom
                .tag_name(parent)
                .is_some_and(html::is_raw_text_element);
            let text = if raw {
                text.into_owned()
            } else {
                html::unescape(&text).into_owned()
            };
            dom.create_text(parent, text);
        }
        tl::Node::Comment(bytes) => {
            let text = bytes.as_utf8_str();
            let body = text
                .strip_prefix("<!--")
                .and_then(|t| t.strip_suffix("-->"))
                .unwrap_or(&text);
            dom.create_comment(parent, body.to_string());
        }
    }
}
