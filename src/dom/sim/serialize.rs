//! Arena → HTML.

use super::tree::{Dom, NodeId, NodeKind};
use crate::utils::html;

pub(super) fn to_html(dom: &Dom) -> String {
    let mut out = String::new();
    if let Some(doctype) = &dom.doctype {
        out.push_str("<!");
        out.push_str(doctype.trim());
        out.push_str(">\n");
    }
    if let Some(root) = dom.node(dom.root()) {
        for &child in &root.children {
            write_node(dom, child, false, &mut out);
        }
    }
    out
}

fn write_node(dom: &Dom, id: NodeId, raw_text: bool, out: &mut String) {
    let Some(node) = dom.node(id) else { return };

    match &node.kind {
        NodeKind::Document => {}
        NodeKind::Text(text) if raw_text => out.push_str(text),
        NodeKind::Text(text) => out.push_str(&html::escape_text(text)),
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (key, value) in &element.attrs {
                out.push(' ');
                out.push_str(key);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&html::escape_attr(value));
                    out.push('"');
                }
            }
            out.push('>');

            if html::is_void_element(&element.tag) {
                return;
            }

            let raw = html::is_raw_text_element(&element.tag);
            for &child in &node.children {
                write_node(dom, child, raw, out);
            }

            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}
