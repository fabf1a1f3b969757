//! HTML serialization, so hosts and tests can observe document edits.

use crate::document::Document;
use crate::node::NodeData;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub(crate) fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    for &child in &doc.node(doc.root_id()).children {
        write_node(doc, child, &mut out, false);
    }
    out
}

fn write_node(doc: &Document, id: usize, out: &mut String, raw: bool) {
    let node = doc.node(id);
    match &node.data {
        NodeData::Document => {
            for &child in &node.children {
                write_node(doc, child, out, false);
            }
        }
        NodeData::Comment => {}
        NodeData::Text(text) => {
            if raw {
                out.push_str(&text.content);
            } else {
                push_escaped_text(out, &text.content);
            }
        }
        NodeData::Element(element) => {
            let tag = element.local_name();
            out.push('<');
            out.push_str(tag);
            for attr in &element.attrs {
                out.push(' ');
                out.push_str(&attr.name.local);
                out.push_str("=\"");
                push_escaped_attr(out, &attr.value);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag) {
                return;
            }
            let raw_children = RAW_TEXT_ELEMENTS.contains(&tag);
            for &child in &node.children {
                write_node(doc, child, out, raw_children);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn push_escaped_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn push_escaped_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            other => out.push(other),
        }
    }
}
