//! Page preparation for the two wiki hosts the screenshot bot captures.
//!
//! Each procedure runs once against a parsed page and applies a fixed set
//! of selector-driven edits: hiding chrome that would cover content,
//! removing interactive widgets that render badly in a still image, and
//! expanding collapsed sections. A selector that matches nothing is
//! silently skipped; absence is an expected, benign condition.

pub mod gamekee;
pub mod schale;

pub use schale::{SchaleOptions, SchaleOutcome};

use bawiki_dom::Document;

/// Whether an element is hidden via its inline style.
pub(crate) fn is_inline_hidden(doc: &Document, id: usize) -> bool {
    doc.get(id)
        .and_then(|node| node.element())
        .and_then(|element| element.style_property("display"))
        .is_some_and(|display| display == "none")
}
