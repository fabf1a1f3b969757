//! A headless DOM for the bawiki page-preparation scripts.
//!
//! This crate implements a small mutable document ([`Document`]) designed
//! to be driven by external code: parse a wiki page with [`Document::
//! parse_html`], locate elements with the CSS-selector subset in
//! [`Selector`], and edit the tree through a [`DocumentMutator`]. There is
//! no style resolution or layout here; the screenshot host owns rendering,
//! this crate owns the structural edits that happen before capture.
//!
//! The document also carries a [`LocalStorage`] key/value map, standing in
//! for the browser storage the preparation scripts toggle (forced locale,
//! dismissed dialogs).

mod document;
mod html_sink;
mod mutator;
pub mod node;
mod query_selector;
mod serialize;
mod storage;

pub use document::Document;
pub use html5ever::{LocalName, Namespace, QualName};
pub use mutator::DocumentMutator;
pub use node::{Attribute, ElementData, Node, NodeData, TextNodeData};
pub use query_selector::{Selector, SelectorError};
pub use storage::LocalStorage;
