use slab::Slab;

use crate::mutator::DocumentMutator;
use crate::node::{Node, NodeData};
use crate::query_selector::Selector;
use crate::serialize;
use crate::storage::LocalStorage;

/// A mutable, headless document.
///
/// Nodes live in a slab arena and are addressed by their stable ids;
/// removal detaches a subtree from the tree without invalidating ids that
/// are still held. All structural edits go through [`Document::mutate`].
pub struct Document {
    pub(crate) nodes: Slab<Node>,
    root_id: usize,
    storage: LocalStorage,
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = Slab::new();
        let entry = nodes.vacant_entry();
        let root_id = entry.key();
        entry.insert(Node {
            id: root_id,
            parent: None,
            children: Vec::new(),
            data: NodeData::Document,
        });
        Self {
            nodes,
            root_id,
            storage: LocalStorage::default(),
        }
    }

    /// Parse an HTML document into a fresh tree.
    pub fn parse_html(html: &str) -> Self {
        let mut doc = Self::new();
        crate::html_sink::parse_into(&mut doc, html);
        doc
    }

    pub fn root_id(&self) -> usize {
        self.root_id
    }

    pub fn get(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut LocalStorage {
        &mut self.storage
    }

    pub fn mutate(&mut self) -> DocumentMutator<'_> {
        DocumentMutator::new(self)
    }

    /// Ids of every node reachable from the root, in document order.
    pub fn descendants(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![self.root_id];
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = self.node(id);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// First element matching `selector`, in document order.
    pub fn query_selector(&self, selector: &Selector) -> Option<usize> {
        self.descendants()
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    /// Every element matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<usize> {
        self.descendants()
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// Convenience form of [`Document::query_selector`] for static
    /// selector strings: a selector that fails to parse logs a warning and
    /// matches nothing.
    pub fn select_first(&self, selector: &str) -> Option<usize> {
        match Selector::parse(selector) {
            Ok(selector) => self.query_selector(&selector),
            Err(err) => {
                log::warn!("bad selector `{selector}`: {err}");
                None
            }
        }
    }

    /// Convenience form of [`Document::query_selector_all`]; see
    /// [`Document::select_first`].
    pub fn select_all(&self, selector: &str) -> Vec<usize> {
        match Selector::parse(selector) {
            Ok(selector) => self.query_selector_all(&selector),
            Err(err) => {
                log::warn!("bad selector `{selector}`: {err}");
                Vec::new()
            }
        }
    }

    /// Serialize the tree back to HTML.
    pub fn outer_html(&self) -> String {
        serialize::to_html(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
