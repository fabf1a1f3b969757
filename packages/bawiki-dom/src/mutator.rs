use html5ever::QualName;

use crate::document::Document;
use crate::node::{Attribute, ElementData, Node, NodeData, TextNodeData};

/// Borrowed editing handle for a [`Document`].
///
/// All structural mutation funnels through here so tree invariants
/// (parent/child link symmetry) hold after every call. Detached nodes stay
/// in the arena and can be re-inserted; nothing is freed until the
/// document is dropped.
pub struct DocumentMutator<'doc> {
    doc: &'doc mut Document,
}

impl<'doc> DocumentMutator<'doc> {
    pub(crate) fn new(doc: &'doc mut Document) -> Self {
        Self { doc }
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> usize {
        self.insert(NodeData::Element(ElementData::new(name, attrs)))
    }

    pub fn create_text_node(&mut self, content: &str) -> usize {
        self.insert(NodeData::Text(TextNodeData {
            content: content.to_string(),
        }))
    }

    pub fn create_comment_node(&mut self) -> usize {
        self.insert(NodeData::Comment)
    }

    pub fn element_name(&self, id: usize) -> Option<&QualName> {
        self.doc.get(id)?.element().map(|el| &el.name)
    }

    pub fn node_has_parent(&self, id: usize) -> bool {
        self.doc.get(id).is_some_and(|node| node.parent.is_some())
    }

    pub fn last_child_id(&self, id: usize) -> Option<usize> {
        self.doc.get(id)?.children.last().copied()
    }

    pub fn previous_sibling_id(&self, id: usize) -> Option<usize> {
        let parent = self.doc.get(id)?.parent?;
        let children = &self.doc.node(parent).children;
        let pos = children.iter().position(|&child| child == id)?;
        pos.checked_sub(1).map(|prev| children[prev])
    }

    /// Append text to an existing text node. Fails when `id` is not a
    /// text node so the caller can create one instead.
    pub fn append_text_to_node(&mut self, id: usize, text: &str) -> Result<(), ()> {
        match &mut self.doc.nodes[id].data {
            NodeData::Text(data) => {
                data.content.push_str(text);
                Ok(())
            }
            _ => Err(()),
        }
    }

    pub fn append_children(&mut self, parent_id: usize, child_ids: &[usize]) {
        for &child_id in child_ids {
            self.detach(child_id);
            self.doc.nodes[child_id].parent = Some(parent_id);
            self.doc.nodes[parent_id].children.push(child_id);
        }
    }

    /// Insert nodes at the front of `parent_id`'s child list, preserving
    /// their order.
    pub fn prepend_children(&mut self, parent_id: usize, child_ids: &[usize]) {
        for &child_id in child_ids.iter().rev() {
            self.detach(child_id);
            self.doc.nodes[child_id].parent = Some(parent_id);
            self.doc.nodes[parent_id].children.insert(0, child_id);
        }
    }

    pub fn insert_nodes_before(&mut self, sibling_id: usize, new_ids: &[usize]) {
        let Some(parent_id) = self.doc.node(sibling_id).parent else {
            return;
        };
        for &new_id in new_ids {
            self.detach(new_id);
            let pos = self.doc.node(parent_id).children.iter().position(|&child| child == sibling_id);
            let Some(pos) = pos else { return };
            self.doc.nodes[new_id].parent = Some(parent_id);
            self.doc.nodes[parent_id].children.insert(pos, new_id);
        }
    }

    /// Detach `id` (and its subtree) from the tree.
    pub fn remove_node(&mut self, id: usize) {
        self.detach(id);
    }

    pub fn reparent_children(&mut self, old_parent_id: usize, new_parent_id: usize) {
        let children = std::mem::take(&mut self.doc.nodes[old_parent_id].children);
        for &child in &children {
            self.doc.nodes[child].parent = Some(new_parent_id);
        }
        self.doc.nodes[new_parent_id].children.extend(children);
    }

    /// Deep-copy the subtree rooted at `id`; the copy starts out detached.
    pub fn clone_subtree(&mut self, id: usize) -> usize {
        let data = self.doc.node(id).data.clone();
        let children = self.doc.node(id).children.clone();
        let copy = self.insert(data);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.doc.nodes[child_copy].parent = Some(copy);
            self.doc.nodes[copy].children.push(child_copy);
        }
        copy
    }

    pub fn add_attrs_if_missing(&mut self, id: usize, attrs: Vec<Attribute>) {
        let Some(element) = self.doc.nodes[id].element_mut() else {
            return;
        };
        for attr in attrs {
            if element.attr(&attr.name.local).is_none() {
                element.attrs.push(attr);
            }
        }
    }

    pub fn set_attribute(&mut self, id: usize, local: &str, value: &str) {
        if let Some(element) = self.doc.nodes[id].element_mut() {
            element.set_attr(local, value);
        }
    }

    pub fn add_class(&mut self, id: usize, class: &str) {
        if let Some(element) = self.doc.nodes[id].element_mut() {
            element.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: usize, class: &str) {
        if let Some(element) = self.doc.nodes[id].element_mut() {
            element.remove_class(class);
        }
    }

    pub fn set_style_property(&mut self, id: usize, property: &str, value: &str) {
        if let Some(element) = self.doc.nodes[id].element_mut() {
            element.set_style_property(property, value);
        }
    }

    pub fn remove_style_property(&mut self, id: usize, property: &str) {
        if let Some(element) = self.doc.nodes[id].element_mut() {
            element.remove_style_property(property);
        }
    }

    fn insert(&mut self, data: NodeData) -> usize {
        let entry = self.doc.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node {
            id,
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    fn detach(&mut self, id: usize) {
        if let Some(parent) = self.doc.nodes[id].parent.take() {
            self.doc.nodes[parent].children.retain(|&child| child != id);
        }
    }
}
