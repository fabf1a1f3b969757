//! An implementation of html5ever's sink trait, parsing HTML into a [`Document`].

use std::borrow::Cow;
use std::cell::{Cell, Ref, RefCell, RefMut};

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeBuilderOpts, TreeSink};
use html5ever::{ParseOpts, QualName};

use crate::document::Document;
use crate::mutator::DocumentMutator;
use crate::node::Attribute;

fn to_dom_attr(attr: html5ever::Attribute) -> Attribute {
    Attribute {
        name: attr.name,
        value: attr.value.to_string(),
    }
}

pub(crate) struct HtmlSink<'doc> {
    mutator: RefCell<DocumentMutator<'doc>>,

    /// Errors that occurred during parsing.
    errors: RefCell<Vec<Cow<'static, str>>>,

    /// The document's quirks mode.
    quirks_mode: Cell<QuirksMode>,
}

impl<'doc> HtmlSink<'doc> {
    fn new(doc: &'doc mut Document) -> HtmlSink<'doc> {
        HtmlSink {
            mutator: RefCell::new(doc.mutate()),
            errors: RefCell::new(Vec::new()),
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
        }
    }

    #[track_caller]
    fn mutr(&self) -> RefMut<'_, DocumentMutator<'doc>> {
        self.mutator.borrow_mut()
    }
}

pub(crate) fn parse_into(doc: &mut Document, html: &str) {
    let sink = HtmlSink::new(doc);
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever::parse_document(sink, opts).one(html);
}

impl<'doc> TreeSink for HtmlSink<'doc> {
    type Output = ();

    // Arena ids double as parser handles.
    type Handle = usize;

    type ElemName<'a>
        = Ref<'a, QualName>
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        drop(self.mutator.into_inner());
        for error in self.errors.borrow().iter() {
            log::debug!("html parse error: {error}");
        }
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.errors.borrow_mut().push(msg);
    }

    fn get_document(&self) -> Self::Handle {
        0
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.mutator.borrow(), |mutator| {
            mutator
                .element_name(*target)
                .expect("TreeSink::elem_name called on a node which is not an element!")
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<html5ever::Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs.into_iter().map(to_dom_attr).collect();
        self.mutr().create_element(name, attrs)
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        self.mutr().create_comment_node()
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        self.mutr().create_comment_node()
    }

    fn append(&self, parent_id: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(id) => self.mutr().append_children(*parent_id, &[id]),
            // Adjacent text runs collapse into one node.
            NodeOrText::AppendText(text) => {
                let merged = match self.mutr().last_child_id(*parent_id) {
                    Some(id) => self.mutr().append_text_to_node(id, &text).is_ok(),
                    None => false,
                };
                if !merged {
                    let text_id = self.mutr().create_text_node(&text);
                    self.mutr().append_children(*parent_id, &[text_id]);
                }
            }
        }
    }

    fn append_before_sibling(&self, sibling_id: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        match new_node {
            NodeOrText::AppendNode(id) => self.mutr().insert_nodes_before(*sibling_id, &[id]),
            NodeOrText::AppendText(text) => {
                let merged = match self.mutr().previous_sibling_id(*sibling_id) {
                    Some(id) => self.mutr().append_text_to_node(id, &text).is_ok(),
                    None => false,
                };
                if !merged {
                    let text_id = self.mutr().create_text_node(&text);
                    self.mutr().insert_nodes_before(*sibling_id, &[text_id]);
                }
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        if self.mutr().node_has_parent(*element) {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Doctypes are dropped.
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        self.quirks_mode.set(mode);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<html5ever::Attribute>) {
        let attrs = attrs.into_iter().map(to_dom_attr).collect();
        self.mutr().add_attrs_if_missing(*target, attrs);
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.mutr().remove_node(*target);
    }

    fn reparent_children(&self, old_parent_id: &Self::Handle, new_parent_id: &Self::Handle) {
        self.mutr()
            .reparent_children(*old_parent_id, *new_parent_id);
    }
}

#[test]
fn parses_into_the_arena() {
    let html = "<!DOCTYPE html><html><body><h1 class=\"title\">hello world</h1></body></html>";
    let doc = Document::parse_html(html);

    let h1 = doc.select_first("h1.title").expect("h1 should exist");
    let children = &doc.get(h1).unwrap().children;
    assert_eq!(children.len(), 1);
    assert_eq!(doc.get(children[0]).unwrap().text(), Some("hello world"));
}
