//! The nodes themselves, and their data.

use html5ever::{LocalName, Namespace, QualName};

/// A parsed attribute. Values are plain strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    pub fn new(local: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, Namespace::from(""), LocalName::from(local)),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub data: NodeData,
}

impl Node {
    pub fn element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(data) => Some(&data.content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeData {
    /// The document root.
    Document,
    Element(ElementData),
    Text(TextNodeData),
    Comment,
}

#[derive(Debug, Clone)]
pub struct TextNodeData {
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ElementData {
    pub name: QualName,
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        Self { name, attrs }
    }

    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| &*attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    pub fn set_attr(&mut self, local: &str, value: &str) {
        match self.attrs.iter_mut().find(|attr| &*attr.name.local == local) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attribute::new(local, value)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes = self.attr("class").unwrap_or("").to_string();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self.set_attr("class", &classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        let classes = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("class", &classes);
    }

    /// Read one property out of the inline `style` attribute.
    pub fn style_property(&self, property: &str) -> Option<String> {
        self.attr("style").and_then(|style| {
            style.split(';').find_map(|declaration| {
                let (key, value) = declaration.split_once(':')?;
                (key.trim().eq_ignore_ascii_case(property)).then(|| value.trim().to_string())
            })
        })
    }

    /// Set one property in the inline `style` attribute, preserving the
    /// other declarations.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut declarations: Vec<(String, String)> = self
            .attr("style")
            .unwrap_or("")
            .split(';')
            .filter_map(|declaration| {
                let (key, value) = declaration.split_once(':')?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .collect();
        match declarations
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(property))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }
        let style = declarations
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr("style", &style);
    }

    /// Drop one property from the inline `style` attribute, keeping the
    /// other declarations.
    pub fn remove_style_property(&mut self, property: &str) {
        let Some(style) = self.attr("style") else {
            return;
        };
        let kept = style
            .split(';')
            .filter_map(|declaration| {
                let (key, value) = declaration.split_once(':')?;
                (!key.trim().eq_ignore_ascii_case(property))
                    .then(|| format!("{}: {}", key.trim(), value.trim()))
            })
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr("style", &kept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div() -> ElementData {
        ElementData::new(
            QualName::new(None, Namespace::from(""), LocalName::from("div")),
            Vec::new(),
        )
    }

    #[test]
    fn class_list_round_trip() {
        let mut el = div();
        el.add_class("active");
        el.add_class("show");
        el.add_class("active");
        assert_eq!(el.attr("class"), Some("active show"));
        el.remove_class("active");
        assert_eq!(el.attr("class"), Some("show"));
    }

    #[test]
    fn style_properties_are_edited_in_place() {
        let mut el = div();
        el.set_attr("style", "padding: 4px; color: red");
        el.set_style_property("padding", "20px");
        el.set_style_property("display", "none");
        assert_eq!(el.style_property("padding").as_deref(), Some("20px"));
        assert_eq!(el.style_property("color").as_deref(), Some("red"));
        assert_eq!(el.style_property("display").as_deref(), Some("none"));

        el.remove_style_property("display");
        assert!(el.style_property("display").is_none());
        assert_eq!(el.style_property("color").as_deref(), Some("red"));
    }
}
