//! The CSS-selector subset the page-preparation scripts use.
//!
//! Supported: type selectors, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! compound selectors, descendant and child (`>`) combinators, and comma
//! lists. Anything else is a parse error rather than a silent non-match.

use thiserror::Error;

use crate::document::Document;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character `{0}`")]
    Unexpected(char),
    #[error("unclosed attribute selector")]
    UnclosedAttribute,
    #[error("combinator without a right-hand side")]
    DanglingCombinator,
}

/// A parsed selector list, ready for matching.
#[derive(Debug, Clone)]
pub struct Selector {
    options: Vec<Complex>,
}

#[derive(Debug, Clone)]
struct Complex {
    parts: Vec<Compound>,
    /// `combinators[i]` sits between `parts[i]` and `parts[i + 1]`.
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

#[derive(Debug, Clone)]
struct AttrSelector {
    name: String,
    value: Option<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut options = Vec::new();
        for part in input.split(',') {
            options.push(parse_complex(part)?);
        }
        Ok(Selector { options })
    }

    /// Whether the element `id` matches any alternative of this selector.
    pub fn matches(&self, doc: &Document, id: usize) -> bool {
        self.options
            .iter()
            .any(|complex| match_at(doc, id, complex, complex.parts.len() - 1))
    }
}

fn parse_complex(input: &str) -> Result<Complex, SelectorError> {
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    let mut parts: Vec<Compound> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut pending: Option<Combinator> = None;

    while i < chars.len() {
        let mut saw_space = false;
        while i < chars.len() && chars[i].is_whitespace() {
            saw_space = true;
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        if chars[i] == '>' {
            if parts.is_empty() {
                return Err(SelectorError::Unexpected('>'));
            }
            pending = Some(Combinator::Child);
            i += 1;
            continue;
        }
        if saw_space && !parts.is_empty() && pending.is_none() {
            pending = Some(Combinator::Descendant);
        }
        let compound = parse_compound(&chars, &mut i)?;
        if let Some(combinator) = pending.take() {
            combinators.push(combinator);
        }
        parts.push(compound);
    }

    if parts.is_empty() {
        return Err(SelectorError::Empty);
    }
    if combinators.len() != parts.len() - 1 {
        return Err(SelectorError::DanglingCombinator);
    }
    Ok(Complex { parts, combinators })
}

fn parse_compound(chars: &[char], i: &mut usize) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut consumed_any = false;
    while *i < chars.len() {
        match chars[*i] {
            '*' if !consumed_any => {
                // Universal selector: constrains nothing.
                *i += 1;
                consumed_any = true;
            }
            '#' => {
                *i += 1;
                let name = parse_ident(chars, i);
                if name.is_empty() {
                    return Err(SelectorError::Unexpected('#'));
                }
                compound.id = Some(name);
                consumed_any = true;
            }
            '.' => {
                *i += 1;
                let name = parse_ident(chars, i);
                if name.is_empty() {
                    return Err(SelectorError::Unexpected('.'));
                }
                compound.classes.push(name);
                consumed_any = true;
            }
            '[' => {
                *i += 1;
                compound.attrs.push(parse_attr(chars, i)?);
                consumed_any = true;
            }
            c if c.is_whitespace() || c == '>' => break,
            c if is_ident_char(c) => {
                if consumed_any {
                    return Err(SelectorError::Unexpected(c));
                }
                compound.tag = Some(parse_ident(chars, i).to_ascii_lowercase());
                consumed_any = true;
            }
            other => return Err(SelectorError::Unexpected(other)),
        }
    }
    if !consumed_any {
        return Err(SelectorError::Empty);
    }
    Ok(compound)
}

fn parse_attr(chars: &[char], i: &mut usize) -> Result<AttrSelector, SelectorError> {
    let name = parse_ident(chars, i);
    if name.is_empty() {
        return Err(SelectorError::UnclosedAttribute);
    }
    match chars.get(*i) {
        Some(']') => {
            *i += 1;
            Ok(AttrSelector { name, value: None })
        }
        Some('=') => {
            *i += 1;
            let value = match chars.get(*i) {
                Some(&quote @ ('"' | '\'')) => {
                    *i += 1;
                    let start = *i;
                    while *i < chars.len() && chars[*i] != quote {
                        *i += 1;
                    }
                    if *i >= chars.len() {
                        return Err(SelectorError::UnclosedAttribute);
                    }
                    let value: String = chars[start..*i].iter().collect();
                    *i += 1;
                    value
                }
                _ => {
                    let start = *i;
                    while *i < chars.len() && chars[*i] != ']' {
                        *i += 1;
                    }
                    chars[start..*i].iter().collect()
                }
            };
            if chars.get(*i) != Some(&']') {
                return Err(SelectorError::UnclosedAttribute);
            }
            *i += 1;
            Ok(AttrSelector {
                name,
                value: Some(value),
            })
        }
        _ => Err(SelectorError::UnclosedAttribute),
    }
}

fn parse_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && is_ident_char(chars[*i]) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn match_at(doc: &Document, id: usize, complex: &Complex, part_idx: usize) -> bool {
    if !matches_compound(doc, id, &complex.parts[part_idx]) {
        return false;
    }
    if part_idx == 0 {
        return true;
    }
    let parent = doc.get(id).and_then(|node| node.parent);
    match complex.combinators[part_idx - 1] {
        Combinator::Child => {
            parent.is_some_and(|parent| match_at(doc, parent, complex, part_idx - 1))
        }
        Combinator::Descendant => {
            let mut ancestor = parent;
            while let Some(current) = ancestor {
                if match_at(doc, current, complex, part_idx - 1) {
                    return true;
                }
                ancestor = doc.get(current).and_then(|node| node.parent);
            }
            false
        }
    }
}

fn matches_compound(doc: &Document, id: usize, compound: &Compound) -> bool {
    let Some(element) = doc.get(id).and_then(|node| node.element()) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if !element.local_name().eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(want) = &compound.id {
        if element.id() != Some(want.as_str()) {
            return false;
        }
    }
    for class in &compound.classes {
        if !element.has_class(class) {
            return false;
        }
    }
    for attr in &compound.attrs {
        match element.attr(&attr.name) {
            Some(value) => {
                if let Some(want) = &attr.value {
                    if value != want {
                        return false;
                    }
                }
            }
            None => return false,
        }
    }
    true
}
