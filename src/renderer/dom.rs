//! A small document tree used as the render target for notification lists.
//!
//! Text is always stored as [`Node::Text`] and escaped on serialization, so
//! server-supplied strings can never turn into markup.

use std::fmt;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append_child(child);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Concatenated text of every descendant text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// All descendant elements with the given tag, in document order.
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.tag == tag {
                found.push(element);
            }
        });
        found
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => element.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        for child in &self.children {
            if let Node::Element(element) = child {
                visit(element);
                element.walk(visit);
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        f.write_str(">")?;

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return Ok(());
        }

        for child in &self.children {
            match child {
                Node::Element(element) => write!(f, "{}", element)?,
                Node::Text(text) => f.write_str(&escape(text))?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

/// Hosts rendered list items. Implemented by [`Element`]; other targets
/// (a live browser node, a test double) can implement it as well.
pub trait ListContainer {
    fn clear(&mut self);
    fn push_item(&mut self, item: Element);
    fn item_count(&self) -> usize;
}

impl ListContainer for Element {
    fn clear(&mut self) {
        self.clear_children();
    }

    fn push_item(&mut self, item: Element) {
        self.append_child(item);
    }

    fn item_count(&self) -> usize {
        self.child_elements().count()
    }
}

/// A full HTML document rooted at `<html>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(head: Element, body: Element) -> Self {
        Self {
            root: Element::new("html").with_child(head).with_child(body),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!DOCTYPE html>{}", self.root)
    }
}

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
