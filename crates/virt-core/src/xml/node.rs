//! Untyped markup tree used as the pivot between typed descriptions and XML text.
//!
//! Tree convention:
//! - attributes live in a dedicated attribute slot, in insertion order;
//! - element text content lives in a dedicated text slot;
//! - child elements are grouped by name, and every group is an ordered list of
//!   sibling nodes even when the element is logically singular.
//!
//! The list-wrapping convention stays inside this module: the entity mappings
//! read through [`XmlNode::first_child`] / [`XmlNode::child_list`] and never
//! expose it in the typed model.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::xml::XmlError;

/// One element of the untyped markup tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<(String, Vec<XmlNode>)>,
}

impl XmlNode {
    /// Creates an empty element: no attributes, no text, no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element carrying only text content.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    // ── Attribute slot ────────────────────────────────────────────────────────

    /// Appends an attribute. Insertion order is preserved on render.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push((name.to_string(), value.into()));
    }

    /// Returns the value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    // ── Text slot ─────────────────────────────────────────────────────────────

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    // ── Child element groups ──────────────────────────────────────────────────

    /// Appends `child` to the sibling list for `name`, creating the group if
    /// this is the first occurrence. Groups keep first-occurrence order.
    pub fn push_child(&mut self, name: &str, child: XmlNode) {
        self.group_mut(name).push(child);
    }

    /// Ensures a (possibly empty) sibling group exists for `name`.
    ///
    /// An empty group renders to nothing but keeps the key's declared
    /// presence, which is how an explicit empty sequence is represented.
    pub fn mark_children(&mut self, name: &str) {
        self.group_mut(name);
    }

    /// Returns the first sibling for `name` — the read side of the convention
    /// that singular elements are still stored as lists.
    pub fn first_child(&self, name: &str) -> Option<&XmlNode> {
        self.child_list(name).and_then(<[XmlNode]>::first)
    }

    /// Returns the full sibling list for `name`, or `None` when the key was
    /// never present. `Some(&[])` and `None` are distinct, observable states.
    pub fn child_list(&self, name: &str) -> Option<&[XmlNode]> {
        self.children
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterates all sibling groups in first-occurrence order.
    pub fn child_groups(&self) -> impl Iterator<Item = (&str, &[XmlNode])> {
        self.children
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn group_mut(&mut self, name: &str) -> &mut Vec<XmlNode> {
        if let Some(idx) = self.children.iter().position(|(k, _)| k == name) {
            &mut self.children[idx].1
        } else {
            self.children.push((name.to_string(), Vec::new()));
            &mut self.children.last_mut().expect("just pushed").1
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Renders this node as the root element named `root_name`.
    ///
    /// Output format: two-space indentation, self-closing tags for elements
    /// with neither text nor children, no trailing newline.
    pub fn render(&self, root_name: &str) -> String {
        let mut out = String::new();
        self.write_element(root_name, 0, &mut out);
        // Every element writes a trailing newline; the document does not.
        out.pop();
        out
    }

    fn write_element(&self, name: &str, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push('<');
        out.push_str(name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        let child_count: usize = self.children.iter().map(|(_, v)| v.len()).sum();
        match (&self.text, child_count) {
            (None, 0) => out.push_str("/>\n"),
            (Some(text), 0) => {
                out.push('>');
                out.push_str(&escape(text.as_str()));
                out.push_str("</");
                out.push_str(name);
                out.push_str(">\n");
            }
            (text, _) => {
                out.push_str(">\n");
                if let Some(text) = text {
                    for _ in 0..=depth {
                        out.push_str("  ");
                    }
                    out.push_str(&escape(text.as_str()));
                    out.push('\n');
                }
                for (child_name, siblings) in &self.children {
                    for child in siblings {
                        child.write_element(child_name, depth + 1, out);
                    }
                }
                for _ in 0..depth {
                    out.push_str("  ");
                }
                out.push_str("</");
                out.push_str(name);
                out.push_str(">\n");
            }
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parses a markup string into the root element's name and node.
///
/// # Errors
///
/// Returns [`XmlError::Parse`] carrying the underlying parser message when the
/// input is not well-formed (unclosed tags, bad attribute syntax, no root
/// element at all).
pub fn parse(input: &str) -> Result<(String, XmlNode), XmlError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    // Open elements, innermost last.
    let mut stack: Vec<(String, XmlNode)> = Vec::new();
    let mut root: Option<(String, XmlNode)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let node = node_with_attrs(&start)?;
                stack.push((name, node));
            }
            Ok(Event::Empty(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                let node = node_with_attrs(&start)?;
                close_element(&mut stack, &mut root, name, node);
            }
            Ok(Event::End(_)) => {
                let (name, node) = stack.pop().ok_or_else(|| {
                    XmlError::Parse("close tag without matching open tag".to_string())
                })?;
                close_element(&mut stack, &mut root, name, node);
            }
            Ok(Event::Text(text)) => {
                let unescaped = text
                    .unescape()
                    .map_err(|err| XmlError::Parse(err.to_string()))?;
                if let Some((_, node)) = stack.last_mut() {
                    node.set_text(unescaped.into_owned());
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some((_, node)) = stack.last_mut() {
                    node.set_text(String::from_utf8_lossy(cdata.as_ref()).into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declarations, comments, processing instructions
            Err(err) => return Err(XmlError::Parse(err.to_string())),
        }
    }

    if let Some((name, _)) = stack.last() {
        return Err(XmlError::Parse(format!("unclosed root tag <{name}>")));
    }
    root.ok_or_else(|| XmlError::Parse("document has no root element".to_string()))
}

fn node_with_attrs(start: &quick_xml::events::BytesStart<'_>) -> Result<XmlNode, XmlError> {
    let mut node = XmlNode::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| XmlError::Parse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::Parse(err.to_string()))?;
        node.set_attr(&key, value.into_owned());
    }
    Ok(node)
}

fn close_element(
    stack: &mut Vec<(String, XmlNode)>,
    root: &mut Option<(String, XmlNode)>,
    name: String,
    node: XmlNode,
) {
    if let Some((_, parent)) = stack.last_mut() {
        parent.push_child(&name, node);
    } else if root.is_none() {
        *root = Some((name, node));
    }
}
