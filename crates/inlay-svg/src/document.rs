//! Mutable SVG document: an arena node tree with an id index.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::MarkupError;
use crate::transform::TransformList;
use crate::viewbox::ViewBox;

/// Stable handle to an element within one [`Document`].
///
/// Handles are only meaningful for the document that produced them; the
/// engine pairs them with a mount generation so that handles into a
/// superseded document become inert instead of mutating the wrong tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    detached: bool,
}

/// A parsed, mutable SVG document.
///
/// Elements are stored in an arena; ids are indexed up front and kept in
/// sync on mutation, so lookups never scan the live tree. Duplicate ids are
/// best-effort: the first occurrence wins.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Document {
    /// Parse markup into a document.
    pub fn parse(markup: &str) -> Result<Self, MarkupError> {
        let parsed = roxmltree::Document::parse(markup)?;
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            id_index: HashMap::new(),
        };
        doc.root = doc.convert(parsed.root_element(), None);
        Ok(doc)
    }

    fn convert(&mut self, source: roxmltree::Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let attributes: Vec<(String, String)> = source
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        let text: String = source
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();
        let text = {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        self.nodes.push(NodeData {
            tag: source.tag_name().name().to_string(),
            attributes,
            text,
            children: Vec::new(),
            parent,
            detached: false,
        });
        if let Some((_, value)) = self.nodes[id.0].attributes.iter().find(|(n, _)| n == "id") {
            match self.id_index.entry(value.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
                Entry::Occupied(slot) => {
                    log::warn!("duplicate id {} ignored", slot.key());
                }
            }
        }
        let element_children: Vec<roxmltree::Node<'_, '_>> =
            source.children().filter(|c| c.is_element()).collect();
        for child in element_children {
            let child_id = self.convert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).filter(|n| !n.detached)
    }

    /// Root element of the document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// True while the node is part of the live tree.
    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Element tag name.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|n| n.tag.as_str())
    }

    /// Attribute value lookup.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set (or add) an attribute. Setting `id` keeps the id index in sync.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if self.get(node).is_none() {
            return;
        }
        if name == "id" {
            if let Some(old) = self.attribute(node, "id").map(str::to_string) {
                if self.id_index.get(&old) == Some(&node) {
                    self.id_index.remove(&old);
                }
            }
            self.id_index.entry(value.to_string()).or_insert(node);
        }
        let data = &mut self.nodes[node.0];
        if let Some(slot) = data.attributes.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            data.attributes.push((name.to_string(), value.to_string()));
        }
    }

    /// The element's `id` attribute.
    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id")
    }

    /// Look up a live element by id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index
            .get(id)
            .copied()
            .filter(|n| self.contains(*n))
    }

    /// Whether the element carries `class` as one of its class tokens.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|value| value.split_whitespace().any(|token| token == class))
    }

    /// All live elements carrying the given class token, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.contains(id) && self.has_class(id, class))
            .collect()
    }

    /// Child elements of a node.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map_or(&[], |n| n.children.as_slice())
    }

    /// The root element's declared view box; zeros when absent or malformed.
    pub fn view_box(&self) -> ViewBox {
        ViewBox::parse(self.attribute(self.root, "viewBox"))
    }

    /// Append a new empty element under `parent`.
    pub fn append_child(&mut self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.get(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: Some(parent),
            detached: false,
        });
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    /// Detach a subtree from the live tree. Detached nodes drop out of the
    /// id index and all queries; their handles become inert.
    pub fn remove(&mut self, node: NodeId) {
        if self.get(node).is_none() {
            return;
        }
        if let Some(parent) = self.nodes[node.0].parent {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
        self.detach_recursive(node);
    }

    fn detach_recursive(&mut self, node: NodeId) {
        self.nodes[node.0].detached = true;
        let id_value = self.nodes[node.0]
            .attributes
            .iter()
            .find(|(n, _)| n == "id")
            .map(|(_, v)| v.clone());
        if let Some(id_value) = id_value {
            if self.id_index.get(&id_value) == Some(&node) {
                self.id_index.remove(&id_value);
            }
        }
        let children = self.nodes[node.0].children.clone();
        for child in children {
            self.detach_recursive(child);
        }
    }

    /// The element's leading translate transform.
    pub fn translate(&self, node: NodeId) -> Option<(f64, f64)> {
        TransformList::parse(self.attribute(node, "transform")?).leading_translate()
    }

    /// Rewrite the element's leading translate transform. Returns false when
    /// the element has no transform attribute or its first entry is not a
    /// translate.
    pub fn set_translate(&mut self, node: NodeId, x: f64, y: f64) -> bool {
        let Some(attr) = self.attribute(node, "transform") else {
            return false;
        };
        let mut list = TransformList::parse(attr);
        if !list.set_leading_translate(x, y) {
            return false;
        }
        self.set_attribute(node, "transform", &list.to_attribute());
        true
    }

    /// Serialize the live tree back to markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let data = &self.nodes[node.0];
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in &data.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value, true));
            out.push('"');
        }
        if data.text.is_none() && data.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &data.text {
            out.push_str(&escape(text, false));
        }
        for &child in &data.children {
            self.write_node(child, out);
        }
        out.push_str("</");
        out.push_str(&data.tag);
        out.push('>');
    }
}

fn escape(value: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
