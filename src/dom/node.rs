use crate::dom::css::Declarations;
use crate::foundation::error::{TickerError, TickerResult};

/// Stable handle to a node in a [`Document`].
///
/// Handles carry a generation so a freed slot that gets reused never aliases an old handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NodeId {
    idx: u32,
    generation: u32,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.idx, self.generation)
    }
}

/// Element payload: tag name, ordered attributes, inline style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementData {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub style: Declarations,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            style: Declarations::default(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

/// Owned, document-independent copy of a content subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentNode {
    pub kind: NodeKind,
    pub children: Vec<FragmentNode>,
}

/// Ordered list of owned subtrees (the structured equivalent of an `innerHTML` string).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub nodes: Vec<FragmentNode>,
}

impl Fragment {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<NodeData>,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document tree with an `<html>` root holding `<head>` and `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    layout_revision: u64,
    sheet_revision: u64,
    paint_revision: u64,
}

/// Inline properties that never change box geometry.
const PAINT_ONLY_PROPERTIES: &[&str] = &[
    "transform",
    "will-change",
    "opacity",
    "visibility",
    "pointer-events",
    "animation-name",
    "animation-duration",
    "animation-timing-function",
    "animation-iteration-count",
    "animation-play-state",
    "animation-delay",
];

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                idx: 0,
                generation: 0,
            },
            head: NodeId {
                idx: 0,
                generation: 0,
            },
            body: NodeId {
                idx: 0,
                generation: 0,
            },
            layout_revision: 0,
            sheet_revision: 0,
            paint_revision: 0,
        };
        let root = doc.alloc(NodeKind::Element(ElementData::new("html")));
        let head = doc.alloc(NodeKind::Element(ElementData::new("head")));
        let body = doc.alloc(NodeKind::Element(ElementData::new("body")));
        doc.link(root, head);
        doc.link(root, body);
        doc.root = root;
        doc.head = head;
        doc.body = body;
        doc
    }

    pub fn document_element(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Bumped by every mutation that can move or resize a box.
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision
    }

    /// Bumped whenever the text of a `<style>` element changes or one is attached/detached.
    pub fn sheet_revision(&self) -> u64 {
        self.sheet_revision
    }

    /// Bumped by inline changes to paint-only properties (transform, animation, visibility).
    pub fn paint_revision(&self) -> u64 {
        self.paint_revision
    }

    /// Number of live (allocated) nodes, attached or not.
    pub fn live_node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.data(id).is_some()
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.data(id).map(|d| &d.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(e) => Some(e),
            NodeKind::Text(_) => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).and_then(|d| d.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    /// Whether the node is reachable from the document element.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if n == self.root {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Pre-order traversal of `id` and all its descendants.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if !self.contains(n) {
                continue;
            }
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> TickerResult<()> {
        self.require_element(parent)?;
        self.require(child)?;
        if child == self.root {
            return Err(TickerError::dom("cannot move the document element"));
        }
        let mut cur = Some(parent);
        while let Some(n) = cur {
            if n == child {
                return Err(TickerError::dom("append would create a cycle"));
            }
            cur = self.parent(n);
        }
        self.detach(child);
        self.link(parent, child);
        self.touch_tree(parent);
        Ok(())
    }

    /// Detach `id` from its parent. The node stays alive and can be re-inserted.
    pub fn remove(&mut self, id: NodeId) -> TickerResult<()> {
        self.require(id)?;
        if id == self.root || id == self.head || id == self.body {
            return Err(TickerError::dom("cannot remove structural document nodes"));
        }
        if let Some(parent) = self.parent(id) {
            self.detach(id);
            self.touch_tree(parent);
            if self.is_style_element(id) {
                self.sheet_revision += 1;
            }
        }
        Ok(())
    }

    /// Detach `id` and free it together with its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> TickerResult<()> {
        self.remove(id)?;
        self.free_subtree(id);
        Ok(())
    }

    /// Replace every child of `parent` with `new_children` in one mutation; old children are freed.
    pub fn replace_children(&mut self, parent: NodeId, new_children: &[NodeId]) -> TickerResult<()> {
        self.require_element(parent)?;
        for c in new_children {
            self.require(*c)?;
            if self.is_ancestor_or_self(*c, parent) {
                return Err(TickerError::dom("replacement child contains its new parent"));
            }
        }
        let old: Vec<NodeId> = self.children(parent).to_vec();
        for c in &old {
            if new_children.contains(c) {
                continue;
            }
            if self.is_style_element(*c) {
                self.sheet_revision += 1;
            }
            self.detach(*c);
            self.free_subtree(*c);
        }
        for c in new_children {
            self.detach(*c);
        }
        for c in new_children {
            self.link(parent, *c);
        }
        self.touch_tree(parent);
        Ok(())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> TickerResult<()> {
        let name = name.to_ascii_lowercase();
        if name == "style" {
            let style = Declarations::parse(value);
            self.element_mut(id)?.style = style;
        } else {
            self.element_mut(id)?.set_attr(&name, value);
        }
        self.layout_revision += 1;
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> TickerResult<()> {
        let el = self.element_mut(id)?;
        el.attrs.retain(|(k, _)| k != name);
        self.layout_revision += 1;
        Ok(())
    }

    /// `data-*` attribute lookup; `key` is the suffix after `data-` (e.g. `px-per-sec`).
    pub fn data_attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|(k, _)| k.strip_prefix("data-") == Some(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> TickerResult<()> {
        let el = self.element_mut(id)?;
        if el.has_class(class) {
            return Ok(());
        }
        let mut classes: Vec<String> = el.classes().map(str::to_string).collect();
        classes.push(class.to_string());
        el.set_attr("class", &classes.join(" "));
        self.layout_revision += 1;
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> TickerResult<()> {
        let el = self.element_mut(id)?;
        if !el.has_class(class) {
            return Ok(());
        }
        let classes: Vec<String> = el
            .classes()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        el.set_attr("class", &classes.join(" "));
        self.layout_revision += 1;
        Ok(())
    }

    pub fn inline_style(&self, id: NodeId) -> Option<&Declarations> {
        self.element(id).map(|e| &e.style)
    }

    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> TickerResult<()> {
        let el = self.element_mut(id)?;
        el.style.set(name, value);
        if is_paint_only(name) {
            self.paint_revision += 1;
        } else {
            self.layout_revision += 1;
        }
        Ok(())
    }

    pub fn remove_style_property(&mut self, id: NodeId, name: &str) -> TickerResult<()> {
        let el = self.element_mut(id)?;
        let removed = el.style.remove(name);
        if removed {
            if is_paint_only(name) {
                self.paint_revision += 1;
            } else {
                self.layout_revision += 1;
            }
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.descendants(id) {
            if let Some(NodeKind::Text(t)) = self.kind(n) {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace all children with a single text node (none when `text` is empty).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> TickerResult<()> {
        self.require_element(id)?;
        if text.is_empty() {
            self.replace_children(id, &[])?;
        } else {
            let t = self.create_text(text);
            self.replace_children(id, &[t])?;
        }
        Ok(())
    }

    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(element_id))
    }

    /// Owned deep copy of `id` and its subtree.
    pub fn snapshot(&self, id: NodeId) -> TickerResult<FragmentNode> {
        let data = self.require(id)?;
        let mut children = Vec::with_capacity(data.children.len());
        for c in &data.children {
            children.push(self.snapshot(*c)?);
        }
        Ok(FragmentNode {
            kind: data.kind.clone(),
            children,
        })
    }

    /// Owned deep copy of the element children of `id` (text between them is dropped).
    pub fn snapshot_element_children(&self, id: NodeId) -> TickerResult<Fragment> {
        let mut nodes = Vec::new();
        for c in self.element_children(id) {
            nodes.push(self.snapshot(c)?);
        }
        Ok(Fragment { nodes })
    }

    /// Allocate a detached copy of `node`.
    pub fn instantiate(&mut self, node: &FragmentNode) -> NodeId {
        let id = self.alloc(node.kind.clone());
        for c in &node.children {
            let cid = self.instantiate(c);
            self.link(id, cid);
        }
        id
    }

    /// Allocate detached copies of every node in `fragment`, in order.
    pub fn instantiate_fragment(&mut self, fragment: &Fragment) -> Vec<NodeId> {
        fragment.nodes.iter().map(|n| self.instantiate(n)).collect()
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let data = NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(data);
            return NodeId {
                idx,
                generation: slot.generation,
            };
        }
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(data),
        });
        NodeId { idx, generation: 0 }
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        let slot = self.slots.get(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn require(&self, id: NodeId) -> TickerResult<&NodeData> {
        self.data(id)
            .ok_or_else(|| TickerError::dom(format!("stale node handle {id}")))
    }

    fn require_element(&self, id: NodeId) -> TickerResult<()> {
        match self.require(id)?.kind {
            NodeKind::Element(_) => Ok(()),
            NodeKind::Text(_) => Err(TickerError::dom(format!("node {id} is not an element"))),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> TickerResult<&mut ElementData> {
        let data = self
            .data_mut(id)
            .ok_or_else(|| TickerError::dom(format!("stale node handle {id}")))?;
        match &mut data.kind {
            NodeKind::Element(e) => Ok(e),
            NodeKind::Text(_) => Err(TickerError::dom(format!("node {id} is not an element"))),
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cur = Some(of);
        while let Some(n) = cur {
            if n == candidate {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    fn is_style_element(&self, id: NodeId) -> bool {
        self.tag(id) == Some("style")
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(c) = self.data_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.data_mut(parent) {
            p.children.push(child);
        }
        if self.is_style_element(child) {
            self.sheet_revision += 1;
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.data_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.data_mut(child) {
            c.parent = None;
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        for n in self.descendants(id) {
            if let Some(slot) = self.slots.get_mut(n.idx as usize) {
                slot.node = None;
                self.free.push(n.idx);
            }
        }
    }

    fn touch_tree(&mut self, parent: NodeId) {
        self.layout_revision += 1;
        if self.is_style_element(parent) {
            self.sheet_revision += 1;
        }
    }
}

fn is_paint_only(name: &str) -> bool {
    PAINT_ONLY_PROPERTIES.contains(&name.to_ascii_lowercase().as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/dom/node.rs"]
mod tests;
