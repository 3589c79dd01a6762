//! DOM Tree (arena-based allocation)
//!
//! All structural mutation goes through the tree so sibling/parent
//! links stay consistent. Detached nodes keep their arena slot; they
//! are simply unlinked.

use crate::{ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Default, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.idx())
    }

    /// Number of nodes in the arena (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached document node
    pub fn create_document(&mut self) -> NodeId {
        self.push(Node::detached(NodeData::Document))
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::detached(NodeData::Element(ElementData::new(tag))))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::detached(NodeData::Text(content.to_string())))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::detached(NodeData::Comment(content.to_string())))
    }

    // Structure

    /// Append `child` as the last child of `parent`, detaching it from
    /// any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.nodes[parent.idx()].last_child;
        {
            let node = &mut self.nodes[child.idx()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_some() {
            self.nodes[last.idx()].next_sibling = child;
        } else {
            self.nodes[parent.idx()].first_child = child;
        }
        self.nodes[parent.idx()].last_child = child;
    }

    /// Unlink a node from its parent and siblings. The node (and its
    /// subtree) stays alive in the arena, detached.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.idx()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if prev.is_some() {
            self.nodes[prev.idx()].next_sibling = next;
        } else if parent.is_some() {
            self.nodes[parent.idx()].first_child = next;
        }
        if next.is_some() {
            self.nodes[next.idx()].prev_sibling = prev;
        } else if parent.is_some() {
            self.nodes[parent.idx()].last_child = prev;
        }
        let node = &mut self.nodes[id.idx()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Detach all children of `parent` in order and return their
    /// handles. This is a move: node identity and order are preserved.
    pub fn extract_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children: Vec<NodeId> = self.children(parent).collect();
        for &child in &children {
            self.detach(child);
        }
        children
    }

    /// Atomically replace the children of `parent` with `children`.
    /// The previous children are detached and discarded.
    pub fn replace_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        let _ = self.extract_children(parent);
        for child in children {
            self.append_child(parent, child);
        }
    }

    /// Deep-copy a subtree from a foreign tree into this one,
    /// returning the detached handle of the copy.
    pub fn import_from(&mut self, source: &DomTree, node: NodeId) -> NodeId {
        let data = source.nodes[node.idx()].data.clone();
        let imported = self.push(Node::detached(data));
        let mut child = source.nodes[node.idx()].first_child;
        while child.is_some() {
            let copy = self.import_from(source, child);
            self.append_child(imported, copy);
            child = source.nodes[child.idx()].next_sibling;
        }
        imported
    }

    // Traversal

    /// Iterate over the direct children of a node
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self
                .get(parent)
                .map(|n| n.first_child)
                .unwrap_or(NodeId::NONE),
        }
    }

    /// Iterate over all descendants of a node in document order,
    /// excluding the node itself.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self
                .get(root)
                .map(|n| n.first_child)
                .unwrap_or(NodeId::NONE),
        }
    }

    /// First child that is an element
    pub fn first_element_child(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent)
            .find(|&id| self.nodes[id.idx()].is_element())
    }

    // Element conveniences

    /// Lowercase tag name, if the node is an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Attribute value, if the node is an element carrying it
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Set an attribute; no-op on non-elements
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.set_attr(name, value);
        }
    }

    /// Remove an attribute; no-op on non-elements
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.remove_attr(name);
        }
    }

    /// Check attribute presence
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get(id)
            .and_then(|n| n.as_element())
            .map(|e| e.has_attr(name))
            .unwrap_or(false)
    }

    /// Check whether a whitespace-separated attribute contains a token
    pub fn token_list_contains(&self, id: NodeId, name: &str, token: &str) -> bool {
        self.attribute(id, name)
            .map(|value| value.split_ascii_whitespace().any(|t| t == token))
            .unwrap_or(false)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            out.push_str(text);
        }
        for child in self.descendants(id) {
            if let Some(text) = self.nodes[child.idx()].as_text() {
                out.push_str(text);
            }
        }
        out
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next.is_none() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.nodes[current.idx()].next_sibling;
        Some(current)
    }
}

/// Pre-order iterator over descendants (root excluded)
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next.is_none() {
            return None;
        }
        let current = self.next;

        // Pre-order successor: first child, else next sibling, else
        // climb toward the root looking for an unvisited sibling.
        let node = &self.tree.nodes[current.idx()];
        self.next = if node.first_child.is_some() {
            node.first_child
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let n = &self.tree.nodes[cursor.idx()];
                if n.next_sibling.is_some() {
                    break n.next_sibling;
                }
                if n.parent.is_none() {
                    break NodeId::NONE;
                }
                cursor = n.parent;
            }
        };
        Some(current)
    }
}
