//! Document - high-level document API

use crate::{DomTree, NodeId};

/// A document: one arena tree plus the URL it was loaded from.
///
/// A document may be "live" (the page the frame controller mutates) or
/// "foreign" (parsed from a response body, detached from the page).
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    url: String,
    root: NodeId,
}

impl Document {
    /// Create a new empty document
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let root = tree.create_document();
        Self {
            tree,
            url: url.to_string(),
            root,
        }
    }

    /// Document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Document root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// First element whose `id` attribute matches
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.root)
            .find(|&node| self.tree.attribute(node, "id") == Some(id))
    }

    /// Deep-clone a subtree from a foreign document into this one.
    /// The copy comes back detached; foreign handles are never adopted
    /// directly.
    pub fn import_node(&mut self, source: &Document, node: NodeId) -> NodeId {
        tracing::debug!(url = %source.url, "importing foreign node");
        self.tree.import_from(&source.tree, node)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_by_id() {
        let mut doc = Document::new("https://example.com/");
        let root = doc.root();
        let div = doc.tree_mut().create_element("div");
        doc.tree_mut().set_attribute(div, "id", "target");
        doc.tree_mut().append_child(root, div);

        assert_eq!(doc.element_by_id("target"), Some(div));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_import_node_is_detached() {
        let mut foreign = Document::new("about:blank");
        let root = foreign.root();
        let frame = foreign.tree_mut().create_element("weft-frame");
        foreign.tree_mut().set_attribute(frame, "id", "messages");
        foreign.tree_mut().append_child(root, frame);

        let mut live = Document::new("https://example.com/");
        let imported = live.import_node(&foreign, frame);

        assert!(live.tree().get(imported).unwrap().parent.is_none());
        assert_eq!(live.tree().attribute(imported, "id"), Some("messages"));
        // Imported copies do not show up in id lookups until attached
        assert_eq!(live.element_by_id("messages"), None);
    }
}
