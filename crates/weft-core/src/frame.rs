//! Frame element helpers
//!
//! A frame is a `<weft-frame id=...>` element; its id is its logical
//! identity for targeting and for matching response content.

use weft_dom::{Document, NodeId};

/// Tag name of frame elements
pub const FRAME_TAG: &str = "weft-frame";

/// Scoping attribute on links/forms naming the frame that should
/// handle their navigation
pub const FRAME_TARGET_ATTRIBUTE: &str = "data-weft-frame";

/// Request header carrying the navigating frame's id
pub const FRAME_HEADER: &str = "Weft-Frame";

/// Check whether a node is a frame element
pub fn is_frame_element(document: &Document, node: NodeId) -> bool {
    document.tree().tag_name(node) == Some(FRAME_TAG)
}

/// Find an attached frame element by id
pub fn frame_element_by_id(document: &Document, id: &str) -> Option<NodeId> {
    let tree = document.tree();
    tree.descendants(document.root()).find(|&node| {
        tree.tag_name(node) == Some(FRAME_TAG) && tree.attribute(node, "id") == Some(id)
    })
}

/// Scoping id governing an element's navigation: the submitter's
/// scoping attribute wins, else the element's, else the frame's own
/// `target` attribute. Empty values count as absent.
pub fn navigation_target<'a>(
    document: &'a Document,
    element: NodeId,
    submitter: Option<NodeId>,
    frame: NodeId,
) -> Option<&'a str> {
    let tree = document.tree();
    submitter
        .and_then(|s| tree.attribute(s, FRAME_TARGET_ATTRIBUTE))
        .or_else(|| tree.attribute(element, FRAME_TARGET_ATTRIBUTE))
        .or_else(|| tree.attribute(frame, "target"))
        .filter(|v| !v.is_empty())
}

/// Resolve the frame owning an element's navigation: the scoping id
/// if it names an existing frame, else `fallback`.
pub fn find_frame_element(
    document: &Document,
    element: NodeId,
    submitter: Option<NodeId>,
    fallback: NodeId,
) -> NodeId {
    navigation_target(document, element, submitter, fallback)
        .and_then(|id| frame_element_by_id(document, id))
        .unwrap_or(fallback)
}

/// Disabled frames neither intercept nor navigate
pub fn frame_disabled(document: &Document, frame: NodeId) -> bool {
    document.tree().has_attribute(frame, "disabled")
}

/// A nested placeholder frame that loads further content: it carries
/// a `src` and lists `id` in its `recurse` token list.
pub fn recursing_placeholder(document: &Document, id: &str) -> Option<NodeId> {
    let tree = document.tree();
    tree.descendants(document.root()).find(|&node| {
        tree.tag_name(node) == Some(FRAME_TAG)
            && tree.has_attribute(node, "src")
            && tree.token_list_contains(node, "recurse", id)
    })
}

/// First element bearing the autofocus marker within a subtree
pub fn first_autofocusable(document: &Document, root: NodeId) -> Option<NodeId> {
    let tree = document.tree();
    tree.descendants(root)
        .find(|&node| tree.has_attribute(node, "autofocus"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_dom::Document;

    fn doc_with_frame(id: &str) -> (Document, NodeId) {
        let mut doc = Document::new("https://example.com/");
        let root = doc.root();
        let frame = doc.tree_mut().create_element(FRAME_TAG);
        doc.tree_mut().set_attribute(frame, "id", id);
        doc.tree_mut().append_child(root, frame);
        (doc, frame)
    }

    #[test]
    fn test_frame_element_by_id_requires_frame_tag() {
        let (mut doc, frame) = doc_with_frame("messages");
        let root = doc.root();
        let div = doc.tree_mut().create_element("div");
        doc.tree_mut().set_attribute(div, "id", "plain");
        doc.tree_mut().append_child(root, div);

        assert_eq!(frame_element_by_id(&doc, "messages"), Some(frame));
        assert_eq!(frame_element_by_id(&doc, "plain"), None);
    }

    #[test]
    fn test_find_frame_element_falls_back() {
        let (mut doc, frame) = doc_with_frame("messages");
        let root = doc.root();
        let link = doc.tree_mut().create_element("a");
        doc.tree_mut().append_child(root, link);

        assert_eq!(find_frame_element(&doc, link, None, frame), frame);

        doc.tree_mut()
            .set_attribute(link, FRAME_TARGET_ATTRIBUTE, "missing");
        assert_eq!(find_frame_element(&doc, link, None, frame), frame);

        doc.tree_mut()
            .set_attribute(link, FRAME_TARGET_ATTRIBUTE, "messages");
        assert_eq!(find_frame_element(&doc, link, None, frame), frame);
    }

    #[test]
    fn test_navigation_target_precedence() {
        let (mut doc, frame) = doc_with_frame("messages");
        let root = doc.root();
        let form = doc.tree_mut().create_element("form");
        doc.tree_mut().append_child(root, form);
        let button = doc.tree_mut().create_element("button");
        doc.tree_mut().append_child(form, button);

        assert_eq!(navigation_target(&doc, form, Some(button), frame), None);

        doc.tree_mut().set_attribute(frame, "target", "from-frame");
        assert_eq!(
            navigation_target(&doc, form, Some(button), frame),
            Some("from-frame")
        );

        doc.tree_mut()
            .set_attribute(form, FRAME_TARGET_ATTRIBUTE, "from-form");
        assert_eq!(
            navigation_target(&doc, form, Some(button), frame),
            Some("from-form")
        );

        doc.tree_mut()
            .set_attribute(button, FRAME_TARGET_ATTRIBUTE, "from-button");
        assert_eq!(
            navigation_target(&doc, form, Some(button), frame),
            Some("from-button")
        );
    }

    #[test]
    fn test_recursing_placeholder_needs_src_and_token() {
        let (mut doc, frame) = doc_with_frame("outer");
        doc.tree_mut().set_attribute(frame, "recurse", "messages");
        assert_eq!(recursing_placeholder(&doc, "messages"), None);

        doc.tree_mut().set_attribute(frame, "src", "/messages");
        assert_eq!(recursing_placeholder(&doc, "messages"), Some(frame));
        assert_eq!(recursing_placeholder(&doc, "other"), None);
    }
}
