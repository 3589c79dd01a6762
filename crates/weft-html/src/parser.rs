//! HTML5 parser
//!
//! Uses html5ever's built-in RcDom and converts to the weft DOM
//! format. Simpler and more reliable than implementing TreeSink
//! directly.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use weft_dom::{Document, DomTree, NodeId};

/// Parse an HTML string into a detached document
pub fn parse(html: &str) -> Document {
    parse_with_url(html, "about:blank")
}

/// Parse HTML with a base URL
pub fn parse_with_url(html: &str, url: &str) -> Document {
    tracing::debug!(url, bytes = html.len(), "parsing HTML document");

    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let mut document = Document::new(url);
    let root = document.root();
    convert_node(&dom.document, document.tree_mut(), root);

    tracing::debug!(nodes = document.tree().len(), "parsed document");
    document
}

/// Convert an RcDom node into the arena tree under `parent`
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
        }
        RcNodeData::Doctype { .. } => {
            // Not retained; fragments only need the element tree
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.trim().is_empty() {
                let id = tree.create_text(&text);
                tree.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(&contents.to_string());
            tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(name.local.as_ref());
            for attr in attrs.borrow().iter() {
                tree.set_attribute(id, attr.name.local.as_ref(), &attr.value);
            }
            tree.append_child(parent, id);
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        RcNodeData::ProcessingInstruction { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_document() {
        let doc = parse("<html><body><p id=\"intro\">Hello</p></body></html>");
        let p = doc.element_by_id("intro").unwrap();

        assert_eq!(doc.tree().tag_name(p), Some("p"));
        assert_eq!(doc.tree().text_content(p), "Hello");
    }

    #[test]
    fn test_parse_custom_frame_element() {
        let doc = parse(
            "<body><weft-frame id=\"messages\" src=\"/messages\" recurse=\"messages\">\
             <div>inner</div></weft-frame></body>",
        );
        let frame = doc.element_by_id("messages").unwrap();

        assert_eq!(doc.tree().tag_name(frame), Some("weft-frame"));
        assert_eq!(doc.tree().attribute(frame, "src"), Some("/messages"));
        assert!(doc.tree().token_list_contains(frame, "recurse", "messages"));
    }

    #[test]
    fn test_whitespace_text_skipped() {
        let doc = parse("<body>   <div id=\"d\"></div>   </body>");
        let d = doc.element_by_id("d").unwrap();
        assert_eq!(doc.tree().text_content(d), "");
    }
}
