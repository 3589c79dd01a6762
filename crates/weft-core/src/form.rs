//! Form field-set serialization
//!
//! Derives the effective method/action of a submission (submitter
//! overrides first) and collects the form's field set the way a
//! native submit would, including submit-button value semantics.

use weft_dom::{Document, NodeId};
use weft_net::{FetchMethod, FormData, Location, NetError};

/// Effective method: submitter `formmethod`, else form `method`,
/// else GET. Unrecognized strings normalize to GET.
pub fn effective_method(document: &Document, form: NodeId, submitter: Option<NodeId>) -> FetchMethod {
    let tree = document.tree();
    let raw = submitter
        .and_then(|s| tree.attribute(s, "formmethod"))
        .filter(|v| !v.is_empty())
        .or_else(|| tree.attribute(form, "method"))
        .unwrap_or("");
    FetchMethod::from_str(raw).unwrap_or_default()
}

/// Effective action: submitter `formaction`, else form `action`, else
/// the document URL; resolved against the document URL.
pub fn effective_action(
    document: &Document,
    form: NodeId,
    submitter: Option<NodeId>,
) -> Result<Location, NetError> {
    let tree = document.tree();
    let action = submitter
        .and_then(|s| tree.attribute(s, "formaction"))
        .filter(|v| !v.is_empty())
        .or_else(|| tree.attribute(form, "action"))
        .unwrap_or("");
    if action.is_empty() {
        Location::wrap(document.url())
    } else {
        Location::wrap_with_base(action, document.url())
    }
}

/// Collect the form's field set in document order, appending the
/// submitter's name/value pair unless that exact pair is already
/// present.
pub fn build_form_data(document: &Document, form: NodeId, submitter: Option<NodeId>) -> FormData {
    let tree = document.tree();
    let mut data = FormData::new();

    for node in tree.descendants(form) {
        let Some(tag) = tree.tag_name(node) else {
            continue;
        };
        if tree.has_attribute(node, "disabled") {
            continue;
        }
        let Some(name) = tree.attribute(node, "name").filter(|n| !n.is_empty()) else {
            continue;
        };

        match tag {
            "input" => {
                let kind = tree
                    .attribute(node, "type")
                    .unwrap_or("text")
                    .to_ascii_lowercase();
                match kind.as_str() {
                    "submit" | "button" | "image" | "reset" | "file" => {}
                    "checkbox" | "radio" => {
                        if tree.has_attribute(node, "checked") {
                            data.append(name, tree.attribute(node, "value").unwrap_or("on"));
                        }
                    }
                    _ => data.append(name, tree.attribute(node, "value").unwrap_or("")),
                }
            }
            "textarea" => {
                data.append(name, &tree.text_content(node));
            }
            "select" => {
                let options: Vec<NodeId> = tree
                    .descendants(node)
                    .filter(|&o| tree.tag_name(o) == Some("option"))
                    .collect();
                let chosen = options
                    .iter()
                    .find(|&&o| tree.has_attribute(o, "selected"))
                    .or(options.first());
                if let Some(&option) = chosen {
                    let value = tree
                        .attribute(option, "value")
                        .map(str::to_string)
                        .unwrap_or_else(|| tree.text_content(option));
                    data.append(name, &value);
                }
            }
            _ => {}
        }
    }

    if let Some(submitter) = submitter {
        if let Some(name) = tree.attribute(submitter, "name").filter(|n| !n.is_empty()) {
            let value = tree.attribute(submitter, "value").unwrap_or("");
            if !data.contains_pair(name, value) {
                data.append(name, value);
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_dom::Document;

    fn form_doc() -> (Document, NodeId) {
        let mut doc = Document::new("https://example.com/messages");
        let root = doc.root();
        let form = doc.tree_mut().create_element("form");
        doc.tree_mut().append_child(root, form);
        (doc, form)
    }

    fn add_input(doc: &mut Document, form: NodeId, attrs: &[(&str, &str)]) -> NodeId {
        let input = doc.tree_mut().create_element("input");
        for (name, value) in attrs {
            doc.tree_mut().set_attribute(input, name, value);
        }
        doc.tree_mut().append_child(form, input);
        input
    }

    #[test]
    fn test_method_precedence() {
        let (mut doc, form) = form_doc();
        assert_eq!(effective_method(&doc, form, None), FetchMethod::Get);

        doc.tree_mut().set_attribute(form, "method", "post");
        assert_eq!(effective_method(&doc, form, None), FetchMethod::Post);

        let submitter = add_input(&mut doc, form, &[("type", "submit"), ("formmethod", "DELETE")]);
        assert_eq!(
            effective_method(&doc, form, Some(submitter)),
            FetchMethod::Delete
        );
    }

    #[test]
    fn test_action_precedence() {
        let (mut doc, form) = form_doc();
        assert_eq!(
            effective_action(&doc, form, None).unwrap().absolute_url(),
            "https://example.com/messages"
        );

        doc.tree_mut().set_attribute(form, "action", "/search");
        assert_eq!(
            effective_action(&doc, form, None).unwrap().absolute_url(),
            "https://example.com/search"
        );

        let submitter = add_input(&mut doc, form, &[("formaction", "/override")]);
        assert_eq!(
            effective_action(&doc, form, Some(submitter))
                .unwrap()
                .absolute_url(),
            "https://example.com/override"
        );
    }

    #[test]
    fn test_field_collection() {
        let (mut doc, form) = form_doc();
        add_input(&mut doc, form, &[("name", "title"), ("value", "hello")]);
        add_input(&mut doc, form, &[("name", "skip"), ("value", "x"), ("disabled", "")]);
        add_input(&mut doc, form, &[("name", "agree"), ("type", "checkbox"), ("checked", "")]);
        add_input(&mut doc, form, &[("name", "decline"), ("type", "checkbox")]);
        add_input(&mut doc, form, &[("name", "commit"), ("type", "submit"), ("value", "Save")]);

        let data = build_form_data(&doc, form, None);
        assert_eq!(data.get("title"), Some("hello"));
        assert_eq!(data.get("skip"), None);
        assert_eq!(data.get("agree"), Some("on"));
        assert_eq!(data.get("decline"), None);
        assert_eq!(data.get("commit"), None);
    }

    #[test]
    fn test_submitter_pair_appended_once() {
        let (mut doc, form) = form_doc();
        let submitter = add_input(
            &mut doc,
            form,
            &[("type", "submit"), ("name", "commit"), ("value", "Save")],
        );

        let data = build_form_data(&doc, form, Some(submitter));
        assert_eq!(data.len(), 1);
        assert!(data.contains_pair("commit", "Save"));

        // Already present with the exact value: not duplicated
        add_input(&mut doc, form, &[("name", "commit"), ("value", "Save")]);
        let data = build_form_data(&doc, form, Some(submitter));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_select_picks_selected_else_first() {
        let (mut doc, form) = form_doc();
        let select = doc.tree_mut().create_element("select");
        doc.tree_mut().set_attribute(select, "name", "color");
        doc.tree_mut().append_child(form, select);
        let red = doc.tree_mut().create_element("option");
        doc.tree_mut().set_attribute(red, "value", "red");
        doc.tree_mut().append_child(select, red);
        let blue = doc.tree_mut().create_element("option");
        doc.tree_mut().set_attribute(blue, "value", "blue");
        doc.tree_mut().append_child(select, blue);

        let data = build_form_data(&doc, form, None);
        assert_eq!(data.get("color"), Some("red"));

        doc.tree_mut().set_attribute(blue, "selected", "");
        let data = build_form_data(&doc, form, None);
        assert_eq!(data.get("color"), Some("blue"));
    }
}
