//! Shared test harness: a scripted host environment plus DOM fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use weft_core::{EventName, FrameEvent, HostEnvironment, ScrollBlock};
use weft_dom::{Document, NodeId};
use weft_net::{FetchResponse, StubTransport, Transport, TransportLog};

use std::cell::RefCell;
use std::rc::Rc;

/// Host backed by scripted transports that records everything the
/// core asks of it.
#[derive(Default)]
pub struct TestHost {
    pub cookies: HashMap<String, String>,
    pub metas: HashMap<String, String>,
    pub transports: VecDeque<Box<dyn Transport>>,
    pub events: Vec<FrameEvent>,
    pub prevent: HashSet<EventName>,
    pub scrolled: Vec<(NodeId, ScrollBlock)>,
    pub focused: Vec<NodeId>,
    pub frames_awaited: usize,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transport that settles with the given response, and
    /// keep a handle to its request log.
    pub fn respond(&mut self, response: FetchResponse) -> Rc<RefCell<TransportLog>> {
        let transport = StubTransport::response(response);
        let log = transport.log();
        self.transports.push_back(Box::new(transport));
        log
    }

    pub fn push_transport(&mut self, transport: Box<dyn Transport>) {
        self.transports.push_back(transport);
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    pub fn set_meta(&mut self, name: &str, content: &str) {
        self.metas.insert(name.to_string(), content.to_string());
    }

    /// Names of all recorded notifications, in dispatch order
    pub fn event_names(&self) -> Vec<EventName> {
        self.events.iter().map(|event| event.name).collect()
    }
}

#[async_trait(?Send)]
impl HostEnvironment for TestHost {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.metas.get(name).cloned()
    }

    fn create_transport(&mut self) -> Box<dyn Transport> {
        self.transports
            .pop_front()
            .expect("test scripted fewer transports than the core requested")
    }

    fn dispatch(&mut self, _document: &Document, event: &mut FrameEvent) {
        if self.prevent.contains(&event.name) {
            event.prevent_default();
        }
        self.events.push(event.clone());
    }

    async fn next_animation_frame(&mut self) {
        self.frames_awaited += 1;
    }

    fn scroll_into_view(&mut self, _document: &Document, element: NodeId, block: ScrollBlock) {
        self.scrolled.push((element, block));
    }

    fn focus(&mut self, _document: &Document, element: NodeId) {
        self.focused.push(element);
    }
}

/// A live page at https://example.com/ containing one frame element
pub fn page_with_frame(id: &str) -> (Document, NodeId) {
    let mut doc = Document::new("https://example.com/");
    let root = doc.root();
    let body = doc.tree_mut().create_element("body");
    doc.tree_mut().append_child(root, body);
    let frame = doc.tree_mut().create_element("weft-frame");
    doc.tree_mut().set_attribute(frame, "id", id);
    doc.tree_mut().append_child(body, frame);
    (doc, frame)
}

/// Append an element with attributes under `parent`
pub fn add_element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let node = doc.tree_mut().create_element(tag);
    for (name, value) in attrs {
        doc.tree_mut().set_attribute(node, name, value);
    }
    doc.tree_mut().append_child(parent, node);
    node
}

/// A form with one text input, appended under `parent`
pub fn add_form(
    doc: &mut Document,
    parent: NodeId,
    method: &str,
    action: &str,
    field: (&str, &str),
) -> NodeId {
    let form = add_element(doc, parent, "form", &[("method", method), ("action", action)]);
    add_element(doc, form, "input", &[("name", field.0), ("value", field.1)]);
    form
}
