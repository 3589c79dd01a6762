//! weft DOM
//!
//! Arena-allocated DOM tree for detached documents and live frame
//! regions. Nodes are addressed by `NodeId` handles; moving content
//! between parents (or documents) transfers ownership of the handles
//! rather than cloning text.

mod document;
mod node;
mod tree;

pub use document::Document;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}
