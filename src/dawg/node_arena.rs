//! An index-based arena for trie nodes.
//!
//! Nodes refer to each other through [`NodeId`]s instead of references, so after
//! minimization several parents can point at one shared child without any
//! ownership bookkeeping.

use std::ops::{Index, IndexMut};

use super::children::TrieNode;

/// Handle of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, always the first allocation of an arena.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only node storage. Nodes are never freed; nodes merged away during
/// minimization simply stop being referenced.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena {
    nodes: Vec<TrieNode>,
}

impl NodeArena {
    /// Creates an arena holding only an empty root.
    pub fn new() -> Self {
        NodeArena {
            nodes: vec![TrieNode::new(false)],
        }
    }

    /// Allocates a node and returns its handle.
    pub fn alloc(&mut self, node: TrieNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the number of nodes ever allocated, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = TrieNode;

    #[inline]
    fn index(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.nodes[id.0]
    }
}
