//! Offset assignment: lays the minimized graph out as one flat edge table.
//!
//! Every node with children owns a contiguous block of `child_count` slots.
//! Blocks are handed out in [`Preorder`], the same walk the
//! [emitter](super::emit) uses, so the emitted edges land exactly on their
//! node's block.

use hashbrown::HashSet;
use tracing::debug;

use super::encode::NO_TARGET;
use super::error::{DawgError, Result};
use super::node_arena::NodeId;
use super::trie::{Stage, Trie};

/// Depth-first preorder over the nodes reachable from the root.
///
/// Each node is yielded once no matter how many parents share it. Children
/// are visited in insertion order, so the walk is deterministic.
#[derive(Clone, Debug)]
pub struct Preorder<'t> {
    trie: &'t Trie,
    stack: Vec<NodeId>,
    visited: HashSet<NodeId>,
}

impl<'t> Preorder<'t> {
    fn new(trie: &'t Trie) -> Self {
        Preorder {
            trie,
            stack: vec![trie.root()],
            visited: HashSet::new(),
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let id = self.stack.pop()?;
            if !self.visited.insert(id) {
                continue;
            }
            let trie = self.trie;
            let visited = &self.visited;
            self.stack.extend(
                trie.node(id)
                    .children()
                    .rev()
                    .map(|(_, child)| child)
                    .filter(|child| !visited.contains(child)),
            );
            return Some(id);
        }
    }
}

impl Trie {
    /// Walks the nodes reachable from the root, each exactly once.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self)
    }

    /// Gives every reachable node with children the start of its block in the
    /// edge table and returns the table length.
    ///
    /// The root is visited first, so a root with children starts at offset 0.
    /// Nodes without children get no offset; edges into them carry the
    /// no-target sentinel instead. On success the trie is [`Stage::LaidOut`].
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::TooManyEdges`] if some block would start at an
    /// offset the 32-bit target field cannot hold. The trie is left untouched.
    pub fn assign_offsets(&mut self) -> Result<usize> {
        let order: Vec<NodeId> = self.preorder().collect();
        let edges: usize = order.iter().map(|&id| self.node(id).child_count()).sum();
        // Offsets stay strictly below the sentinel.
        if edges > NO_TARGET as usize {
            return Err(DawgError::TooManyEdges { edges });
        }

        let mut cursor = 0u32;
        for id in order {
            let node = self.node_mut(id);
            if node.has_children() {
                node.set_offset(cursor);
                // Fits: the total was checked above.
                cursor += node.child_count() as u32;
            }
        }
        debug_assert_eq!(cursor as usize, edges);
        self.set_stage(Stage::LaidOut);
        debug!(edges, "assigned edge offsets");
        Ok(edges)
    }
}
