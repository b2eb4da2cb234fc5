use itertools::{Itertools, Position};
use tracing::debug;

use super::encode::Edge;
use super::error::{DawgError, Result};
use super::trie::{Stage, Trie};

impl Trie {
    /// Produces the edge table of a trie whose offsets have been assigned.
    ///
    /// Nodes are walked in the same [`Preorder`](super::layout::Preorder) as
    /// [`assign_offsets`](Trie::assign_offsets), so each node's edges are
    /// pushed exactly when the table reaches that node's offset, and a shared
    /// node is emitted once.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::NotLaidOut`] unless the offsets are current, i.e.
    /// [`assign_offsets`](Trie::assign_offsets) ran after the last change to
    /// the graph.
    pub fn emit_edges(&self) -> Result<Vec<Edge>> {
        if self.stage() != Stage::LaidOut {
            return Err(DawgError::NotLaidOut {
                stage: self.stage(),
            });
        }
        let mut edges = Vec::new();
        for id in self.preorder() {
            let node = self.node(id);
            if !node.has_children() {
                continue;
            }
            debug_assert_eq!(node.offset(), Some(edges.len() as u32), "block out of place");
            edges.extend(node.children().with_position().map(|(position, (label, child))| {
                let child = self.node(child);
                Edge {
                    label,
                    leads_to_word_end: child.is_word_end(),
                    // Childless nodes never get an offset.
                    target: child.offset(),
                    is_last_in_group: matches!(position, Position::Last | Position::Only),
                }
            }));
        }
        debug!(edges = edges.len(), "emitted edge table");
        Ok(edges)
    }
}
