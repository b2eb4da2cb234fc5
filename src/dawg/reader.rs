use std::fs;
use std::path::Path;

use super::encode::{Edge, EDGE_BYTES};
use super::error::{DawgError, Result};
use super::label::IntoWord;

/// Position of a node's block in an [`EdgeTable`].
///
/// A node is really just the first edge of its block, so this is an edge index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Stands for a node without outgoing edges.
    pub const NULL: NodeIndex = NodeIndex(u32::MAX);

    /// True if this is the null node.
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    fn of_target(target: Option<u32>) -> Self {
        target.map_or(Self::NULL, NodeIndex)
    }
}

/// A loaded edge table, answering lookups the way any runtime consumer of
/// `dawg.bin` does.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeTable {
    edges: Vec<Edge>,
}

impl From<Vec<Edge>> for EdgeTable {
    fn from(edges: Vec<Edge>) -> Self {
        EdgeTable { edges }
    }
}

impl EdgeTable {
    /// Decodes a table from its byte representation.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::Truncated`] if the length is not a multiple of 8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % EDGE_BYTES != 0 {
            return Err(DawgError::Truncated { len: bytes.len() });
        }
        let edges = bytes
            .chunks_exact(EDGE_BYTES)
            .map(|chunk| {
                let mut word = [0u8; EDGE_BYTES];
                word.copy_from_slice(chunk);
                Edge::decode(u64::from_le_bytes(word))
            })
            .collect();
        Ok(EdgeTable { edges })
    }

    /// Reads and decodes a table file.
    pub fn read_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| DawgError::ReadEdges {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// All edges, in table order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges in the table.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if the table has no edges, i.e. accepts no word.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The root node; null when the table is empty.
    pub fn root(&self) -> NodeIndex {
        if self.edges.is_empty() {
            NodeIndex::NULL
        } else {
            NodeIndex(0)
        }
    }

    /// Iterates the block of `node`, up to and including its terminating edge.
    ///
    /// The null node, or any index past the end of the table, has no edges.
    pub fn child_edges(&self, node: NodeIndex) -> impl Iterator<Item = &Edge> + '_ {
        let block = self.edges.get(node.0 as usize..).unwrap_or_default();
        let mut done = false;
        block.iter().take_while(move |edge| {
            let take = !done;
            done |= edge.is_last_in_group;
            take
        })
    }

    /// Labels leaving `node`, in table order.
    pub fn children(&self, node: NodeIndex) -> Vec<u8> {
        self.child_edges(node).map(|edge| edge.label).collect()
    }

    /// Finds the edge labelled `label` leaving `node`.
    pub fn leaving_edge(&self, node: NodeIndex, label: u8) -> Option<&Edge> {
        self.child_edges(node).find(|edge| edge.label == label)
    }

    /// Follows `labels` from `start` and returns the last edge taken.
    ///
    /// `None` if some label has no matching edge, or if `labels` is empty.
    pub fn walk(&self, start: NodeIndex, labels: &[u8]) -> Option<&Edge> {
        let (&first, rest) = labels.split_first()?;
        let mut edge = self.leaving_edge(start, first)?;
        for &label in rest {
            edge = self.leaving_edge(NodeIndex::of_target(edge.target), label)?;
        }
        Some(edge)
    }

    /// Continues a walk from an edge already taken.
    ///
    /// Returns `prior` itself when `labels` is empty.
    pub fn walk_from_prior_edge<'t>(&'t self, prior: &'t Edge, labels: &[u8]) -> Option<&'t Edge> {
        if labels.is_empty() {
            return Some(prior);
        }
        self.walk(NodeIndex::of_target(prior.target), labels)
    }

    /// True if the table accepts `word`.
    ///
    /// The format cannot mark the root as a word end, so the empty word is
    /// never accepted.
    pub fn contains(&self, word: impl IntoWord) -> bool {
        word.into_labels()
            .ok()
            .and_then(|labels| self.walk(self.root(), &labels))
            .is_some_and(|edge| edge.leads_to_word_end)
    }

    /// Every accepted word as raw labels, in table order.
    pub fn label_words(&self) -> Vec<Vec<u8>> {
        let mut words = Vec::new();
        let mut stack: Vec<(&Edge, Vec<u8>)> = Vec::new();
        stack.extend(pending(self.child_edges(self.root()), &[]));
        while let Some((edge, mut word)) = stack.pop() {
            word.push(edge.label);
            if edge.leads_to_word_end {
                words.push(word.clone());
            }
            let target = NodeIndex::of_target(edge.target);
            stack.extend(pending(self.child_edges(target), &word));
        }
        words
    }

    /// Every accepted word, reading each label as a character code.
    pub fn words(&self) -> Vec<String> {
        self.label_words()
            .into_iter()
            .map(|labels| labels.into_iter().map(char::from).collect())
            .collect()
    }
}

/// Stacks a block's edges so that the first one is popped first.
fn pending<'t>(
    block: impl Iterator<Item = &'t Edge>,
    prefix: &[u8],
) -> impl Iterator<Item = (&'t Edge, Vec<u8>)> {
    let block: Vec<_> = block.map(|edge| (edge, prefix.to_vec())).collect();
    block.into_iter().rev()
}
