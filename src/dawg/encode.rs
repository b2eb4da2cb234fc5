//! The packed edge format.
//!
//! Every edge is one `u64`, stored little-endian:
//!
//! | bits  | field                                                  |
//! |-------|--------------------------------------------------------|
//! | 0–7   | label byte                                             |
//! | 8     | word terminator: the target node ends a word           |
//! | 16    | node terminator: last edge of its source node's block  |
//! | 32–63 | target block offset, or all ones for a childless target |
//!
//! A table is just these integers back to back, with no header.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::error::{DawgError, Result};

/// Bit position of the word terminator flag.
pub const WORD_TERMINATOR_BIT: u32 = 8;
/// Bit position of the node terminator flag.
pub const NODE_TERMINATOR_BIT: u32 = 16;
/// Shift of the 32-bit target field.
pub const TARGET_SHIFT: u32 = 32;
/// Target value of an edge into a node without outgoing edges.
pub const NO_TARGET: u32 = u32::MAX;
/// Size of one encoded edge in bytes.
pub const EDGE_BYTES: usize = std::mem::size_of::<u64>();

/// One transition of the DAWG, as laid out in the edge table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Label byte of the transition.
    pub label: u8,
    /// True if the target node ends a word.
    pub leads_to_word_end: bool,
    /// Start of the target node's block; `None` if the target has no edges.
    pub target: Option<u32>,
    /// True for the last edge of its source node's block.
    pub is_last_in_group: bool,
}

impl Edge {
    /// Packs the edge into its wire representation.
    ///
    /// A `target` of `Some(NO_TARGET)` is indistinguishable from `None`;
    /// offset assignment never produces it.
    #[inline]
    pub fn encode(&self) -> u64 {
        let mut packed = u64::from(self.label);
        if self.leads_to_word_end {
            packed |= 1 << WORD_TERMINATOR_BIT;
        }
        if self.is_last_in_group {
            packed |= 1 << NODE_TERMINATOR_BIT;
        }
        packed | (u64::from(self.target.unwrap_or(NO_TARGET)) << TARGET_SHIFT)
    }

    /// Unpacks an edge from its wire representation.
    #[inline]
    pub fn decode(packed: u64) -> Self {
        let target = (packed >> TARGET_SHIFT) as u32;
        Edge {
            label: packed as u8,
            leads_to_word_end: (packed >> WORD_TERMINATOR_BIT) & 1 == 1,
            target: (target != NO_TARGET).then_some(target),
            is_last_in_group: (packed >> NODE_TERMINATOR_BIT) & 1 == 1,
        }
    }
}

impl From<Edge> for u64 {
    fn from(edge: Edge) -> u64 {
        edge.encode()
    }
}

impl From<u64> for Edge {
    fn from(packed: u64) -> Edge {
        Edge::decode(packed)
    }
}

/// Encodes a table into its byte representation.
pub fn encode_edges(edges: &[Edge]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(edges.len() * EDGE_BYTES);
    for edge in edges {
        bytes.extend_from_slice(&edge.encode().to_le_bytes());
    }
    bytes
}

/// Writes the encoded table to `writer`, index 0 first.
pub fn write_edges_to<W: Write>(edges: &[Edge], writer: W) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for edge in edges {
        writer.write_all(&edge.encode().to_le_bytes())?;
    }
    writer.flush()
}

/// Writes the encoded table to a file, replacing any previous content.
pub fn write_edges(edges: &[Edge], path: &Path) -> Result<()> {
    let write = || -> io::Result<()> {
        let file = File::create(path)?;
        write_edges_to(edges, &file)?;
        file.sync_all()
    };
    write().map_err(|source| DawgError::WriteEdges {
        path: path.to_path_buf(),
        source,
    })
}
