//! # dawgc
//!
//! Compiles a word list into a minimal
//! [DAWG](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! (Directed Acyclic Word Graph) and packs it into a flat table of 64-bit edges
//! that a game or spell checker can load and query without any parsing.
//!
//! The build runs in four stages over one in-memory graph:
//!
//! 1. a prefix [trie](dawg::trie) is built from every word,
//! 2. structurally identical subtrees are [merged](dawg::minimize) so suffixes
//!    are shared,
//! 3. every node with children gets a [block](dawg::layout) of contiguous slots
//!    in the edge table,
//! 4. the edges are [emitted](dawg::emit) and [packed](dawg::encode).
//!
//! ## Quick Start
//!
//! ```
//! use dawgc::dawg::build_dawg;
//!
//! let dawg = build_dawg(["BAKE", "CAKE", "FAKE", "LAKE", "MAKE"]).unwrap();
//! // B C F L M, then the shared A, K, E nodes
//! assert_eq!(dawg.stats().edges, 8);
//!
//! let table = dawg.into_table();
//! assert!(table.contains("CAKE"));
//! assert!(!table.contains("AKE"));
//! ```
//!
//! ## Wire format
//!
//! The table written by [`compile_file`](dawg::compile_file) has no header; it
//! is `edges × 8` bytes of little-endian `u64`s laid out as described in
//! [`dawg::encode`]. The root's block starts at edge 0. See
//! [`EdgeTable`](dawg::EdgeTable) for a reader.

#![warn(missing_docs)]

/// Core DAWG pipeline: trie, minimizer, layout, emitter, encoder and reader.
pub mod dawg;
