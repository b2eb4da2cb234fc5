/// Word list to edge table pipeline: word-list reading, build statistics.
pub mod builder;
/// Outgoing edges of a node and the node type itself.
pub mod children;
/// Edge table emission.
pub mod emit;
/// The packed 64-bit edge format.
pub mod encode;
/// Error type shared by the whole pipeline.
pub mod error;
/// Conversion of words into single-byte labels.
pub mod label;
/// Block offset assignment and the shared preorder walk.
pub mod layout;
/// Suffix sharing by structural node merging.
pub mod minimize;
/// Index-based node storage.
pub mod node_arena;
/// Loading and querying packed edge tables.
pub mod reader;
/// Prefix tree construction.
pub mod trie;

pub use builder::{
    build_dawg, compile_file, read_words, BuildStats, Builder, CompileOptions, CompiledDawg,
};
pub use children::TrieNode;
pub use encode::Edge;
pub use error::{DawgError, Result};
pub use label::IntoWord;
pub use minimize::MinimizeStats;
pub use node_arena::NodeId;
pub use reader::{EdgeTable, NodeIndex};
pub use trie::{Stage, Trie};
