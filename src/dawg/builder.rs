use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::encode::{encode_edges, write_edges, Edge, EDGE_BYTES};
use super::error::{DawgError, Result};
use super::label::IntoWord;
use super::reader::EdgeTable;
use super::trie::Trie;

/// Options for reading word lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Skip lines whose first non-blank character is `#`.
    pub skip_comments: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            skip_comments: true,
        }
    }
}

/// Sizes observed while building one edge table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Words inserted, duplicates included.
    pub words: usize,
    /// Nodes of the trie before minimization.
    pub trie_nodes: usize,
    /// Nodes left after minimization, root included.
    pub dawg_nodes: usize,
    /// Edges in the table.
    pub edges: usize,
}

impl BuildStats {
    /// Size of the encoded table in bytes.
    pub fn bytes(&self) -> usize {
        self.edges * EDGE_BYTES
    }
}

/// A minimized, laid out DAWG ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledDawg {
    edges: Vec<Edge>,
    stats: BuildStats,
}

impl CompiledDawg {
    /// The edge table, root block first.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sizes observed during the build.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// The encoded table.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_edges(&self.edges)
    }

    /// Writes the encoded table to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_edges(&self.edges, path)
    }

    /// Turns the table into a lookup structure.
    pub fn into_table(self) -> EdgeTable {
        EdgeTable::from(self.edges)
    }
}

/// Collects words into a trie and compiles them in one batch.
///
/// Unlike an incremental DAWG builder, words may come in any order: the whole
/// trie is built first and minimized afterwards.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    trie: Trie,
    words: usize,
}

impl Builder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::Label`] if a character does not fit in one byte.
    pub fn add_word(&mut self, word: impl IntoWord) -> Result<()> {
        self.trie.insert(word)?;
        self.words += 1;
        Ok(())
    }

    /// Minimizes the trie, lays it out and emits the edge table.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::TooManyEdges`] if the table cannot be addressed by
    /// 32-bit targets.
    pub fn build(self) -> Result<CompiledDawg> {
        let Builder { mut trie, words } = self;
        debug!(words, trie_nodes = trie.node_count(), "built trie");
        let minimized = trie.minimize();
        let edge_count = trie.assign_offsets()?;
        let edges = trie.emit_edges()?;
        debug_assert_eq!(edges.len(), edge_count);
        Ok(CompiledDawg {
            stats: BuildStats {
                words,
                trie_nodes: minimized.trie_nodes,
                dawg_nodes: minimized.dawg_nodes,
                edges: edges.len(),
            },
            edges,
        })
    }
}

/// Builds the edge table of a word list.
///
/// # Examples
///
/// ```
/// use dawgc::dawg::builder::build_dawg;
///
/// let dawg = build_dawg(["cat", "cats", "car"]).unwrap();
/// assert_eq!(dawg.stats().edges, 5);
///
/// let table = dawg.into_table();
/// assert!(table.contains("cats"));
/// assert!(!table.contains("ca"));
/// ```
pub fn build_dawg<W: IntoWord>(words: impl IntoIterator<Item = W>) -> Result<CompiledDawg> {
    let mut builder = Builder::new();
    for word in words {
        builder.add_word(word)?;
    }
    builder.build()
}

/// Reads a newline-delimited word list.
///
/// Each line is decoded as UTF-8, or as Latin-1 if it is not valid UTF-8, so
/// single-byte word lists load with one character per byte. Whitespace
/// (including `\r`) is trimmed from both ends, empty lines are skipped, and so
/// are comment lines unless `options` keeps them.
pub fn read_words(path: &Path, options: &CompileOptions) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|source| DawgError::ReadWords {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_words(&bytes, options))
}

fn parse_words(bytes: &[u8], options: &CompileOptions) -> Vec<String> {
    bytes
        .split(|&b| b == b'\n')
        .map(decode_line)
        .filter_map(|line| {
            let word = line.trim();
            let skip = word.is_empty() || (options.skip_comments && is_comment(word));
            (!skip).then(|| word.to_string())
        })
        .collect()
}

fn decode_line(line: &[u8]) -> String {
    match std::str::from_utf8(line) {
        Ok(text) => text.to_string(),
        Err(_) => line.iter().copied().map(char::from).collect(),
    }
}

/// Compiles the word list at `input` into an edge table file at `output`.
///
/// Nothing is written unless the whole build succeeds.
pub fn compile_file(input: &Path, output: &Path, options: &CompileOptions) -> Result<BuildStats> {
    let words = read_words(input, options)?;
    let dawg = build_dawg(&words)?;
    dawg.write(output)?;
    let stats = dawg.stats();
    info!(
        input = %input.display(),
        output = %output.display(),
        words = stats.words,
        trie_nodes = stats.trie_nodes,
        dawg_nodes = stats.dawg_nodes,
        edges = stats.edges,
        bytes = stats.bytes(),
        "compiled word list"
    );
    Ok(stats)
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
