use std::io;
use std::path::PathBuf;

use super::trie::Stage;

/// Result alias used throughout the DAWG pipeline.
pub type Result<T, E = DawgError> = std::result::Result<T, E>;

/// Errors that abort a DAWG build or load.
///
/// None of these are recoverable: the pipeline never produces partial output.
#[derive(Debug, thiserror::Error)]
pub enum DawgError {
    /// A word contains a character that does not fit in a single-byte label.
    #[error("character {ch:?} in word {word:?} does not fit in a single-byte label")]
    Label {
        /// The offending word.
        word: String,
        /// The first character outside the label domain.
        ch: char,
    },
    /// The edge table is too large to be addressed by the 32-bit target field.
    #[error("edge table needs {edges} slots, more than a 32-bit target can address")]
    TooManyEdges {
        /// Number of edges the table would have needed.
        edges: usize,
    },
    /// A word was inserted after the graph was minimized or laid out.
    #[error("cannot insert {word:?}: the graph is {stage} and no longer accepts words")]
    Frozen {
        /// The rejected word, as labels read back into characters.
        word: String,
        /// Stage the graph had reached.
        stage: Stage,
    },
    /// Edges were requested from a graph whose offsets are missing or stale.
    #[error("cannot emit edges: the graph is {stage}, offsets must be assigned first")]
    NotLaidOut {
        /// Stage the graph had reached.
        stage: Stage,
    },
    /// The word list could not be read.
    #[error("could not read word list {}", path.display())]
    ReadWords {
        /// Path of the word list.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An edge table could not be read.
    #[error("could not read edge table {}", path.display())]
    ReadEdges {
        /// Path of the table.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The edge table could not be written.
    #[error("could not write edge table {}", path.display())]
    WriteEdges {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An edge table buffer is not a whole number of 8-byte edges.
    #[error("edge table of {len} bytes is not a multiple of 8")]
    Truncated {
        /// Length of the buffer in bytes.
        len: usize,
    },
}
