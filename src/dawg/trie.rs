use std::fmt;

use super::children::TrieNode;
use super::error::{DawgError, Result};
use super::label::IntoWord;
use super::node_arena::{NodeArena, NodeId};

/// How far a [`Trie`] has gone through the build.
///
/// Words can only be inserted while `Building`. Minimizing shares nodes
/// between parents, so inserting afterwards would add words to every path
/// through a shared node. Edges can only be emitted once `LaidOut`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// A plain prefix tree still accepting words.
    #[default]
    Building,
    /// Equivalent nodes have been merged; offsets are missing or stale.
    Minimized,
    /// Every block has a current offset.
    LaidOut,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Building => "building",
            Stage::Minimized => "minimized",
            Stage::LaidOut => "laid out",
        })
    }
}

/// A prefix tree over byte labels, stored in a node arena.
///
/// Once [`minimize`](Trie::minimize)d, the same structure holds the DAWG: shared
/// suffixes are then represented by several parents referring to one [`NodeId`].
#[derive(Clone, Debug)]
pub struct Trie {
    pub(crate) arena: NodeArena,
    stage: Stage,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates a trie holding only an empty root.
    pub fn new() -> Self {
        Trie {
            arena: NodeArena::new(),
            stage: Stage::Building,
        }
    }

    /// Builds a trie from a list of words, inserted in order.
    pub fn from_words<W: IntoWord>(words: impl IntoIterator<Item = W>) -> Result<Self> {
        let mut trie = Trie::new();
        trie.insert_all(words)?;
        Ok(trie)
    }

    /// Handle of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node behind a handle.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.arena[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.arena[id]
    }

    /// Current build stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Number of nodes allocated so far, including nodes merged away by minimization.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Inserts one word, creating missing nodes along its path.
    ///
    /// Inserting the empty word marks the root as a word end. Inserting a word
    /// twice has no further effect.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::Label`](super::error::DawgError::Label) if a character
    /// does not fit in a single-byte label, or
    /// [`DawgError::Frozen`](super::error::DawgError::Frozen) once the trie has
    /// left the [`Building`](Stage::Building) stage. The trie is left unchanged.
    pub fn insert(&mut self, word: impl IntoWord) -> Result<()> {
        let labels = word.into_labels()?;
        if self.stage != Stage::Building {
            return Err(DawgError::Frozen {
                word: labels.iter().copied().map(char::from).collect(),
                stage: self.stage,
            });
        }
        self.insert_labels(&labels);
        Ok(())
    }

    /// Inserts every word in input order, stopping at the first invalid one.
    pub fn insert_all<W: IntoWord>(&mut self, words: impl IntoIterator<Item = W>) -> Result<()> {
        for word in words {
            self.insert(word)?;
        }
        Ok(())
    }

    fn insert_labels(&mut self, labels: &[u8]) {
        let mut current = self.root();
        for &label in labels {
            current = match self.arena[current].get(label) {
                Some(child) => child,
                None => {
                    let child = self.arena.alloc(TrieNode::new(false));
                    self.arena[current].children_mut().push(label, child);
                    child
                }
            };
        }
        self.arena[current].set_word_end();
    }

    /// Follows `labels` from the root and returns the node reached, if any.
    pub fn walk(&self, labels: &[u8]) -> Option<NodeId> {
        labels
            .iter()
            .try_fold(self.root(), |id, &label| self.node(id).get(label))
    }

    /// True if the word was inserted (before or after minimization).
    pub fn contains(&self, word: impl IntoWord) -> bool {
        word.into_labels()
            .ok()
            .and_then(|labels| self.walk(&labels))
            .is_some_and(|id| self.node(id).is_word_end())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_word() {
        let trie = Trie::from_words(["TEST", "TESTER", "WTEST"]).unwrap();
        let root = trie.node(trie.root());

        let n = trie.node(root.get(b'T').unwrap());
        assert!(!n.is_word_end());
        let n = trie.node(n.get(b'E').unwrap());
        assert!(!n.is_word_end());
        let n = trie.node(n.get(b'S').unwrap());
        assert!(!n.is_word_end());
        let n = trie.node(n.get(b'T').unwrap());
        assert!(n.is_word_end());
        let n = trie.node(n.get(b'E').unwrap());
        assert!(!n.is_word_end());
        let n = trie.node(n.get(b'R').unwrap());
        assert!(n.is_word_end());
        assert_eq!(n.get(b'T'), None);
    }

    #[test]
    fn shared_prefixes_are_not_duplicated() {
        let trie = Trie::from_words(["cat", "cats", "car"]).unwrap();
        // root, c, a, t, s, r
        assert_eq!(trie.node_count(), 6);
        assert!(trie.contains("cat"));
        assert!(trie.contains("cats"));
        assert!(trie.contains("car"));
        assert!(!trie.contains("ca"));
        assert!(!trie.contains("cart"));
    }

    #[test]
    fn duplicate_words_are_idempotent() {
        let once = Trie::from_words(["a"]).unwrap();
        let twice = Trie::from_words(["a", "a"]).unwrap();
        assert_eq!(once.node_count(), twice.node_count());
        assert!(twice.contains("a"));
    }

    #[test]
    fn empty_word_marks_root() {
        let mut trie = Trie::new();
        assert!(!trie.contains(""));
        trie.insert("").unwrap();
        assert!(trie.node(trie.root()).is_word_end());
        assert!(trie.contains(""));
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn invalid_word_leaves_trie_unchanged() {
        let mut trie = Trie::from_words(["ab"]).unwrap();
        assert!(trie.insert("a€").is_err());
        assert_eq!(trie.node_count(), 3);
        assert!(!trie.contains("a"));
    }

    #[test]
    fn minimized_trie_rejects_new_words() {
        let mut trie = Trie::from_words(["xa", "ya"]).unwrap();
        trie.minimize();
        // x and y now share the node under them.
        assert_eq!(trie.walk(b"x"), trie.walk(b"y"));

        let err = trie.insert("xab").unwrap_err();
        assert!(matches!(
            err,
            DawgError::Frozen { ref word, stage: Stage::Minimized } if word == "xab"
        ));
        assert!(!trie.contains("xab"));
        assert!(!trie.contains("yab"));
    }

    #[test]
    fn laid_out_trie_rejects_new_words() {
        let mut trie = Trie::from_words(["ab"]).unwrap();
        trie.assign_offsets().unwrap();
        assert_eq!(trie.stage(), Stage::LaidOut);
        assert!(matches!(
            trie.insert("b"),
            Err(DawgError::Frozen { stage: Stage::LaidOut, .. })
        ));
        assert!(!trie.contains("b"));
    }

    #[test]
    fn insert_all_stops_at_first_invalid_word() {
        let mut trie = Trie::new();
        let res = trie.insert_all(["ok", "b€d", "never"]);
        assert!(res.is_err());
        assert!(trie.contains("ok"));
        assert!(!trie.contains("never"));
    }
}
