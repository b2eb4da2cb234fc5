//! Suffix sharing: collapses structurally equivalent subtrees of a [`Trie`]
//! into one canonical node, turning the tree into a minimal DAG.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;
use tracing::debug;

use super::node_arena::NodeId;
use super::trie::{Stage, Trie};

/// Structural identity of a node whose children are already canonical.
///
/// Because children are canonicalized bottom-up, comparing their ids is enough;
/// there is never a need to recurse further than one level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    word_end: bool,
    /// (label, child is a word end, canonical child), sorted by label.
    edges: SmallVec<[(u8, bool, NodeId); 4]>,
}

impl NodeKey {
    pub(crate) fn of(trie: &Trie, id: NodeId) -> Self {
        let node = trie.node(id);
        let mut edges: SmallVec<[(u8, bool, NodeId); 4]> = node
            .children()
            .map(|(label, child)| (label, trie.node(child).is_word_end(), child))
            .collect();
        edges.sort_unstable_by_key(|&(label, _, _)| label);
        NodeKey {
            word_end: node.is_word_end(),
            edges,
        }
    }
}

/// Node counts before and after minimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimizeStats {
    /// Nodes in the trie before minimization.
    pub trie_nodes: usize,
    /// Nodes reachable from the root afterwards, root included.
    pub dawg_nodes: usize,
}

struct Minimizer {
    /// Register of canonical nodes, keyed by structure.
    classes: HashMap<NodeKey, NodeId>,
    /// Canonical representative of every processed node, indexed by node.
    representative: Vec<NodeId>,
}

impl Minimizer {
    fn new(node_count: usize) -> Self {
        Minimizer {
            classes: HashMap::new(),
            representative: (0..node_count).map(NodeId::new).collect(),
        }
    }

    /// Points every child reference of `id` at the child's representative.
    fn canonicalize_children(&self, trie: &mut Trie, id: NodeId) {
        for (_, child) in trie.node_mut(id).children_mut().as_mut_slice() {
            *child = self.representative[child.index()];
        }
    }

    /// Registers `id` as the representative of its class, or maps it to the
    /// representative registered before it.
    fn canonicalize(&mut self, trie: &Trie, id: NodeId) {
        let key = NodeKey::of(trie, id);
        let canonical = *self.classes.entry(key).or_insert(id);
        self.representative[id.index()] = canonical;
    }

    /// Post-order walk from the root with an explicit stack.
    fn run(&mut self, trie: &mut Trie) {
        let root = trie.root();
        let mut processed = HashSet::new();
        let mut stack = vec![(root, false)];

        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                self.canonicalize_children(trie, id);
                // The root stays the distinguished entry point, never a class member.
                if id != root {
                    self.canonicalize(trie, id);
                }
                continue;
            }
            if !processed.insert(id) {
                continue;
            }
            stack.push((id, true));
            stack.extend(trie.node(id).children().rev().map(|(_, child)| (child, false)));
        }
    }
}

impl Trie {
    /// Merges every set of structurally equivalent nodes into one shared node.
    ///
    /// The accepted word set does not change. Calling this on an already minimal
    /// graph is a no-op. Afterwards the graph is [`Stage::Minimized`]: it no
    /// longer accepts words, and any earlier offsets must be reassigned.
    pub fn minimize(&mut self) -> MinimizeStats {
        let trie_nodes = self.node_count();
        let mut minimizer = Minimizer::new(trie_nodes);
        minimizer.run(self);
        self.set_stage(Stage::Minimized);
        let stats = MinimizeStats {
            trie_nodes,
            dawg_nodes: minimizer.classes.len() + 1,
        };
        debug!(
            trie_nodes = stats.trie_nodes,
            dawg_nodes = stats.dawg_nodes,
            "minimized trie"
        );
        stats
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::*;

    fn reachable(trie: &Trie) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut stack = vec![trie.root()];
        let mut out = Vec::new();
        while let Some(id) = stack.pop() {
            if seen.insert(id) {
                out.push(id);
                stack.extend(trie.node(id).children().map(|(_, c)| c));
            }
        }
        out
    }

    /// Number of reachable non-root nodes that share a key with another one.
    fn duplicate_classes(trie: &Trie) -> usize {
        let nodes: Vec<_> = reachable(trie)
            .into_iter()
            .filter(|&id| id != trie.root())
            .collect();
        let distinct: HashSet<NodeKey> = nodes.iter().map(|&id| NodeKey::of(trie, id)).collect();
        nodes.len() - distinct.len()
    }

    fn node_at(trie: &Trie, path: &str) -> NodeId {
        trie.walk(path.as_bytes()).unwrap()
    }

    #[test]
    fn graph_shares_nodes() {
        let mut single = Trie::from_words(["ABCDEF"]).unwrap();
        let single = single.minimize();
        assert_eq!(single.dawg_nodes, "ABCDEF".len() + 1);

        let mut many = Trie::from_words(["ABCDEF", "ABDEF", "ABEF", "AF"]).unwrap();
        let many = many.minimize();
        assert_eq!(single.dawg_nodes, many.dawg_nodes);
        assert!(many.trie_nodes > many.dawg_nodes);
    }

    #[test]
    fn word_end_leaves_are_shared() {
        let mut trie = Trie::from_words(["cat", "cats", "car"]).unwrap();
        let stats = trie.minimize();
        assert_eq!(stats.trie_nodes, 6);
        // root, c, a, t and one shared leaf
        assert_eq!(stats.dawg_nodes, 5);
        assert_eq!(node_at(&trie, "cats"), node_at(&trie, "car"));
        assert_ne!(node_at(&trie, "cat"), node_at(&trie, "car"));
    }

    #[test]
    fn suffixes_are_shared() {
        let testdata = [
            "ASUFFIX",
            "BSUFFIX",
            "CDESUFFIX",
            "FFFFFFFSUFFIX",
            "INBETWEEN",
            "JSUFFIX",
            "XXSUFFIX",
        ];
        let mut trie = Trie::from_words(testdata).unwrap();
        trie.minimize();
        let suffix_node = node_at(&trie, "AS");
        for word in testdata {
            if let Some(prefix) = word.strip_suffix("UFFIX") {
                assert_eq!(node_at(&trie, prefix), suffix_node, "{word}");
            }
        }
    }

    #[test]
    fn word_end_flag_separates_classes() {
        // "ab" ends a word at b, "cb" continues: the b-nodes differ
        let mut trie = Trie::from_words(["ab", "abx", "cbx"]).unwrap();
        trie.minimize();
        assert_ne!(node_at(&trie, "ab"), node_at(&trie, "cb"));
        assert_eq!(node_at(&trie, "abx"), node_at(&trie, "cbx"));
    }

    #[test]
    fn root_stays_the_entry_point() {
        let mut trie = Trie::from_words(["a", "xa"]).unwrap();
        trie.minimize();
        assert_eq!(trie.root(), NodeId::ROOT);
        assert_ne!(node_at(&trie, "x"), trie.root());
        assert!(trie.contains("a"));
        assert!(trie.contains("xa"));
        assert!(!trie.contains("xxa"));
    }

    #[test]
    fn child_order_does_not_split_classes() {
        let mut trie = Trie::from_words(["xab", "xba", "yba", "yab"]).unwrap();
        trie.minimize();
        assert_eq!(node_at(&trie, "x"), node_at(&trie, "y"));
    }

    #[test]
    fn empty_trie_minimizes_to_root() {
        let mut trie = Trie::new();
        let stats = trie.minimize();
        assert_eq!(stats, MinimizeStats { trie_nodes: 1, dawg_nodes: 1 });
    }

    #[test]
    fn minimizing_twice_is_a_no_op() {
        let mut trie = Trie::from_words(["tap", "taps", "top", "tops", "tip"]).unwrap();
        let first = trie.minimize();
        let second = trie.minimize();
        assert_eq!(first.dawg_nodes, second.dawg_nodes);
        assert_eq!(duplicate_classes(&trie), 0);
    }

    #[test]
    fn insertion_order_does_not_change_node_count() {
        const WORDS: [&str; 5] = ["bake", "baker", "cake", "caked", "lake"];
        let counts: HashSet<usize> = WORDS
            .iter()
            .permutations(WORDS.len())
            .map(|words| Trie::from_words(words).unwrap().minimize().dawg_nodes)
            .collect();
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn reachable_count_matches_stats() {
        let mut trie = Trie::from_words(["nation", "station", "ration", "rations"]).unwrap();
        let stats = trie.minimize();
        assert_eq!(reachable(&trie).len(), stats.dawg_nodes);
    }

    proptest! {
        #[test]
        fn minimization_preserves_language(
            words in prop::collection::vec("[a-e]{0,6}", 0..40),
            queries in prop::collection::vec("[a-e]{0,6}", 0..40),
        ) {
            let plain = Trie::from_words(&words).unwrap();
            let mut minimal = plain.clone();
            minimal.minimize();
            for word in words.iter().chain(&queries) {
                prop_assert_eq!(plain.contains(word), minimal.contains(word), "{}", word);
            }
        }

        #[test]
        fn minimization_is_maximal(words in prop::collection::vec("[a-d]{1,5}", 0..60)) {
            let mut trie = Trie::from_words(&words).unwrap();
            let stats = trie.minimize();
            prop_assert_eq!(duplicate_classes(&trie), 0);
            prop_assert_eq!(reachable(&trie).len(), stats.dawg_nodes);
        }
    }
}
