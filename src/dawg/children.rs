use super::node_arena::NodeId;

/// A compact representation of the outgoing edges of a [`TrieNode`] that doesn't
/// allocate until there are at least three children.
///
/// Edges keep insertion order; that order is the order they are emitted in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Children {
    /// No children.
    #[default]
    None,
    /// Exactly one child (label, node).
    One((u8, NodeId)),
    /// Exactly two children.
    Two([(u8, NodeId); 2]),
    /// Three or more children stored in a vector.
    Many(Vec<(u8, NodeId)>),
}

impl Children {
    /// Returns the edges as a slice, in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[(u8, NodeId)] {
        match self {
            Children::None => &[],
            Children::One(child) => std::slice::from_ref(child),
            Children::Two(children) => children.as_slice(),
            Children::Many(children) => children.as_slice(),
        }
    }

    /// Returns the edges as a mutable slice, in insertion order.
    ///
    /// Labels must not be changed through this slice; only targets are rewritten.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [(u8, NodeId)] {
        match self {
            Children::None => &mut [],
            Children::One(child) => std::slice::from_mut(child),
            Children::Two(children) => children.as_mut_slice(),
            Children::Many(children) => children.as_mut_slice(),
        }
    }

    /// Returns the node that `label`'s edge leads to, or None if no such edge exists.
    #[inline]
    pub fn get(&self, label: u8) -> Option<NodeId> {
        self.as_slice()
            .iter()
            .find(|&&(l, _)| l == label)
            .map(|&(_, node)| node)
    }

    /// Appends an edge after the existing ones.
    pub(crate) fn push(&mut self, label: u8, node: NodeId) {
        debug_assert!(self.get(label).is_none(), "push: label already exists");
        let c = (label, node);
        *self = match std::mem::take(self) {
            Children::None => Children::One(c),
            Children::One(c1) => Children::Two([c1, c]),
            Children::Two([c1, c2]) => Children::Many(vec![c1, c2, c]),
            Children::Many(mut children) => {
                children.push(c);
                Children::Many(children)
            }
        };
    }

    /// Returns the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if there are no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Children::None)
    }
}

/// One state of the trie, and after minimization, of the DAWG.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrieNode {
    children: Children,
    word_end: bool,
    offset: Option<u32>,
}

impl TrieNode {
    /// Creates a node without children.
    pub fn new(word_end: bool) -> Self {
        TrieNode {
            children: Children::None,
            word_end,
            offset: None,
        }
    }

    /// True if a word terminates at this node.
    #[inline]
    pub fn is_word_end(&self) -> bool {
        self.word_end
    }

    pub(crate) fn set_word_end(&mut self) {
        self.word_end = true;
    }

    /// Returns the child reached through `label`, if any.
    #[inline]
    pub fn get(&self, label: u8) -> Option<NodeId> {
        self.children.get(label)
    }

    /// Returns an iterator over the (label, child) pairs in insertion order.
    #[inline]
    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = (u8, NodeId)> + ExactSizeIterator + '_ {
        self.children.as_slice().iter().copied()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Returns the number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// True if the node has at least one outgoing edge.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Start of this node's block in the edge table.
    ///
    /// `None` until offsets are assigned, and forever for nodes without children.
    #[inline]
    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: u32) {
        self.offset = Some(offset);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_children() {
        let n = TrieNode::new(false);
        assert_eq!(n.children().next(), None);
        assert_eq!(n.child_count(), 0);
        assert!(!n.has_children());
    }

    #[test]
    fn one_children() {
        let mut n = TrieNode::new(false);
        n.children_mut().push(b'a', NodeId::new(1));
        let mut children = n.children();
        assert_eq!(children.next(), Some((b'a', NodeId::new(1))));
        assert_eq!(children.next(), None);
        assert_eq!(n.child_count(), 1);
    }

    #[test]
    fn two_children() {
        let mut n = TrieNode::new(false);
        n.children_mut().push(b'b', NodeId::new(1));
        n.children_mut().push(b'a', NodeId::new(2));
        let children: Vec<_> = n.children().collect();
        assert_eq!(children, [(b'b', NodeId::new(1)), (b'a', NodeId::new(2))]);
        assert!(matches!(n.children_mut(), Children::Two(_)));
    }

    #[test]
    fn three_children_keep_insertion_order() {
        let mut n = TrieNode::new(false);
        for (i, label) in [b'z', b'a', b'm'].into_iter().enumerate() {
            n.children_mut().push(label, NodeId::new(i + 1));
        }
        let labels: Vec<u8> = n.children().map(|(l, _)| l).collect();
        assert_eq!(labels, b"zam");
        assert_eq!(n.get(b'm'), Some(NodeId::new(3)));
        assert_eq!(n.get(b'q'), None);
    }

    #[test]
    fn a_hundred_children() {
        let mut n = TrieNode::new(false);
        for label in 0..100u8 {
            n.children_mut().push(label, NodeId::new(label as usize + 1));
        }
        assert_eq!(n.child_count(), 100);
        for (label, child) in n.children() {
            assert_eq!(child, NodeId::new(label as usize + 1));
        }
    }

    #[test]
    fn targets_can_be_rewritten_in_place() {
        let mut n = TrieNode::new(false);
        n.children_mut().push(b'a', NodeId::new(1));
        n.children_mut().push(b'b', NodeId::new(2));
        for (_, child) in n.children_mut().as_mut_slice() {
            *child = NodeId::new(7);
        }
        assert_eq!(n.get(b'a'), Some(NodeId::new(7)));
        assert_eq!(n.get(b'b'), Some(NodeId::new(7)));
    }
}
