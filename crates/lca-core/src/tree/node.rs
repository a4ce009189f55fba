//! Owned binary tree nodes and link-based construction.

use std::collections::{HashMap, HashSet};

use crate::error::LcaError;

/// Identifier of a binary tree node. Need not be contiguous.
pub type TreeId = i64;

/// Which child slot of a parent a link fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// A binary tree node that exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: TreeId,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// A node with no children.
    #[must_use]
    pub const fn leaf(id: TreeId) -> Self {
        Self {
            id,
            left: None,
            right: None,
        }
    }

    #[must_use]
    pub fn with_left(mut self, child: Self) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    #[must_use]
    pub fn with_right(mut self, child: Self) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// Returns `true` if `id` appears anywhere in this subtree.
    #[must_use]
    pub fn contains(&self, id: TreeId) -> bool {
        self.id == id
            || self.left.as_deref().is_some_and(|n| n.contains(id))
            || self.right.as_deref().is_some_and(|n| n.contains(id))
    }

    /// Number of nodes in this subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.left.as_deref().map_or(0, Self::len) + self.right.as_deref().map_or(0, Self::len)
    }

    /// Always `false`: a subtree holds at least its own root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        let left = self.left.as_deref().map_or(0, Self::depth);
        let right = self.right.as_deref().map_or(0, Self::depth);
        1 + left.max(right)
    }
}

// ---------------------------------------------------------------------------
// TreeBuilder
// ---------------------------------------------------------------------------

/// Assembles an owned [`TreeNode`] from `(parent, child, side)` links.
///
/// Links may be added in any order. [`TreeBuilder::build`] rejects link
/// sets that do not form a single binary tree under the given root.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    root: Option<TreeId>,
    links: HashMap<TreeId, [Option<TreeId>; 2]>,
    parent_of: HashMap<TreeId, TreeId>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(root: TreeId) -> Self {
        Self {
            root: Some(root),
            ..Self::default()
        }
    }

    /// A builder with no root; [`TreeBuilder::build`] returns `Ok(None)`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach `child` under `parent` on the given side.
    ///
    /// # Errors
    ///
    /// Returns [`LcaError::InvalidTree`] if `child` already has a parent,
    /// if the slot is already filled, or if `child` is the root.
    pub fn link(&mut self, parent: TreeId, child: TreeId, side: Side) -> Result<&mut Self, LcaError> {
        if self.root == Some(child) {
            return Err(LcaError::InvalidTree(format!(
                "root {child} cannot be a child of {parent}"
            )));
        }
        if let Some(existing) = self.parent_of.get(&child) {
            return Err(LcaError::InvalidTree(format!(
                "node {child} already has parent {existing}"
            )));
        }

        let slot = match side {
            Side::Left => 0,
            Side::Right => 1,
        };
        let slots = self.links.entry(parent).or_default();
        if let Some(existing) = slots[slot] {
            return Err(LcaError::InvalidTree(format!(
                "{side:?} child of {parent} is already {existing}"
            )));
        }
        slots[slot] = Some(child);
        self.parent_of.insert(child, parent);
        Ok(self)
    }

    /// Build the tree.
    ///
    /// # Errors
    ///
    /// Returns [`LcaError::InvalidTree`] if some link is unreachable from
    /// the root (a disconnected fragment or a cycle that avoids the root).
    pub fn build(&self) -> Result<Option<TreeNode>, LcaError> {
        let Some(root) = self.root else {
            return Ok(None);
        };

        let mut placed = HashSet::new();
        let tree = self.assemble(root, &mut placed);

        let stray: Vec<TreeId> = self
            .parent_of
            .keys()
            .filter(|child| !placed.contains(*child))
            .copied()
            .collect();
        if let Some(min) = stray.iter().min() {
            return Err(LcaError::InvalidTree(format!(
                "node {min} is not reachable from root {root}"
            )));
        }

        Ok(Some(tree))
    }

    fn assemble(&self, id: TreeId, placed: &mut HashSet<TreeId>) -> TreeNode {
        placed.insert(id);
        let mut node = TreeNode::leaf(id);
        if let Some([left, right]) = self.links.get(&id) {
            node.left = left.map(|c| Box::new(self.assemble(c, placed)));
            node.right = right.map(|c| Box::new(self.assemble(c, placed)));
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //        1
    //       / \
    //      2   3
    //         /
    //        6
    fn sample() -> TreeNode {
        TreeNode::leaf(1)
            .with_left(TreeNode::leaf(2))
            .with_right(TreeNode::leaf(3).with_left(TreeNode::leaf(6)))
    }

    #[test]
    fn size_and_depth() {
        let t = sample();
        assert_eq!(t.len(), 4);
        assert_eq!(t.depth(), 3);
        assert!(t.contains(6));
        assert!(!t.contains(5));
    }

    #[test]
    fn builder_matches_manual_construction() {
        let mut b = TreeBuilder::new(1);
        b.link(3, 6, Side::Left).unwrap();
        b.link(1, 2, Side::Left).unwrap();
        b.link(1, 3, Side::Right).unwrap();
        assert_eq!(b.build().unwrap(), Some(sample()));
    }

    #[test]
    fn builder_without_root_is_empty() {
        assert_eq!(TreeBuilder::empty().build().unwrap(), None);
    }

    #[test]
    fn builder_rejects_second_parent() {
        let mut b = TreeBuilder::new(1);
        b.link(1, 2, Side::Left).unwrap();
        b.link(1, 3, Side::Right).unwrap();
        let err = b.link(3, 2, Side::Left).unwrap_err();
        assert!(matches!(err, LcaError::InvalidTree(_)));
    }

    #[test]
    fn builder_rejects_filled_slot() {
        let mut b = TreeBuilder::new(1);
        b.link(1, 2, Side::Left).unwrap();
        assert!(b.link(1, 3, Side::Left).is_err());
    }

    #[test]
    fn builder_rejects_root_as_child() {
        let mut b = TreeBuilder::new(1);
        b.link(1, 2, Side::Left).unwrap();
        assert!(b.link(2, 1, Side::Left).is_err());
    }

    #[test]
    fn builder_rejects_detached_fragment() {
        let mut b = TreeBuilder::new(1);
        b.link(1, 2, Side::Left).unwrap();
        b.link(8, 9, Side::Right).unwrap();
        let err = b.build().unwrap_err();
        assert_eq!(
            err,
            LcaError::InvalidTree("node 9 is not reachable from root 1".into())
        );
    }

    #[test]
    fn builder_rejects_cycle_away_from_root() {
        let mut b = TreeBuilder::new(1);
        b.link(5, 6, Side::Left).unwrap();
        b.link(6, 5, Side::Left).unwrap();
        assert!(b.build().is_err());
    }
}
