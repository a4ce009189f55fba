//! Lowest Common Ancestor over a binary tree.
//!
//! # Algorithm
//!
//! Record the root-to-node path for both query nodes with a depth-first
//! search that pushes each node on entry and pops it when neither subtree
//! holds the target. The LCA is the last element of the longest common
//! prefix of the two paths.
//!
//! # Edge Cases
//!
//! - If either node is absent (or the tree is empty), there is no LCA.
//! - If both ids name the same present node, that node is the LCA.
//! - If one node is an ancestor of the other, the ancestor is the LCA.

use tracing::trace;

use super::node::{TreeId, TreeNode};

/// Search for `target` below `root`, recording the path in `path`.
///
/// On success `path` gains every id from `root` down to and including
/// `target`. On failure `path` is left exactly as it was passed in.
/// The left subtree is searched first; the right subtree is skipped once
/// the target is found.
pub fn find_path(root: Option<&TreeNode>, target: TreeId, path: &mut Vec<TreeId>) -> bool {
    let Some(node) = root else {
        return false;
    };

    path.push(node.id);
    if node.id == target {
        return true;
    }

    if find_path(node.left.as_deref(), target, path) || find_path(node.right.as_deref(), target, path) {
        return true;
    }

    path.pop();
    false
}

/// Path from `root` to `target`, or `None` if `target` is absent.
#[must_use]
pub fn path_to(root: Option<&TreeNode>, target: TreeId) -> Option<Vec<TreeId>> {
    let mut path = Vec::new();
    find_path(root, target, &mut path).then_some(path)
}

/// Find the Lowest Common Ancestor of `id1` and `id2`.
///
/// Returns `None` if either id is not present in the tree.
#[must_use]
pub fn find_lca(root: Option<&TreeNode>, id1: TreeId, id2: TreeId) -> Option<TreeId> {
    let path_1 = path_to(root, id1)?;
    let path_2 = path_to(root, id2)?;

    let lca = path_1
        .iter()
        .zip(&path_2)
        .take_while(|(a, b)| a == b)
        .last()
        .map(|(a, _)| *a);

    trace!(?path_1, ?path_2, ?lca, "tree paths compared");
    lca
}

#[cfg(test)]
mod tests {
    use super::*;

    //        1
    //       / \
    //      2   3
    //     / \ / \
    //    4  5 6  7
    fn seven() -> TreeNode {
        TreeNode::leaf(1)
            .with_left(
                TreeNode::leaf(2)
                    .with_left(TreeNode::leaf(4))
                    .with_right(TreeNode::leaf(5)),
            )
            .with_right(
                TreeNode::leaf(3)
                    .with_left(TreeNode::leaf(6))
                    .with_right(TreeNode::leaf(7)),
            )
    }

    #[test]
    fn path_to_leaf() {
        let t = seven();
        assert_eq!(path_to(Some(&t), 6), Some(vec![1, 3, 6]));
    }

    #[test]
    fn failed_search_leaves_prefix_untouched() {
        let t = seven();
        let mut path = vec![42, 43];
        assert!(!find_path(Some(&t), 99, &mut path));
        assert_eq!(path, vec![42, 43]);
    }

    #[test]
    fn successful_search_appends_to_prefix() {
        let t = seven();
        let mut path = vec![42];
        assert!(find_path(Some(&t), 5, &mut path));
        assert_eq!(path, vec![42, 1, 2, 5]);
    }

    #[test]
    fn empty_tree_has_no_path() {
        let mut path = Vec::new();
        assert!(!find_path(None, 1, &mut path));
        assert!(path.is_empty());
    }

    #[test]
    fn left_subtree_wins_for_duplicate_ids() {
        // Duplicate ids break the tree invariant; the left-first search
        // still returns a single well-formed path.
        let t = TreeNode::leaf(1)
            .with_left(TreeNode::leaf(9))
            .with_right(TreeNode::leaf(9));
        assert_eq!(path_to(Some(&t), 9), Some(vec![1, 9]));
    }

    #[test]
    fn console_walkthrough() {
        let t = seven();
        assert_eq!(find_lca(Some(&t), 4, 5), Some(2));
        assert_eq!(find_lca(Some(&t), 3, 4), Some(1));
        assert_eq!(find_lca(Some(&t), 4, 7), Some(1));
        assert_eq!(find_lca(Some(&t), 5, 3), Some(1));
        assert_eq!(find_lca(Some(&t), 6, 7), Some(3));
        assert_eq!(find_lca(Some(&t), 1, 2), Some(1));
        assert_eq!(find_lca(Some(&t), 1, 1), Some(1));
    }

    #[test]
    fn missing_node_has_no_lca() {
        let t = seven();
        assert_eq!(find_lca(Some(&t), 4, 99), None);
        assert_eq!(find_lca(Some(&t), 99, 4), None);
        assert_eq!(find_lca(None, 1, 1), None);
    }
}
