//! Binary tree model and root-to-node path LCA.
//!
//! A [`TreeNode`] exclusively owns its optional left and right subtrees,
//! so the structure is a strict hierarchy with no sharing or back-links.
//!
//! # Sub-modules
//!
//! - [`node`]: The owned tree type and a [`TreeBuilder`] that assembles a
//!   tree from parent/child links.
//! - [`lca`]: Path search with backtracking and the lock-step path
//!   comparison that yields the LCA. ([`find_path`], [`find_lca`])
//!
//! # Self-ancestry
//!
//! In the tree model a node is its own ancestor, so `find_lca(t, x, x)`
//! is `x` whenever `x` is present. The DAG model in [`crate::dag`]
//! deliberately does not follow this convention.

pub mod lca;
pub mod node;

pub use lca::{find_lca, find_path, path_to};
pub use node::{Side, TreeBuilder, TreeId, TreeNode};
