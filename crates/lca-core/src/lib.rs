#![forbid(unsafe_code)]
//! lca-core library.
//!
//! Lowest Common Ancestor queries over two graph models:
//!
//! - [`tree`]: a rooted binary tree, where the LCA is a single node and a
//!   node counts as its own ancestor.
//! - [`dag`]: a possibly disconnected, multi-rooted DAG, where the LCA is
//!   the set of sinks of the subgraph induced by the common ancestors.
//!
//! Every query is a pure function of its inputs; nothing is cached
//! between calls.
//!
//! # Conventions
//!
//! - **Errors**: Input precondition violations are [`error::LcaError`];
//!   config loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod dag;
pub mod error;
pub mod tree;

pub use config::{AncestorStrategy, DagConfig, LcaConfig};
pub use error::{ErrorCode, LcaError};
