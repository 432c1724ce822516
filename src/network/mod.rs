//! Day-level author/counterpart networks.
//!
//! The interaction table pairs a title author with the body author that
//! answered it. For a chosen day the builder groups rows by title author and
//! links each one to its counterparts, producing a simple bipartite graph.

mod builder;
mod graph;

pub use builder::{build_day_graph, forward_fill_authors, interaction_days};
pub use graph::{GraphNode, InteractionGraph, NodeRole};
