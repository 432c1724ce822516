use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Title-side key.
    Author,
    /// Body-side key.
    Counterpart,
}

/// Nodes are identified by key and role together, so an author and a
/// counterpart sharing the same text stay separate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GraphNode {
    pub key: String,
    pub role: NodeRole,
}

/// Simple undirected graph with edges only between authors and counterparts.
#[derive(Debug, Clone, Default)]
pub struct InteractionGraph {
    graph: UnGraph<GraphNode, ()>,
    index: HashMap<GraphNode, NodeIndex>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless an identical (key, role) node exists.
    pub fn add_node(&mut self, key: &str, role: NodeRole) -> NodeIndex {
        let node = GraphNode {
            key: key.to_string(),
            role,
        };
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.index.insert(node, idx);
        idx
    }

    /// Link an author to a counterpart, adding either node if needed.
    /// Repeated pairs collapse into one edge.
    pub fn add_edge(&mut self, author: &str, counterpart: &str) {
        let a = self.add_node(author, NodeRole::Author);
        let c = self.add_node(counterpart, NodeRole::Counterpart);
        self.graph.update_edge(a, c, ());
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All nodes, sorted by (key, role).
    pub fn nodes(&self) -> Vec<GraphNode> {
        let mut out: Vec<GraphNode> = self.graph.node_weights().cloned().collect();
        out.sort();
        out
    }

    pub fn keys_with_role(&self, role: NodeRole) -> Vec<String> {
        let mut out: Vec<String> = self
            .graph
            .node_weights()
            .filter(|n| n.role == role)
            .map(|n| n.key.clone())
            .collect();
        out.sort();
        out
    }

    /// All edges as sorted (author, counterpart) pairs.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .graph
            .edge_references()
            .map(|e| {
                let (a, b) = (&self.graph[e.source()], &self.graph[e.target()]);
                if a.role == NodeRole::Author {
                    (a.key.clone(), b.key.clone())
                } else {
                    (b.key.clone(), a.key.clone())
                }
            })
            .collect();
        out.sort();
        out
    }

    /// Counterparts linked to `author`, sorted.
    pub fn neighbors(&self, author: &str) -> Vec<String> {
        let node = GraphNode {
            key: author.to_string(),
            role: NodeRole::Author,
        };
        let Some(&idx) = self.index.get(&node) else {
            return Vec::new();
        };
        let mut out: Vec<String> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n].key.clone())
            .collect();
        out.sort();
        out
    }
}

impl PartialEq for InteractionGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes() == other.nodes() && self.edges() == other.edges()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_in_both_roles_stays_two_nodes() {
        let mut g = InteractionGraph::new();
        g.add_edge("alice", "alice");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.keys_with_role(NodeRole::Author), vec!["alice".to_string()]);
        assert_eq!(g.keys_with_role(NodeRole::Counterpart), vec!["alice".to_string()]);
        assert_eq!(g.edges(), vec![("alice".to_string(), "alice".to_string())]);
    }

    #[test]
    fn repeated_edge_collapses() {
        let mut g = InteractionGraph::new();
        g.add_edge("a", "x");
        g.add_edge("a", "x");
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors("a"), vec!["x".to_string()]);
        assert!(g.neighbors("x").is_empty());
    }
}
