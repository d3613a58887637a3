//! Contact graph backed by petgraph::UnGraph, with directed sent/received indexes.

use petgraph::graph::{NodeIndex, Neighbors, UnGraph};
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::config::MailRecord;

/// Undirected "has exchanged mail" graph over email identities.
///
/// Nodes are created only when an edge is added, so every identity in the
/// graph has degree >= 1. Parallel edges and self loops are never stored.
#[derive(Debug, Default)]
pub struct ContactGraph {
    graph: UnGraph<String, ()>,
    /// O(1) identity → NodeIndex lookup.
    id_index: HashMap<String, NodeIndex>,
    sent_to: HashMap<String, HashSet<String>>,
    received_from: HashMap<String, HashSet<String>>,
}

impl ContactGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(id) {
            idx
        } else {
            let idx = self.graph.add_node(id.to_string());
            self.id_index.insert(id.to_string(), idx);
            idx
        }
    }

    /// Record that `from` sent mail to `to`.
    ///
    /// Self edges and empty identities are ignored. Returns `true` when the
    /// call changed the graph, so repeating an edge returns `false`.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        if from.is_empty() || to.is_empty() || from == to {
            debug!("ignoring edge {from:?} -> {to:?}");
            return false;
        }

        // The undirected edge exists iff mail already went one way or the other.
        let known = self.sent_to.get(from).is_some_and(|s| s.contains(to))
            || self.sent_to.get(to).is_some_and(|s| s.contains(from));

        let a = self.ensure_node(from);
        let b = self.ensure_node(to);

        let mut changed = false;
        if !known {
            self.graph.add_edge(a, b, ());
            changed = true;
        }
        changed |= self
            .sent_to
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        changed |= self
            .received_from
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
        changed
    }

    /// Add one edge per recipient of `record`. Returns how many changed the graph.
    pub fn add_record(&mut self, record: &MailRecord) -> usize {
        let mut added = 0;
        for (from, to) in record.pairs() {
            if self.add_edge(from, to) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Number of distinct identities `id` has exchanged mail with.
    pub fn degree(&self, id: &str) -> usize {
        self.id_index
            .get(id)
            .map(|&idx| self.graph.neighbors(idx).count())
            .unwrap_or(0)
    }

    pub fn sent_count(&self, id: &str) -> usize {
        self.sent_to.get(id).map(HashSet::len).unwrap_or(0)
    }

    pub fn received_count(&self, id: &str) -> usize {
        self.received_from.get(id).map(HashSet::len).unwrap_or(0)
    }

    /// Undirected neighbours of `id`; empty for unknown identities.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        match self.id_index.get(id) {
            Some(&idx) => self
                .graph
                .neighbors(idx)
                .map(|n| self.graph[n].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every identity in the graph, in first-seen order.
    pub fn all_identities(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    pub fn identity_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Read-only view of the underlying undirected graph.
    pub fn graph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    // --- Index-level access for traversals ---

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub(crate) fn neighbor_indices(&self, idx: NodeIndex) -> Neighbors<'_, ()> {
        self.graph.neighbors(idx)
    }

    pub(crate) fn identity_at(&self, idx: NodeIndex) -> &str {
        self.graph[idx].as_str()
    }
}
