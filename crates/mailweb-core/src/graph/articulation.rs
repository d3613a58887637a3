//! Connector detection: articulation points of the contact graph.
//!
//! Depth-first traversal assigning each identity a discovery time and a
//! low-link value (the smallest discovery time reachable from its DFS subtree
//! through at most one back edge). The traversal runs on an explicit stack,
//! so long reply chains cannot exhaust the call stack.

use std::collections::BTreeSet;

use log::debug;
use petgraph::graph::{NodeIndex, Neighbors};

use crate::graph::contact_graph::ContactGraph;

/// Output of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct ConnectorReport {
    /// Sorted connector identities.
    pub connectors: BTreeSet<String>,
    /// Number of connected components (one per traversal root).
    pub components: usize,
    /// Edges followed to a first visit; a spanning forest of the graph.
    pub tree_edges: usize,
}

/// One suspended visit on the traversal stack.
struct Frame<'g> {
    node: NodeIndex,
    parent: Option<NodeIndex>,
    /// Remaining neighbours of `node`; this is the resume position.
    neighbors: Neighbors<'g, ()>,
    children: usize,
}

/// Per-run traversal state. Build one per analysis, consume it with [`run`].
///
/// [`run`]: ArticulationAnalyzer::run
pub struct ArticulationAnalyzer<'g> {
    graph: &'g ContactGraph,
    discovery: Vec<Option<usize>>,
    low_link: Vec<usize>,
    clock: usize,
    is_connector: Vec<bool>,
    tree_edges: usize,
    components: usize,
}

impl<'g> ArticulationAnalyzer<'g> {
    pub fn new(graph: &'g ContactGraph) -> Self {
        let n = graph.identity_count();
        Self {
            graph,
            discovery: vec![None; n],
            low_link: vec![0; n],
            clock: 0,
            is_connector: vec![false; n],
            tree_edges: 0,
            components: 0,
        }
    }

    /// Traverse every component and collect the connectors.
    pub fn run(mut self) -> ConnectorReport {
        let graph = self.graph;
        for root in graph.node_indices() {
            if self.discovery[root.index()].is_none() {
                self.traverse(root);
            }
        }

        let connectors: BTreeSet<String> = graph
            .node_indices()
            .filter(|idx| self.is_connector[idx.index()])
            .map(|idx| graph.identity_at(idx).to_string())
            .collect();

        debug!(
            "connector analysis: {} identities, {} components, {} connectors",
            graph.identity_count(),
            self.components,
            connectors.len()
        );

        ConnectorReport {
            connectors,
            components: self.components,
            tree_edges: self.tree_edges,
        }
    }

    fn discover(&mut self, node: NodeIndex) {
        self.discovery[node.index()] = Some(self.clock);
        self.low_link[node.index()] = self.clock;
        self.clock += 1;
    }

    fn relax(&mut self, node: NodeIndex, value: usize) {
        let low = &mut self.low_link[node.index()];
        *low = (*low).min(value);
    }

    /// Depth-first traversal of the component containing `root`.
    fn traverse(&mut self, root: NodeIndex) {
        let graph = self.graph;
        self.components += 1;
        self.discover(root);

        let mut stack = vec![Frame {
            node: root,
            parent: None,
            neighbors: graph.neighbor_indices(root),
            children: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;

            let Some(next) = frame.neighbors.next() else {
                // All neighbours handled: return to the parent frame.
                let parent = frame.parent;
                let children = frame.children;
                stack.pop();

                match (parent, stack.last()) {
                    (Some(_), Some(up)) => {
                        let p = up.node;
                        let p_disc = self.discovery[p.index()].unwrap_or(0);
                        let child_low = self.low_link[node.index()];
                        if up.parent.is_some() && p_disc <= child_low {
                            self.is_connector[p.index()] = true;
                        }
                        self.relax(p, child_low);
                    }
                    _ => {
                        // Traversal root: a cut vertex iff it has two or more tree children.
                        if children > 1 {
                            self.is_connector[node.index()] = true;
                        }
                    }
                }
                continue;
            };

            if Some(next) == frame.parent {
                continue;
            }

            match self.discovery[next.index()] {
                Some(disc) => self.relax(node, disc),
                None => {
                    frame.children += 1;
                    self.tree_edges += 1;
                    self.discover(next);
                    stack.push(Frame {
                        node: next,
                        parent: Some(node),
                        neighbors: graph.neighbor_indices(next),
                        children: 0,
                    });
                }
            }
        }
    }
}

/// Find every connector (articulation point) in `graph`.
pub fn find_connectors(graph: &ContactGraph) -> BTreeSet<String> {
    ArticulationAnalyzer::new(graph).run().connectors
}
