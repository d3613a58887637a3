//! Footprint queries against a built contact graph.

use crate::config::Footprint;
use crate::graph::contact_graph::ContactGraph;

/// Read-only query front end over a frozen [`ContactGraph`].
pub struct QueryService<'g> {
    graph: &'g ContactGraph,
}

impl<'g> QueryService<'g> {
    pub fn new(graph: &'g ContactGraph) -> Self {
        Self { graph }
    }

    pub fn describe(&self, id: &str) -> Footprint {
        describe(self.graph, id)
    }
}

/// Footprint of `id`. Absent identities get zero counts and `present: false`.
pub fn describe(graph: &ContactGraph, id: &str) -> Footprint {
    Footprint {
        identity: id.to_string(),
        present: graph.contains(id),
        sent: graph.sent_count(id),
        received: graph.received_count(id),
        team_size: graph.degree(id),
    }
}
