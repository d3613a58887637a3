pub mod articulation;
pub mod contact_graph;
pub mod query;
