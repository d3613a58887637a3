//! Mailweb Core — contact graphs from email corpora.
//!
//! This crate contains all analysis logic: mail tree discovery, header parsing,
//! contact graph construction, connector (articulation point) detection, and
//! footprint queries.

pub mod config;
pub mod graph;
pub mod output;
pub mod phases;
pub mod pipeline;
pub mod session;
