pub mod connectors;
pub mod discovery;
pub mod headers;
pub mod parsing;
