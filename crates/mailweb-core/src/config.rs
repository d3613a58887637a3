//! Core data types and configuration for Mailweb analysis.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed message: a sender and every valid address on its `To:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailRecord {
    pub sender: String,
    pub recipients: Vec<String>,
}

impl MailRecord {
    pub fn new(sender: impl Into<String>, recipients: Vec<String>) -> Self {
        Self {
            sender: sender.into(),
            recipients,
        }
    }

    /// Iterate `(sender, recipient)` pairs, one per recipient.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.recipients
            .iter()
            .map(move |r| (self.sender.as_str(), r.as_str()))
    }
}

/// Communication footprint of a single identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub identity: String,
    /// False when the identity never appeared in any recorded message.
    pub present: bool,
    /// Distinct identities this one sent mail to.
    pub sent: usize,
    /// Distinct identities this one received mail from.
    pub received: usize,
    /// Distinct identities exchanged with in either direction.
    pub team_size: usize,
}

/// Configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub mail_path: String,
    /// Plain-text connector listing, one identity per line.
    pub output_path: Option<String>,
    /// Optional JSON report.
    pub json_path: Option<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

fn default_max_file_size() -> u64 {
    10_000_000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mail_path: String::new(),
            output_path: None,
            json_path: None,
            exclude_patterns: Vec::new(),
            max_file_size: default_max_file_size(),
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of an analysis run — matches the JSON report schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    /// Sorted connector identities.
    #[serde(default)]
    pub connectors: Vec<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            version: default_version(),
            metadata: HashMap::new(),
            stats: HashMap::new(),
            connectors: Vec::new(),
        }
    }
}

impl AnalysisResult {
    /// Read an integer stat, 0 when missing.
    pub fn stat(&self, key: &str) -> u64 {
        self.stats.get(key).and_then(|v| v.as_u64()).unwrap_or(0)
    }
}
