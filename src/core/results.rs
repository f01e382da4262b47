use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One unit of scan input: a URL or a file path, taken from a single
/// input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub location: String,
}

impl WorkItem {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Content fetched for one work item. Owned by the worker that fetched it
/// until handed into the rule engine.
#[derive(Debug, Clone)]
pub struct ContentBlob {
    pub location: String,
    pub content: String,
}

impl ContentBlob {
    pub fn new(location: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: content.into(),
        }
    }

    /// Content size in kilobytes, the unit reported alongside every match.
    pub fn size_kb(&self) -> f64 {
        self.content.len() as f64 / 1024.0
    }
}

/// A single regex match found in one blob. Immutable once created; flows
/// through the results queue to the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "Match")]
    pub matched: String,
    #[serde(rename = "Url")]
    pub location: String,
    #[serde(rename = "Regex")]
    pub pattern: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "ContentLength")]
    pub content_kb: f64,
}

/// Counters reported after a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub targets_scanned: usize,
    pub rules_loaded: usize,
    pub findings_emitted: usize,
    pub elapsed: Duration,
}
