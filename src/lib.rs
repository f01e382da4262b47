//! # leak-sweep
//!
//! A concurrent scanner that sweeps remote pages and local files for leaked
//! secrets.
//!
//! ## Features
//!
//! - **Rule-driven**: arbitrary regex rule lists with per-rule categories
//! - **Concurrent**: bounded worker pool over Tokio with backpressure
//! - **Classified**: well-known signatures get friendly labels automatically
//! - **Flexible input**: stdin, URL lists, or local files and directories
//!
//! ## Architecture
//!
//! Input lines flow through a bounded work queue into a fixed pool of
//! workers; each worker fetches content through a [`ContentSource`], runs
//! the shared [`rules::RuleSet`] over it and pushes matches to a single
//! aggregator that classifies and prints them. A completion tracker counts
//! every submitted item and every produced match so the run can drain and
//! exit exactly when all work is finished.
//!
//! ## Example
//!
//! ```rust
//! use leak_sweep::rules::RuleSet;
//! use leak_sweep::core::ContentBlob;
//! use std::io::Cursor;
//!
//! let rules = RuleSet::from_reader(Cursor::new("[a-f0-9]{32}\t\tMD5 hash\n")).unwrap();
//! let blob = ContentBlob::new("app.js", "token=9e107d9d372bb6826bd81d3542a419d6");
//!
//! let findings = rules.match_content(&blob);
//! println!("Found {} matches", findings.len());
//! ```

pub mod classify;
pub mod cli;
pub mod core;
pub mod input;
pub mod pipeline;
pub mod rules;
pub mod sources;

// Re-export commonly used types
pub use crate::core::{
    Config, ContentBlob, ContentSource, Finding, InputMode, Result, RunSummary, ScanError,
    WorkItem,
};

pub use crate::classify::classify;
pub use crate::pipeline::CompletionTracker;
pub use crate::rules::{Rule, RuleSet};
pub use crate::sources::{FileSource, HttpSource};
