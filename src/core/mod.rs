pub mod config;
pub mod error;
pub mod results;
pub mod traits;

pub use config::{Config, FileDefaults, InputMode};
pub use error::{Result, ScanError};
pub use results::{ContentBlob, Finding, RunSummary, WorkItem};
pub use traits::ContentSource;
