pub mod file;
pub mod http;

pub use file::FileSource;
pub use http::{HttpClient, HttpSource};

use std::sync::Arc;

use crate::core::config::{Config, InputMode};
use crate::core::traits::ContentSource;

/// Pick the content source matching the configured input mode: filesystem
/// reads for `-d`, HTTP fetches for everything else.
pub fn for_config(config: &Config) -> Arc<dyn ContentSource> {
    match config.input {
        InputMode::Path(_) => Arc::new(FileSource::new()),
        InputMode::Stdin | InputMode::UrlList(_) => {
            Arc::new(HttpSource::new(config.user_agent.clone(), config.timeout))
        }
    }
}
