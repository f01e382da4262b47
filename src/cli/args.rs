use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::{expand_home, Config, FileDefaults};
use crate::core::error::{Result, ScanError};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 12.0; rv:88.0) Gecko/20100101 Firefox/88.0";
const DEFAULT_CONCURRENCY: usize = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "leak-sweep")]
#[command(about = "A concurrent scanner that sweeps remote pages and local files for leaked secrets", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Rules file, one `<regex><TAB><TAB><category>` record per line
    #[arg(short = 'r', long = "rules")]
    pub rules: Option<String>,

    /// User-Agent header for HTTP fetches
    #[arg(short = 'a', long = "user-agent")]
    pub user_agent: Option<String>,

    /// Silent mode: no banner, no logs, matches only
    #[arg(short = 's', long)]
    pub silent: bool,

    /// Concurrency level
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// File with a list of URLs to scan
    #[arg(short = 'u', long = "urls")]
    pub urls: Option<PathBuf>,

    /// Debug mode
    #[arg(short = 'b', long)]
    pub debug: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print version information and exit
    #[arg(long)]
    pub version: bool,

    /// File or directory to scan from disk
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Do not consult the built-in signature table when categorizing
    #[arg(long = "no-scan")]
    pub no_scan: bool,

    /// Emit one JSON object per match
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Merge CLI flags over file defaults into the immutable run
    /// configuration. Conflicting input flags are rejected here, before any
    /// scanning begins.
    pub fn into_config(self) -> Result<Config> {
        let defaults = FileDefaults::discover();

        let input = Config::select_input(self.urls, self.dir)?;

        let concurrency = self
            .concurrency
            .or(defaults.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ScanError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }

        let rules_raw = self
            .rules
            .or(defaults.rules)
            .unwrap_or_else(|| Config::default_rules_path().to_string());
        let rules_path = expand_home(&rules_raw)?;

        Ok(Config {
            rules_path,
            user_agent: self
                .user_agent
                .or(defaults.user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            silent: self.silent,
            concurrency,
            debug: self.debug,
            timeout: Duration::from_secs(
                self.timeout.or(defaults.timeout).unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            input,
            scan_signatures: !self.no_scan,
            json: self.json,
        })
    }
}
