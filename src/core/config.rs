use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use super::error::{Result, ScanError};

/// Where work items come from. Exactly one mode is active per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// URLs read from standard input.
    Stdin,
    /// URLs read from a list file (`-u`).
    UrlList(PathBuf),
    /// A file or directory to scan from disk (`-d`).
    Path(PathBuf),
}

/// Immutable run configuration, constructed once at startup and shared by
/// every pipeline component.
#[derive(Debug, Clone)]
pub struct Config {
    pub rules_path: PathBuf,
    pub user_agent: String,
    pub silent: bool,
    pub concurrency: usize,
    pub debug: bool,
    pub timeout: Duration,
    pub input: InputMode,
    /// When false (`--no-scan`), the built-in signature table is not
    /// consulted and only rule-declared categories are reported.
    pub scan_signatures: bool,
    pub json: bool,
}

impl Config {
    pub fn default_rules_path() -> &'static str {
        "~/.config/leak-sweep/rules.txt"
    }

    /// Validate that at most one explicit input method was requested and
    /// pick the active mode.
    pub fn select_input(urls: Option<PathBuf>, dir: Option<PathBuf>) -> Result<InputMode> {
        match (urls, dir) {
            (Some(_), Some(_)) => Err(ScanError::Config(
                "only one input method may be specified (-u or -d)".to_string(),
            )),
            (Some(list), None) => Ok(InputMode::UrlList(list)),
            (None, Some(path)) => Ok(InputMode::Path(path)),
            (None, None) => Ok(InputMode::Stdin),
        }
    }
}

/// Expand a leading `~/` against the current user's home directory. Failing
/// to resolve the home directory is fatal for the default rule path.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| ScanError::Config("could not resolve home directory".to_string()))?;
        Ok(home.join(rest))
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Optional defaults picked up from a TOML file before CLI flags are
/// applied. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDefaults {
    pub user_agent: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout: Option<u64>,
    pub rules: Option<String>,
}

impl FileDefaults {
    /// Search the usual locations and return the first parseable file, or
    /// built-in defaults when none is found.
    pub fn discover() -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".config/leak-sweep/config.toml"));
        }
        candidates.push(PathBuf::from(".leak_sweep.toml"));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(defaults) => {
                    info!("Loaded defaults from {}", path.display());
                    return defaults;
                }
                Err(e) => {
                    warn!("Failed to load defaults from {}: {}", path.display(), e);
                }
            }
        }

        Self::default()
    }

    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ScanError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_input_stdin_by_default() {
        let mode = Config::select_input(None, None).unwrap();
        assert_eq!(mode, InputMode::Stdin);
    }

    #[test]
    fn test_select_input_conflicting_modes() {
        let err = Config::select_input(
            Some(PathBuf::from("urls.txt")),
            Some(PathBuf::from("./scripts")),
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_expand_home_passthrough() {
        let path = expand_home("/tmp/rules.txt").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/rules.txt"));
    }

    #[test]
    fn test_expand_home_tilde() {
        let path = expand_home("~/.config/leak-sweep/rules.txt").unwrap();
        assert!(path.ends_with(".config/leak-sweep/rules.txt"));
        assert!(!path.to_string_lossy().contains('~'));
    }
}
