//! Input enumeration: turns the selected input mode into a line-oriented
//! stream of work-item locations, pre-counting lines where possible so the
//! worker pool can be clamped to the real amount of work.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::config::{Config, InputMode};
use crate::core::error::{Result, ScanError};

/// An opened input stream plus what is known about its size up front.
/// Iterating yields one location per line, terminators stripped.
pub struct ScanInput {
    reader: Box<dyn BufRead + Send>,
    line_count: Option<usize>,
    // Holds the directory listing for the duration of the run; the file is
    // removed on drop, success or not.
    _listing: Option<NamedTempFile>,
}

impl std::fmt::Debug for ScanInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanInput")
            .field("line_count", &self.line_count)
            .field("_listing", &self._listing)
            .finish_non_exhaustive()
    }
}

impl ScanInput {
    pub fn open(config: &Config) -> Result<Self> {
        match &config.input {
            InputMode::Stdin => {
                debug!("input: stdin");
                Ok(Self {
                    reader: Box::new(BufReader::new(io::stdin())),
                    line_count: None,
                    _listing: None,
                })
            }
            InputMode::UrlList(path) => {
                let lines = count_lines(path)?;
                debug!("input: url list {} ({} lines)", path.display(), lines);
                let file = File::open(path).map_err(|e| {
                    ScanError::Config(format!(
                        "unable to open URL list {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Self {
                    reader: Box::new(BufReader::new(file)),
                    line_count: Some(lines),
                    _listing: None,
                })
            }
            InputMode::Path(path) => Self::open_path(path),
        }
    }

    fn open_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|_| {
            ScanError::Config(format!("could not open directory {}", path.display()))
        })?;

        let (listing, count) = if metadata.is_dir() {
            write_listing(list_files(path))?
        } else {
            write_listing(std::iter::once(path.to_string_lossy().into_owned()))?
        };

        debug!("input: path {} ({} files)", path.display(), count);

        let file = File::open(listing.path())?;
        Ok(Self {
            reader: Box::new(BufReader::new(file)),
            line_count: Some(count),
            _listing: Some(listing),
        })
    }

    /// Number of workers to actually start: never more than there are input
    /// lines, when that is known before dispatch.
    pub fn effective_workers(&self, configured: usize) -> usize {
        match self.line_count {
            Some(lines) => configured.min(lines),
            None => configured,
        }
    }
}

impl Iterator for ScanInput {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Count the lines of a file in a single pre-pass.
pub fn count_lines(path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| {
        ScanError::Config(format!("unable to open {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file).lines().count())
}

/// Recursively enumerate the files under `dir`. Unreadable entries are
/// skipped.
fn list_files(dir: &Path) -> impl Iterator<Item = String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_string_lossy().into_owned())
}

/// Materialize an iterator of paths into a temp listing, one per line.
fn write_listing(paths: impl Iterator<Item = String>) -> Result<(NamedTempFile, usize)> {
    let mut listing = NamedTempFile::new()?;
    let mut count = 0;
    for path in paths {
        writeln!(listing, "{}", path)?;
        count += 1;
    }
    listing.flush()?;
    Ok((listing, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config_for(input: InputMode) -> Config {
        Config {
            rules_path: "/tmp/rules.txt".into(),
            user_agent: "test".to_string(),
            silent: true,
            concurrency: 50,
            debug: false,
            timeout: Duration::from_secs(10),
            input,
            scan_signatures: true,
            json: false,
        }
    }

    #[test]
    fn test_count_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "one\ntwo\nthree\n").unwrap();
        assert_eq!(count_lines(file.path()).unwrap(), 3);
    }

    #[test]
    fn test_url_list_clamps_workers_to_line_count() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "https://a.example/app.js\nhttps://b.example/app.js\nhttps://c.example/app.js\n"
        )
        .unwrap();

        let config = config_for(InputMode::UrlList(file.path().to_path_buf()));
        let input = ScanInput::open(&config).unwrap();
        assert_eq!(input.effective_workers(50), 3);
    }

    #[test]
    fn test_stdin_keeps_configured_workers() {
        let config = config_for(InputMode::Stdin);
        let input = ScanInput::open(&config).unwrap();
        assert_eq!(input.effective_workers(50), 50);
    }

    #[test]
    fn test_single_file_yields_one_worker_and_one_line() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "token=abc").unwrap();

        let config = config_for(InputMode::Path(file.path().to_path_buf()));
        let input = ScanInput::open(&config).unwrap();
        assert_eq!(input.effective_workers(50), 1);

        let lines: Vec<String> = input.map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec![file.path().to_string_lossy().into_owned()]);
    }

    #[test]
    fn test_directory_listing_is_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.js"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/b.js"), "y").unwrap();

        let config = config_for(InputMode::Path(dir.path().to_path_buf()));
        let input = ScanInput::open(&config).unwrap();
        assert_eq!(input.effective_workers(50), 2);

        let mut lines: Vec<String> = input.map(|l| l.unwrap()).collect();
        lines.sort();
        assert!(lines[0].ends_with("a.js"));
        assert!(lines[1].ends_with("b.js"));
    }

    #[test]
    fn test_missing_path_is_fatal() {
        let config = config_for(InputMode::Path("/nonexistent/dir".into()));
        let err = ScanInput::open(&config).unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_lines_strip_terminators() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "https://a.example/app.js\r\nhttps://b.example/app.js").unwrap();

        let config = config_for(InputMode::UrlList(file.path().to_path_buf()));
        let input = ScanInput::open(&config).unwrap();
        let lines: Vec<String> = input.map(|l| l.unwrap()).collect();
        assert_eq!(
            lines,
            vec!["https://a.example/app.js", "https://b.example/app.js"]
        );
    }
}
