//! Rule loading and matching.
//!
//! A rule file is a newline-delimited list of `<regex>\t\t<category>`
//! records. The category is optional; blank lines are skipped; any invalid
//! pattern aborts startup with its line number.

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::core::error::{Result, ScanError};
use crate::core::results::{ContentBlob, Finding};

/// Literal separator between the pattern and its category.
const CATEGORY_SEPARATOR: &str = "\t\t";

/// Starter rules written on first run when the default rule file is absent.
const STARTER_RULES: &str = concat!(
    "[a-f0-9]{32}\t\tMD5 hash\n",
    "\\b(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(\\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)){3}\\b\t\tIPv4\n",
    "AAAA[A-Za-z0-9_-]{7}:[A-Za-z0-9_-]{140}\t\tFirebase\n",
    "key-[0-9a-zA-Z]{32}\t\tMailgun\n",
    "AKIA[0-9A-Z]{16}\t\tAWS access key\n",
    "<h1>Index of (.*?)</h1>\t\tIndex page\n",
);

/// One compiled pattern with its declared category. The raw pattern text is
/// the rule's identity.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub regex: Regex,
    pub category: String,
}

/// The full rule list, compiled once at startup and shared read-only across
/// all workers.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            ScanError::Config(format!("unable to open rules file {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse and compile rules from any line-oriented reader. Duplicate
    /// pattern text keeps its first position and takes the last category.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut rules: Vec<Rule> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let raw = line?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (pattern, category) = split_rule_line(trimmed);
            let regex = Regex::new(pattern).map_err(|_| ScanError::InvalidPattern {
                line: idx + 1,
                text: trimmed.to_string(),
            })?;

            debug!("rule loaded: {} ({})", pattern, category);

            match rules.iter_mut().find(|r| r.pattern == pattern) {
                Some(existing) => existing.category = category,
                None => rules.push(Rule {
                    pattern: pattern.to_string(),
                    regex,
                    category,
                }),
            }
        }

        Ok(Self { rules })
    }

    /// Find every non-overlapping match of every rule in the blob. Rules are
    /// applied in load order and matches reported in occurrence order.
    pub fn match_content(&self, blob: &ContentBlob) -> Vec<Finding> {
        let size_kb = blob.size_kb();
        let mut findings = Vec::new();

        for rule in &self.rules {
            for m in rule.regex.find_iter(&blob.content) {
                findings.push(Finding {
                    matched: m.as_str().to_string(),
                    location: blob.location.clone(),
                    pattern: rule.pattern.clone(),
                    category: rule.category.clone(),
                    content_kb: size_kb,
                });
            }
        }

        findings
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn split_rule_line(line: &str) -> (&str, String) {
    // Everything after the first separator is the category, verbatim, so
    // embedded tab pairs survive.
    match line.split_once(CATEGORY_SEPARATOR) {
        Some((pattern, category)) => (pattern, category.to_string()),
        None => (line, String::new()),
    }
}

/// Write the starter rule set if the default rule file does not exist yet.
/// Best effort: the caller logs a failure and the run proceeds.
pub fn ensure_default_rules(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, STARTER_RULES)?;
    debug!("wrote starter rules to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn rule_set(input: &str) -> RuleSet {
        RuleSet::from_reader(Cursor::new(input.to_string())).unwrap()
    }

    #[test]
    fn test_category_round_trip() {
        let rules = rule_set("abc\t\tcat\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.rules()[0].pattern, "abc");
        assert_eq!(rules.rules()[0].category, "cat");
    }

    #[test]
    fn test_missing_separator_gives_empty_category() {
        let rules = rule_set("sk-[a-zA-Z0-9]{48}\n");
        assert_eq!(rules.rules()[0].category, "");
    }

    #[test]
    fn test_embedded_separator_rejoined_into_category() {
        let rules = rule_set("abc\t\tcat\t\tmore\n");
        assert_eq!(rules.rules()[0].pattern, "abc");
        assert_eq!(rules.rules()[0].category, "cat\t\tmore");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rules = rule_set("abc\t\tone\n\n   \n\t\ndef\t\ttwo\n");
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_reports_line_number() {
        let err = RuleSet::from_reader(Cursor::new("abc\t\tok\n\n[unclosed\t\tbad\n".to_string()))
            .unwrap_err();
        match err {
            ScanError::InvalidPattern { line, text } => {
                assert_eq!(line, 3);
                assert!(text.starts_with("[unclosed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_pattern_keeps_last_category() {
        let rules = rule_set("abc\t\tfirst\ndef\t\tother\nabc\t\tsecond\n");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[0].pattern, "abc");
        assert_eq!(rules.rules()[0].category, "second");
    }

    #[test]
    fn test_match_content_finds_all_occurrences_in_order() {
        let rules = rule_set("[a-f0-9]{32}\t\tMD5 hash\n");
        let blob = ContentBlob::new(
            "app.js",
            "a=9e107d9d372bb6826bd81d3542a419d6 b=5d41402abc4b2a76b9719d911017c592",
        );

        let findings = rules.match_content(&blob);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].matched, "9e107d9d372bb6826bd81d3542a419d6");
        assert_eq!(findings[1].matched, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(findings[0].category, "MD5 hash");
    }

    #[test]
    fn test_match_content_is_idempotent() {
        let rules = rule_set("[a-f0-9]{32}\t\tMD5 hash\ntoken=\t\tassignment\n");
        let blob = ContentBlob::new("app.js", "token=9e107d9d372bb6826bd81d3542a419d6 end");

        let first = rules.match_content(&blob);
        let second = rules.match_content(&blob);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rule_order_drives_match_order() {
        let rules = rule_set("bbb\t\tsecond rule\naaa\t\tfirst rule\n");
        let blob = ContentBlob::new("x", "aaa bbb");

        let findings = rules.match_content(&blob);
        assert_eq!(findings[0].pattern, "bbb");
        assert_eq!(findings[1].pattern, "aaa");
    }

    #[test]
    fn test_starter_rules_all_compile() {
        let rules = rule_set(STARTER_RULES);
        assert_eq!(rules.len(), 6);
    }
}
