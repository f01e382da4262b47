//! Maps findings to display categories.
//!
//! A small fixed table of well-known signature patterns overrides the
//! rule-declared category for presentation. The table is data: adding an
//! entry never touches control flow.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::core::results::Finding;

lazy_static! {
    /// Well-known pattern text -> friendly label.
    static ref KNOWN_SIGNATURES: HashMap<&'static str, &'static str> = {
        let mut table = HashMap::new();
        table.insert(r"AAAA[A-Za-z0-9_-]{7}:[A-Za-z0-9_-]{140}", "Firebase");
        table.insert(
            r"sq0csp-[ 0-9A-Za-z\-_]{43}|sq0[a-z]{3}-[0-9A-Za-z\-_]{22,43}",
            "Square oauth secret",
        );
        table.insert(
            r"sqOatp-[0-9A-Za-z\-_]{22}|EAAA[a-zA-Z0-9]{60}",
            "Square access token",
        );
        table.insert(r"AC[a-zA-Z0-9_\-]{32}", "Twilio account SID");
        table.insert(r"AP[a-zA-Z0-9_\-]{32}", "Twilio APP SID");
        table.insert(r"[A-Za-z0-9]{125}", "Facebook");
        table.insert(
            r"s3\.amazonaws.com[/]+|[a-zA-Z0-9_-]*\.s3\.amazonaws.com",
            "S3 bucket",
        );
        table.insert(
            r"\b(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)){3}\b",
            "IPv4",
        );
        table.insert(r"[a-f0-9]{32}", "MD5 hash");
        table.insert(r"6L[0-9A-Za-z-_]{38}|^6[0-9a-zA-Z_-]{39}", "Google Recaptcha");
        table.insert(r"key-[0-9a-zA-Z]{32}", "Mailgun");
        table.insert(
            r"[0-9a-f]{8}-[0-9a-f]{4}-[0-5][0-9a-f]{3}-[089ab][0-9a-f]{3}-[0-9a-f]{12}",
            "UUID",
        );
        table.insert(
            r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
            "UUID",
        );
        table.insert(
            r"(eyJ|YTo|Tzo|PD[89]|aHR0cHM6L|aHR0cDo|rO0)[a-zA-Z0-9+/]+={0,2}",
            "Base64",
        );
        table.insert(r"<h1>Index of (.*?)</h1>", "Index page");
        table
    };
}

/// Resolve the display category for a finding. Returns `None` when the
/// finding must be suppressed (empty pattern text).
pub fn classify(finding: &Finding, scan_signatures: bool) -> Option<String> {
    if scan_signatures {
        if let Some(label) = KNOWN_SIGNATURES.get(finding.pattern.as_str()) {
            return Some((*label).to_string());
        }
    }

    if finding.pattern.is_empty() {
        return None;
    }

    Some(finding.category.clone())
}
