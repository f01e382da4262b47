use colored::Colorize;
use tracing::error;

use crate::core::results::{Finding, RunSummary};

pub struct OutputFormatter;

impl OutputFormatter {
    /// Print the startup banner
    pub fn print_banner() {
        println!("{}", "=".repeat(64).bright_cyan());
        println!(
            "{}",
            "  leak-sweep - Concurrent Secret & Leak Scanner"
                .bright_cyan()
                .bold()
        );
        println!("{}", "=".repeat(64).bright_cyan());
        println!();
    }

    /// Print one finding. In JSON mode the inferred category replaces the
    /// rule-declared one so downstream consumers see the display label.
    pub fn print_finding(finding: &Finding, label: &str, json: bool) {
        if json {
            let mut tagged = finding.clone();
            tagged.category = label.to_string();
            match serde_json::to_string(&tagged) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("failed to serialize finding: {}", e),
            }
        } else if label.is_empty() {
            println!(
                "{} {}",
                finding.matched.bright_red(),
                format!("({})", finding.location).bright_black()
            );
        } else {
            println!(
                "[{}] {} {}",
                label.bright_cyan().bold(),
                finding.matched.bright_red(),
                format!("({})", finding.location).bright_black()
            );
        }
    }

    /// Print the end-of-run summary line.
    pub fn print_summary(summary: &RunSummary) {
        println!();
        println!(
            "{} Scanned {} targets with {} rules in {} seconds",
            "✓".bright_green(),
            summary
                .targets_scanned
                .to_string()
                .bright_magenta()
                .bold(),
            summary.rules_loaded.to_string().bright_cyan().bold(),
            format!("{:.2}", summary.elapsed.as_secs_f64())
                .bright_red()
                .bold()
        );
    }

    /// Print error message
    pub fn print_error(message: &str) {
        eprintln!("{} {}", "✗".bright_red(), message.red());
    }
}
