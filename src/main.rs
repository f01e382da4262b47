use clap::Parser;
use leak_sweep::cli::{Cli, OutputFormatter};
use leak_sweep::{pipeline, rules};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("leak-sweep {}", env!("CARGO_PKG_VERSION"));
        // Historical behavior: the version flag exits 1, not 0.
        std::process::exit(1);
    }

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.silent {
        "off"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    if !cli.silent {
        OutputFormatter::print_banner();
    }

    let used_default_rules = cli.rules.is_none();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            OutputFormatter::print_error(&format!("Error: {}", e));
            std::process::exit(1);
        }
    };

    // First-run setup is best effort: a failure is surfaced but does not
    // stop the run.
    if used_default_rules {
        if let Err(e) = rules::ensure_default_rules(&config.rules_path) {
            error!("first-run setup failed: {}", e);
        }
    }

    match pipeline::run(&config).await {
        Ok(summary) => {
            if !config.silent {
                OutputFormatter::print_summary(&summary);
            }
        }
        Err(e) => {
            OutputFormatter::print_error(&format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}
