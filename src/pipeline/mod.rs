//! The concurrent scanning pipeline: a dispatch loop feeding a bounded work
//! queue, a fixed pool of fetch+match workers, and a single aggregator that
//! owns stdout. The completion tracker is the only termination signal.

pub mod tracker;

pub use tracker::CompletionTracker;

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::classify::classify;
use crate::cli::output::OutputFormatter;
use crate::core::config::Config;
use crate::core::error::{Result, ScanError};
use crate::core::results::{Finding, RunSummary, WorkItem};
use crate::core::traits::ContentSource;
use crate::input::ScanInput;
use crate::rules::RuleSet;
use crate::sources;

/// Load the rules, open the configured input and run the full pipeline.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let rules = Arc::new(RuleSet::load(&config.rules_path)?);
    let input = ScanInput::open(config)?;
    let source = sources::for_config(config);
    run_with(config, rules, input, source).await
}

/// Run the pipeline against an already-opened input and content source.
/// Split out from [`run`] so tests can substitute both.
pub async fn run_with(
    config: &Config,
    rules: Arc<RuleSet>,
    input: ScanInput,
    source: Arc<dyn ContentSource>,
) -> Result<RunSummary> {
    let started = Instant::now();

    let workers = input.effective_workers(config.concurrency);
    let capacity = config.concurrency.max(1);
    let (work_tx, work_rx) = mpsc::channel::<WorkItem>(capacity);
    let (results_tx, results_rx) = mpsc::channel::<Finding>(capacity);
    let tracker = Arc::new(CompletionTracker::new());

    debug!("threads open: {}", workers);

    let aggregator = tokio::spawn(aggregate(
        results_rx,
        tracker.clone(),
        config.json,
        config.scan_signatures,
    ));

    let work_rx = Arc::new(Mutex::new(work_rx));
    let mut handles = Vec::with_capacity(workers);
    for id in 0..workers {
        handles.push(tokio::spawn(worker(
            id,
            work_rx.clone(),
            results_tx.clone(),
            source.clone(),
            rules.clone(),
            tracker.clone(),
        )));
    }
    drop(results_tx);

    // Dispatch: one work item per input line, in order. The counter goes up
    // before the enqueue so it can never transiently hit zero while items
    // are still being submitted.
    let mut submitted = 0usize;
    for line in input {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("input read failed, stopping dispatch: {}", e);
                break;
            }
        };
        tracker.add(1);
        submitted += 1;
        if work_tx.send(WorkItem::new(line)).await.is_err() {
            tracker.done();
            break;
        }
    }

    tracker.wait().await;

    // Everything submitted has been fully handled; close the work queue so
    // the idle workers exit, join the pool, then let the aggregator drain.
    drop(work_tx);
    for handle in handles {
        handle
            .await
            .map_err(|e| ScanError::Unknown(format!("worker task failed: {}", e)))?;
    }
    let findings_emitted = aggregator
        .await
        .map_err(|e| ScanError::Unknown(format!("aggregator task failed: {}", e)))?;

    Ok(RunSummary {
        targets_scanned: submitted,
        rules_loaded: rules.len(),
        findings_emitted,
        elapsed: started.elapsed(),
    })
}

/// One pool worker: pull an item, fetch its content, push every match.
/// Fetch failures only cost the one item.
async fn worker(
    id: usize,
    work_rx: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
    results_tx: mpsc::Sender<Finding>,
    source: Arc<dyn ContentSource>,
    rules: Arc<RuleSet>,
    tracker: Arc<CompletionTracker>,
) {
    loop {
        let item = { work_rx.lock().await.recv().await };
        let Some(item) = item else {
            break;
        };

        match source.fetch(&item.location).await {
            Ok(blob) => {
                for finding in rules.match_content(&blob) {
                    tracker.add(1);
                    if results_tx.send(finding).await.is_err() {
                        // Aggregator is gone; balance the increment so the
                        // run can still terminate.
                        tracker.done();
                    }
                }
            }
            Err(e) => {
                debug!(
                    "worker {}: {} fetch failed for {}: {}",
                    id,
                    source.name(),
                    item.location,
                    e
                );
            }
        }

        tracker.done();
    }

    debug!("worker {} exiting", id);
}

/// The single results consumer and the only stdout writer for matches.
async fn aggregate(
    mut results_rx: mpsc::Receiver<Finding>,
    tracker: Arc<CompletionTracker>,
    json: bool,
    scan_signatures: bool,
) -> usize {
    let mut emitted = 0usize;

    while let Some(finding) = results_rx.recv().await {
        if let Some(label) = classify(&finding, scan_signatures) {
            OutputFormatter::print_finding(&finding, &label, json);
            emitted += 1;
        }
        tracker.done();
    }

    emitted
}
