//! Career page watcher.
//!
//! Visits a list of career pages, pulls out job listings with generic markup
//! heuristics, keeps the ones whose title matches a target phrase, and reports
//! which of them were not there on the previous run.

pub mod aggregator;
pub mod config;
pub mod diff;
pub mod dom;
pub mod extract;
pub mod fetch;
pub mod matcher;
pub mod report;
pub mod store;

pub use aggregator::{RunAggregator, RunReport, SiteOutcome};
pub use config::{Cli, WatchConfig};
pub use dom::DomNode;
pub use extract::ListingExtractor;
pub use fetch::{HttpFetcher, PageFetcher};
pub use matcher::TitleMatcher;
pub use store::SnapshotStore;

/// Runs one full check: load the previous snapshot, visit every site, then
/// persist the new snapshot and write the HTML report.
///
/// Per-site failures end up in the report; only state or report I/O errors
/// are returned.
pub async fn run_once<F: PageFetcher>(config: WatchConfig, fetcher: F) -> anyhow::Result<RunReport> {
    let store = SnapshotStore::new(config.state_path.clone());
    let report_path = config.report_path.clone();
    let prior = store.load();

    let aggregator = RunAggregator::new(config, fetcher)?;
    let report = aggregator.run(&prior).await;

    store.save(&report.snapshot)?;
    report::write_html(&report, &report_path)?;
    Ok(report)
}
