//! Watch configuration: which titles to look for and where.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

const TARGET_JOB_TITLES: [&str; 9] = [
    "pre-sales solution consultant",
    "product manager",
    "program manager",
    "senior project manager",
    "associate product manager",
    "digital consultant",
    "product consultant",
    "ai strategy",
    "digital product manager",
];

const CAREER_URLS: [&str; 8] = [
    "https://careers.adyen.com/vacancies?location=Amsterdam",
    "https://www.crobox.com/careers-crobox",
    "https://www.workingatwearebrain.com/",
    "https://www.valtech.com/nl-nl/carriere/vacatures/?country=netherlands",
    "https://commercetools.com/careers/jobs",
    "https://www.contentstack.com/company/careers",
    "https://www.epam.com/careers/job-listings?country=Netherlands&city=Amsterdam",
    "https://www.bloomreach.com/en/careers",
];

/// Everything one run needs to know. Built once and handed to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Title phrases a listing must contain to be kept.
    pub target_titles: Vec<String>,
    /// Career pages to visit, in this order.
    pub career_urls: Vec<String>,
    /// Snapshot of the previous run, overwritten at the end of each run.
    pub state_path: PathBuf,
    /// Rendered HTML report.
    pub report_path: PathBuf,
    pub fetch_timeout_secs: u64,
}

impl WatchConfig {
    /// Reads a TOML file; fields it leaves out keep their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            target_titles: TARGET_JOB_TITLES.iter().map(|s| s.to_string()).collect(),
            career_urls: CAREER_URLS.iter().map(|s| s.to_string()).collect(),
            state_path: PathBuf::from("job-results.json"),
            report_path: PathBuf::from("job-report.html"),
            fetch_timeout_secs: 60,
        }
    }
}

/// Command line for the `career-watch` binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "career-watch", about = "Checks career pages for new matching jobs")]
pub struct Cli {
    /// TOML file overriding the built-in titles, URLs and paths
    #[arg(long, env = "CAREER_WATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Where the previous run's results are read from and written to
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Where the HTML report is written
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Per-page fetch timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Defaults, then the config file, then command-line flags.
    pub fn build_config(&self) -> anyhow::Result<WatchConfig> {
        let mut config = match &self.config {
            Some(path) => WatchConfig::from_file(path)?,
            None => WatchConfig::default(),
        };
        if let Some(state) = &self.state {
            config.state_path = state.clone();
        }
        if let Some(report) = &self.report {
            config.report_path = report.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.fetch_timeout_secs = secs;
        }
        Ok(config)
    }
}
