//! One pass over every configured career page.

use anyhow::Context;
use common::{JobListing, NewJob, RunSnapshot, SiteResult};
use tracing::{info, warn};
use url::Url;

use crate::config::WatchConfig;
use crate::diff::{partition_new, prior_jobs_for};
use crate::extract::ListingExtractor;
use crate::fetch::PageFetcher;
use crate::matcher::TitleMatcher;

/// What a successfully processed site produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOutcome {
    /// Listings whose title matched a target phrase.
    pub jobs: Vec<JobListing>,
    /// The subset of `jobs` not seen for this site in the previous run.
    pub new_jobs: Vec<JobListing>,
}

/// Result of a whole run: the next snapshot plus every new job across sites.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub snapshot: RunSnapshot,
    pub new_jobs: Vec<NewJob>,
}

impl RunReport {
    /// Matching jobs over all sites.
    pub fn total_jobs(&self) -> usize {
        self.snapshot.iter().map(|site| site.jobs.len()).sum()
    }

    pub fn failed_sites(&self) -> impl Iterator<Item = &SiteResult> {
        self.snapshot.iter().filter(|site| site.is_error())
    }

    /// Whether `link` was reported as new in this run.
    pub fn is_new(&self, link: &str) -> bool {
        self.new_jobs.iter().any(|job| job.listing.link == link)
    }
}

/// Visits configured sites one after another and collects their results.
pub struct RunAggregator<F> {
    config: WatchConfig,
    matcher: TitleMatcher,
    fetcher: F,
}

impl<F: PageFetcher> RunAggregator<F> {
    pub fn new(config: WatchConfig, fetcher: F) -> anyhow::Result<Self> {
        let matcher = TitleMatcher::new(&config.target_titles)?;
        Ok(Self {
            config,
            matcher,
            fetcher,
        })
    }

    /// Fetches, extracts, filters and diffs a single site.
    pub async fn process_site(
        &self,
        career_url: &str,
        prior: &[SiteResult],
    ) -> anyhow::Result<SiteOutcome> {
        let url = Url::parse(career_url).with_context(|| format!("invalid career URL {career_url}"))?;
        let html = self.fetcher.fetch(&url).await?;

        let listings = ListingExtractor::new(url).extract_html(&html);
        info!("Found {} total job listings", listings.len());

        let jobs = self.matcher.filter(listings);
        info!("Found {} matching job listings", jobs.len());

        let new_jobs = partition_new(&jobs, prior_jobs_for(prior, career_url));
        Ok(SiteOutcome { jobs, new_jobs })
    }

    /// Processes every configured site in order. A failing site is recorded
    /// with its error and no jobs; it never stops the run.
    pub async fn run(&self, prior: &[SiteResult]) -> RunReport {
        let mut snapshot = Vec::with_capacity(self.config.career_urls.len());
        let mut new_jobs = Vec::new();

        for career_url in &self.config.career_urls {
            info!("Processing: {career_url}");
            match self.process_site(career_url, prior).await {
                Ok(outcome) => {
                    if !outcome.new_jobs.is_empty() {
                        info!("Found {} NEW matching jobs!", outcome.new_jobs.len());
                    }
                    new_jobs.extend(
                        outcome
                            .new_jobs
                            .into_iter()
                            .map(|job| NewJob::from_listing(job, career_url)),
                    );
                    snapshot.push(SiteResult::success(career_url.as_str(), outcome.jobs));
                }
                Err(err) => {
                    warn!("Error processing {career_url}: {err:#}");
                    snapshot.push(SiteResult::failure(career_url.as_str(), format!("{err:#}")));
                }
            }
        }

        RunReport { snapshot, new_jobs }
    }
}
