//! New-job detection against the previous run.

use std::collections::HashSet;

use common::{JobListing, SiteResult};

/// Jobs whose `link` did not appear in the prior run for the same site, in
/// `current` order.
///
/// Links are compared as exact strings. A trailing slash or reordered query
/// string makes a job look new.
pub fn partition_new(current: &[JobListing], prior: Option<&[JobListing]>) -> Vec<JobListing> {
    let seen: HashSet<&str> = prior
        .unwrap_or_default()
        .iter()
        .map(|job| job.link.as_str())
        .collect();

    current
        .iter()
        .filter(|job| !seen.contains(job.link.as_str()))
        .cloned()
        .collect()
}

/// Jobs recorded for `career_url` in a previous snapshot, if the site was there.
pub fn prior_jobs_for<'a>(snapshot: &'a [SiteResult], career_url: &str) -> Option<&'a [JobListing]> {
    snapshot
        .iter()
        .find(|site| site.career_url == career_url)
        .map(|site| site.jobs.as_slice())
}
