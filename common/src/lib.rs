//! Shared data model for career-page watching.
//!
//! These types are what the watcher persists between runs and what the
//! report is rendered from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// One posting found on a career page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub title: String,
    /// Empty when the page showed no location for the posting.
    #[serde(default)]
    pub location: String,
    /// Absolute URL of the posting. Identifies the job across runs.
    pub link: String,
}

impl JobListing {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            link: link.into(),
        }
    }
}

/// Outcome of checking one configured career URL in one run.
///
/// `jobs` is always present; a failed site carries `error` and no jobs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteResult {
    pub career_url: String,
    pub last_checked: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub jobs: Vec<JobListing>,
}

impl SiteResult {
    pub fn success(career_url: impl Into<String>, jobs: Vec<JobListing>) -> Self {
        Self {
            career_url: career_url.into(),
            last_checked: Utc::now(),
            error: None,
            jobs,
        }
    }

    pub fn failure(career_url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            career_url: career_url.into(),
            last_checked: Utc::now(),
            error: Some(error.into()),
            jobs: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Equality that ignores `last_checked`, which differs on every run.
    pub fn same_content(&self, other: &SiteResult) -> bool {
        self.career_url == other.career_url && self.jobs == other.jobs && self.error == other.error
    }
}

/// A listing that was absent from the previous run of its site.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[serde(flatten)]
    pub listing: JobListing,
    pub company: String,
    pub career_url: String,
}

impl NewJob {
    pub fn from_listing(listing: JobListing, career_url: &str) -> Self {
        Self {
            listing,
            company: company_from_url(career_url),
            career_url: career_url.to_string(),
        }
    }
}

/// Persisted state between runs: one entry per configured URL, in config order.
pub type RunSnapshot = Vec<SiteResult>;

/// Company name guessed from a career URL: the first hostname label after
/// dropping a leading `www.`.
///
/// Falls back to the raw input when the URL has no host.
pub fn company_from_url(career_url: &str) -> String {
    let host = display_host(career_url);
    host.split('.').next().unwrap_or(&host).to_string()
}

/// Hostname without a leading `www.`, or the raw input when it does not parse.
pub fn display_host(career_url: &str) -> String {
    match Url::parse(career_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
    {
        Some(host) => host.strip_prefix("www.").unwrap_or(&host).to_string(),
        None => career_url.to_string(),
    }
}
