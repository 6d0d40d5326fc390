//! Title phrase matching.
//!
//! A phrase like `product manager` matches `Senior Product   Manager` but not
//! `Product Managerial Assistant`.

use anyhow::Context;
use common::JobListing;
use regex::{Regex, RegexBuilder};

/// Compiled set of target title phrases.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    patterns: Vec<Regex>,
}

impl TitleMatcher {
    /// Compiles every non-blank phrase into a whole-word, case-insensitive
    /// pattern where runs of whitespace match one or more whitespace chars.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> anyhow::Result<Self> {
        let mut patterns = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            let phrase = phrase.as_ref();
            let tokens: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
            if tokens.is_empty() {
                continue;
            }
            let pattern = RegexBuilder::new(&format!(r"\b{}\b", tokens.join(r"\s+")))
                .case_insensitive(true)
                .build()
                .with_context(|| format!("invalid target title {phrase:?}"))?;
            patterns.push(pattern);
        }
        Ok(Self { patterns })
    }

    /// True if any phrase occurs in `title` as a word-bounded substring.
    pub fn matches(&self, title: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(title))
    }

    /// Keeps the listings whose title matches, in their original order.
    pub fn filter(&self, listings: Vec<JobListing>) -> Vec<JobListing> {
        listings
            .into_iter()
            .filter(|listing| self.matches(&listing.title))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// One-shot form of [`TitleMatcher::matches`]. A phrase that fails to compile
/// matches nothing.
pub fn matches<S: AsRef<str>>(title: &str, phrases: &[S]) -> bool {
    TitleMatcher::new(phrases)
        .map(|matcher| matcher.matches(title))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_inside_longer_title() {
        assert!(matches("Senior Product Manager", &["product manager"]));
    }

    #[test]
    fn test_whitespace_is_flexible() {
        assert!(matches("Product   Manager", &["product manager"]));
        assert!(matches("Product\n\tManager - Payments", &["product  manager"]));
    }

    #[test]
    fn test_no_match_mid_word() {
        assert!(!matches("Product Managerial Assistant", &["product manager"]));
        assert!(!matches("productmanager", &["product manager"]));
        assert!(!matches("Maintainance Engineer", &["ai strategy"]));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches("Head of AI STRATEGY", &["ai strategy"]));
    }

    #[test]
    fn test_any_phrase_suffices() {
        let phrases = ["program manager", "digital consultant"];
        assert!(matches("Digital Consultant (m/f/d)", &phrases));
        assert!(!matches("Backend Engineer", &phrases));
    }

    #[test]
    fn test_hyphenated_phrase_is_literal() {
        let phrases = ["pre-sales solution consultant"];
        assert!(matches("Senior Pre-Sales Solution Consultant", &phrases));
        assert!(!matches("Presales Solution Consultant", &phrases));
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        assert!(!matches("Product Manager", &["product.manager"]));
    }

    #[test]
    fn test_blank_phrases_ignored() {
        let matcher = TitleMatcher::new(&["", "   "]).unwrap();
        assert!(matcher.is_empty());
        assert!(!matcher.matches("Anything"));
    }

    #[test]
    fn test_filter_keeps_order() {
        let matcher = TitleMatcher::new(&["product manager"]).unwrap();
        let listings = vec![
            JobListing::new("Product Manager B", "", "https://x.test/b"),
            JobListing::new("Engineer", "", "https://x.test/c"),
            JobListing::new("Product Manager A", "", "https://x.test/a"),
        ];
        let kept: Vec<_> = matcher
            .filter(listings)
            .into_iter()
            .map(|l| l.link)
            .collect();
        assert_eq!(kept, vec!["https://x.test/b", "https://x.test/a"]);
    }
}
