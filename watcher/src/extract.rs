//! Heuristic job-listing extraction from arbitrary career-page markup.
//!
//! Career sites share no markup, so extraction is a layered guess: pick
//! over-inclusive candidate containers, then look inside each for something
//! that reads like a title, a location and a link. Candidates without a title
//! or a link are dropped.

use common::JobListing;
use scraper::Html;
use tracing::debug;
use url::Url;

use crate::dom::DomNode;

type Predicate<N> = fn(&N) -> bool;

const LISTING_CLASSES: [&str; 4] = ["job-listing", "job-card", "job-result", "job-item"];
const LOCATION_FRAGMENTS: [&str; 6] = ["location", "place", "city", "address", "region", "country"];

fn is_heading<N: DomNode>(node: &N) -> bool {
    matches!(node.tag_name(), "h1" | "h2" | "h3" | "h4" | "h5")
}

fn is_inline_box<N: DomNode>(node: &N) -> bool {
    matches!(node.tag_name(), "a" | "span" | "div")
}

/// Elements that might be one posting, in the order they are tried.
fn candidate_predicates<N: DomNode>() -> [Predicate<N>; 7] {
    [
        |n| LISTING_CLASSES.iter().any(|class| n.has_class_token(class)),
        |n| matches!(n.tag_name(), "div" | "li" | "tr") && n.class_contains("job"),
        |n| n.is_tag("tr") && ancestors(n).any(|a| a.is_tag("table")),
        |n| n.is_tag("li") && n.parent_element().is_some_and(|p| matches!(p.tag_name(), "ul" | "ol")),
        |n| n.is_tag("div") && n.has_class_token("row"),
        |n| n.has_class_token("card"),
        |n| n.has_class_token("listing"),
    ]
}

/// Title element signals, highest priority first.
fn title_predicates<N: DomNode>() -> [Predicate<N>; 7] {
    [
        is_heading,
        |n| is_inline_box(n) && n.class_contains("title"),
        |n| is_inline_box(n) && n.class_contains("job"),
        |n| is_inline_box(n) && n.class_contains("position"),
        |n| is_inline_box(n) && n.class_contains("role"),
        |n| n.is_tag("a"),
        |n| ["name", "position", "role"].iter().any(|class| n.has_class_token(class)),
    ]
}

fn ancestors<N: DomNode>(node: &N) -> impl Iterator<Item = N> {
    std::iter::successors(node.parent_element(), |n| n.parent_element())
}

/// First node satisfying the highest-priority predicate that matches anything.
fn first_by_priority<'n, N: DomNode>(nodes: &'n [N], predicates: &[Predicate<N>]) -> Option<&'n N> {
    predicates
        .iter()
        .find_map(|predicate| nodes.iter().find(|node| predicate(node)))
}

/// First node in document order whose class contains any of `fragments`.
fn first_with_class_fragment<'n, N: DomNode>(nodes: &'n [N], fragments: &[&str]) -> Option<&'n N> {
    nodes
        .iter()
        .find(|node| fragments.iter().any(|fragment| node.class_contains(fragment)))
}

/// Pulls raw, unfiltered listings out of a rendered page.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    base_url: Url,
}

impl ListingExtractor {
    /// `base_url` is the page address relative links are resolved against.
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Parses `html` and extracts from the whole document.
    pub fn extract_html(&self, html: &str) -> Vec<JobListing> {
        let document = Html::parse_document(html);
        self.extract(&document.root_element())
    }

    /// Extracts listings below `root` in document order. Overlapping
    /// containers may produce duplicates; nothing is deduplicated here.
    pub fn extract<N: DomNode>(&self, root: &N) -> Vec<JobListing> {
        let candidates = candidate_predicates::<N>();
        let containers: Vec<N> = root
            .descendants()
            .into_iter()
            .filter(|node| candidates.iter().any(|predicate| predicate(node)))
            .collect();

        let listings: Vec<JobListing> = containers
            .iter()
            .filter_map(|container| self.listing_from(container))
            .collect();

        debug!(
            containers = containers.len(),
            listings = listings.len(),
            "extracted listings from {}",
            self.base_url
        );
        listings
    }

    fn listing_from<N: DomNode>(&self, container: &N) -> Option<JobListing> {
        let inner = container.descendants();

        let title = first_by_priority(&inner, &title_predicates::<N>())
            .map(|node| node.text_content().trim().to_string())
            .unwrap_or_default();
        let location = first_with_class_fragment(&inner, &LOCATION_FRAGMENTS)
            .map(|node| node.text_content().trim().to_string())
            .unwrap_or_default();
        let link = self.link_for(container, &inner).unwrap_or_default();

        if title.is_empty() || link.is_empty() {
            return None;
        }
        Some(JobListing { title, location, link })
    }

    /// The first descendant anchor's resolved href, or the container's own
    /// when it is itself an anchor.
    fn link_for<N: DomNode>(&self, container: &N, inner: &[N]) -> Option<String> {
        inner
            .iter()
            .find(|node| node.is_tag("a"))
            .and_then(|anchor| self.resolve_href(anchor))
            .or_else(|| {
                container
                    .is_tag("a")
                    .then(|| self.resolve_href(container))
                    .flatten()
            })
    }

    fn resolve_href<N: DomNode>(&self, anchor: &N) -> Option<String> {
        let href = anchor.attr("href")?.trim();
        self.base_url.join(href).ok().map(String::from)
    }
}
