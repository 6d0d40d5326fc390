//! The small slice of a DOM the listing heuristics need.
//!
//! Anything that can answer these questions can be fed to the extractor; the
//! production implementation is `scraper::ElementRef`.

use scraper::ElementRef;

/// An element in a parsed document tree.
pub trait DomNode: Sized + Clone {
    /// Lowercase tag name, e.g. `li`.
    fn tag_name(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Parent element, if any.
    fn parent_element(&self) -> Option<Self>;

    /// All descendant elements in document order, not including `self`.
    fn descendants(&self) -> Vec<Self>;

    /// Concatenated text of every text node below this element.
    fn text_content(&self) -> String;

    fn is_tag(&self, tag: &str) -> bool {
        self.tag_name() == tag
    }

    /// Whole-token class match, like the CSS selector `.token`.
    fn has_class_token(&self, token: &str) -> bool {
        self.attr("class")
            .is_some_and(|class| class.split_whitespace().any(|t| t == token))
    }

    /// Substring class match, like the CSS selector `[class*="fragment"]`.
    fn class_contains(&self, fragment: &str) -> bool {
        self.attr("class").is_some_and(|class| class.contains(fragment))
    }
}

impl<'a> DomNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn parent_element(&self) -> Option<Self> {
        (**self).parent().and_then(ElementRef::wrap)
    }

    fn descendants(&self) -> Vec<Self> {
        (**self)
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}
