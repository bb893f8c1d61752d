//! Fragment-oriented extraction over page snapshots.
//!
//! All parsing happens on an HTML snapshot of the live page: the page
//! serializes its DOM to a string once, and extraction runs synchronously
//! on the parsed document (`Html` is not `Send`, so parsed documents never
//! live across an await). Every selector sits behind a named [`Fragment`],
//! declared with the [`fragment!`](crate::fragment) macro, so markup drift
//! surfaces as a failure naming exactly one extraction point.

use std::fmt;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::macros::regex;
use crate::{Error, Result};

/// A named DOM fragment: a selector plus the description reported when a
/// required fragment is missing.
pub struct Fragment {
    name: &'static str,
    source: &'static str,
    selector: Lazy<Selector>,
}

impl Fragment {
    #[doc(hidden)]
    pub const fn new(
        name: &'static str,
        source: &'static str,
        selector: Lazy<Selector>,
    ) -> Self {
        Self {
            name,
            source,
            selector,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw selector source, for driving the live page (waits, clicks,
    /// typing).
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish()
    }
}

/// Scoped fragment lookup, implemented by page objects and row elements.
pub trait Scrape {
    fn elem(&self) -> ElementRef;

    fn find_first(&self, fragment: &Fragment) -> Option<ElementRef> {
        self.elem().select(fragment.selector()).next()
    }

    /// Required-fragment discipline: absence is markup drift.
    fn require(&self, fragment: &Fragment) -> Result<ElementRef> {
        self.find_first(fragment).ok_or(Error::ElementNotFound {
            element: fragment.name(),
        })
    }

    /// Optional-fragment discipline: absence is a legitimate empty result.
    fn optional_html(&self, fragment: &Fragment) -> Option<String> {
        self.find_first(fragment).map(|elem| elem.inner_html())
    }

    fn require_html(&self, fragment: &Fragment) -> Result<String> {
        self.require(fragment).map(|elem| elem.inner_html())
    }
}

pub trait ElementRefExt {
    /// Concatenated text of the whole subtree.
    fn inner_text(&self) -> String;

    /// Concatenated text of direct child text nodes only, skipping child
    /// elements.
    fn direct_text(&self) -> String;

    /// Trimmed, non-empty direct text nodes in document order.
    fn text_runs(&self) -> Vec<String>;
}

impl ElementRefExt for ElementRef<'_> {
    fn inner_text(&self) -> String {
        self.text().fold("".to_owned(), |mut ret, s| {
            ret.push_str(s);
            ret
        })
    }

    fn direct_text(&self) -> String {
        self.children()
            .filter_map(|node| node.value().as_text().map(|text| text.to_string()))
            .collect()
    }

    fn text_runs(&self) -> Vec<String> {
        self.children()
            .filter_map(|node| node.value().as_text())
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

/// Parses the leading integer of strings like "2000 ms" or "65536 KB".
pub fn parse_leading_u32(s: &str, what: &'static str) -> Result<u32> {
    let trimmed = s.trim();
    regex!(r"^\d+")
        .find(trimmed)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| Error::ScrapeFailed {
            what,
            detail: format!("could not parse a number from {:?}", trimmed),
        })
}

/// Parses the problems table's "x1234" solved-count convention. The "x" is
/// display decoration, not data.
pub fn parse_solved_count(s: &str) -> Result<u32> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('x').unwrap_or(trimmed);
    digits.trim().parse().map_err(|_| Error::ScrapeFailed {
        what: "solved count",
        detail: format!("could not parse a count from {:?}", trimmed),
    })
}
