//! Configured job boards and their extraction strategies.
//!
//! Each site module exposes one pure function,
//! `extract(html, base_url) -> Vec<JobDraft>`, that reads that board's
//! listing markup. A card whose link cannot be recovered is skipped; every
//! other per-card failure degrades to a sentinel value so one broken card
//! never discards the rest of the page.

pub mod jobstreet;
pub mod karirhub;
pub mod loker;

use scraper::{ElementRef, Selector};
use url::Url;

use crate::job::JobDraft;

/// One external site plus the strategy for reading its listings.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: &'static str,
    pub url: &'static str,
    pub extractor: Extractor,
}

/// Tagged set of per-site extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Loker,
    KarirHub,
    Jobstreet,
}

impl Extractor {
    /// Map a fetched listing document into zero or more drafts.
    pub fn extract(&self, html: &str, base_url: &Url) -> Vec<JobDraft> {
        match self {
            Extractor::Loker => loker::extract(html, base_url),
            Extractor::KarirHub => karirhub::extract(html, base_url),
            Extractor::Jobstreet => jobstreet::extract(html, base_url),
        }
    }
}

/// A draft paired with the source that produced it.
#[derive(Debug, Clone)]
pub struct Listing {
    pub source: &'static str,
    pub draft: JobDraft,
}

static REGISTRY: [Source; 3] = [
    Source {
        name: "loker.id",
        url: "https://www.loker.id/",
        extractor: Extractor::Loker,
    },
    Source {
        name: "karirhub",
        url: "https://karirhub.kemnaker.go.id/lowongan",
        extractor: Extractor::KarirHub,
    },
    Source {
        name: "jobstreet",
        url: "https://www.jobstreet.co.id/id/jobs",
        extractor: Extractor::Jobstreet,
    },
];

/// The static registry of configured sources, in notification priority order.
pub fn registry() -> &'static [Source] {
    &REGISTRY
}

/// Resolve a card's href against the page it came from.
///
/// Absolute links pass through untouched; relative ones are joined onto the
/// source's base URL. Returns `None` when the href cannot form a URL at all.
pub(crate) fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }
    base_url.join(trimmed).ok().map(|url| url.to_string())
}

/// Collect the trimmed text of the first element matching `selector_str`.
pub(crate) fn select_text(scope: &ElementRef, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    scope
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<_> = registry().iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), registry().len());
    }

    #[test]
    fn test_resolve_link_absolute_passthrough() {
        let base = Url::parse("https://www.loker.id/").unwrap();
        assert_eq!(
            resolve_link("https://elsewhere.example/job/1", &base).unwrap(),
            "https://elsewhere.example/job/1"
        );
    }

    #[test]
    fn test_resolve_link_joins_relative() {
        let base = Url::parse("https://www.loker.id/").unwrap();
        assert_eq!(
            resolve_link("/lowongan/backend-engineer", &base).unwrap(),
            "https://www.loker.id/lowongan/backend-engineer"
        );
    }

    #[test]
    fn test_resolve_link_rejects_empty() {
        let base = Url::parse("https://www.loker.id/").unwrap();
        assert_eq!(resolve_link("   ", &base), None);
    }
}
