//! Picks the product link for a card out of an ambiguous search listing.
//!
//! Candidate patterns are tried most specific first; the first pattern with
//! any matching link wins, and within a pattern the first link in document
//! order is taken.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::models::CardQuery;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Invalid anchor selector"));

/// Substrings to look for in a link's last path segment, highest priority first.
pub fn search_patterns(query: &CardQuery) -> Vec<String> {
    let name = query.slug();
    let id = &query.id;
    let mut patterns = Vec::new();

    if query.holo {
        patterns.push(format!("{name}-holo-{id}"));
        patterns.push(format!("{name}-foil"));
    }
    if query.first_edition {
        patterns.push(format!("{name}-1st-edition-{id}"));
    }
    if query.reverse_holo {
        patterns.push(format!("{name}-reverse-holo-{id}"));
    }

    patterns.push(format!("{name}-{id}"));
    patterns.push(name);
    patterns
}

/// Every non-empty `href` in document order.
pub fn candidate_links(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

fn last_segment(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}

pub fn match_link<'a>(query: &CardQuery, hrefs: &'a [String]) -> Option<&'a str> {
    for pattern in search_patterns(query) {
        if let Some(href) = hrefs
            .iter()
            .find(|href| last_segment(href).contains(pattern.as_str()))
        {
            debug!("Matched {} with pattern {:?}", href, pattern);
            return Some(href.as_str());
        }
    }

    info!("No matching link found for {}", query);
    None
}

/// Link matcher over a parsed results page.
pub fn find_product_link(query: &CardQuery, document: &Html) -> Option<String> {
    let hrefs = candidate_links(document);
    match_link(query, &hrefs).map(str::to_string)
}
