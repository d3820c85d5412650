//! Optional keyword filter over new listings.
//!
//! Keywords match case-insensitively against title and company. An empty
//! keyword list passes everything through unchanged.

use crate::sources::Listing;

pub fn apply(listings: Vec<Listing>, keywords: &[String]) -> Vec<Listing> {
    if keywords.is_empty() {
        return listings;
    }

    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    listings
        .into_iter()
        .filter(|listing| {
            let haystack =
                format!("{} {}", listing.draft.title, listing.draft.company).to_lowercase();
            lowered.iter().any(|keyword| haystack.contains(keyword))
        })
        .collect()
}
