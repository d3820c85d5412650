//! Set-difference of freshly extracted listings against the corpus.
//!
//! Identity is the canonical link and nothing else. Listings within one run
//! are not deduplicated against each other: two sources yielding the same
//! canonical key in the same run both pass (accepted policy).

use std::collections::HashSet;

use crate::job::Job;
use crate::normalize::canonical_link;
use crate::sources::Listing;

/// The corpus's set of canonical keys.
pub fn corpus_keys(corpus: &[Job]) -> HashSet<String> {
    corpus.iter().map(|job| canonical_link(&job.link)).collect()
}

/// Keep only the listings whose canonical key is absent from the corpus.
pub fn filter_new(extracted: Vec<Listing>, corpus_keys: &HashSet<String>) -> Vec<Listing> {
    extracted
        .into_iter()
        .filter(|listing| !corpus_keys.contains(&canonical_link(&listing.draft.link)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobDraft;
    use chrono::Utc;

    fn listing(link: &str) -> Listing {
        Listing {
            source: "loker.id",
            draft: JobDraft {
                title: "Some job".to_string(),
                link: link.to_string(),
                company: "Acme".to_string(),
                city: None,
            },
        }
    }

    fn corpus_job(link: &str) -> Job {
        Job {
            title: "Seen before".to_string(),
            link: link.to_string(),
            company: "Acme".to_string(),
            city: None,
            source: Some("loker.id".to_string()),
            posted: "01 August 2026".to_string(),
            discovered_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_known_canonical_key_is_filtered() {
        let corpus = vec![corpus_job("https://x/a")];
        let keys = corpus_keys(&corpus);

        // Same posting reached through a tracking query string
        let fresh = filter_new(vec![listing("https://x/a?ref=1")], &keys);
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_unknown_key_passes() {
        let corpus = vec![corpus_job("https://x/a")];
        let keys = corpus_keys(&corpus);

        let fresh = filter_new(vec![listing("https://x/b")], &keys);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].draft.link, "https://x/b");
    }

    #[test]
    fn test_within_run_duplicates_both_pass() {
        let keys = corpus_keys(&[]);

        let fresh = filter_new(
            vec![listing("https://x/a"), listing("https://x/a/")],
            &keys,
        );
        assert_eq!(fresh.len(), 2);
    }

    #[test]
    fn test_corpus_keys_are_canonical() {
        let corpus = vec![corpus_job("https://x/a/"), corpus_job("https://x/b?page=2")];
        let keys = corpus_keys(&corpus);

        assert!(keys.contains("https://x/a"));
        assert!(keys.contains("https://x/b"));
    }
}
