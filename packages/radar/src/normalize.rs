//! Canonical dedup keys for job links.
//!
//! Two jobs are the same posting iff their canonical links are equal; no
//! other field participates in identity.

/// Canonicalize a link: drop the query component, then trailing slashes.
///
/// Idempotent: `canonical_link(&canonical_link(x)) == canonical_link(x)`.
pub fn canonical_link(link: &str) -> String {
    let without_query = link.split('?').next().unwrap_or(link);
    without_query.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_query() {
        assert_eq!(
            canonical_link("https://x/a?ref=1&utm_source=feed"),
            "https://x/a"
        );
    }

    #[test]
    fn test_strips_trailing_slash() {
        assert_eq!(canonical_link("https://x/a/"), "https://x/a");
    }

    #[test]
    fn test_strips_both() {
        assert_eq!(canonical_link("https://x/a/?page=2"), "https://x/a");
    }

    #[test]
    fn test_plain_link_unchanged() {
        assert_eq!(canonical_link("https://x/a"), "https://x/a");
    }

    #[test]
    fn test_idempotent() {
        let links = [
            "https://x/a",
            "https://x/a/",
            "https://x/a?ref=1",
            "https://x/a/?ref=1&b=2",
            "https://x/a//",
            "relative/path/",
        ];
        for link in links {
            let once = canonical_link(link);
            assert_eq!(canonical_link(&once), once, "not idempotent for {link}");
        }
    }
}
