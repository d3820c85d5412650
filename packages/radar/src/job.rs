use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Title used when a listing's markup yields no readable title.
pub const NO_TITLE: &str = "No title";

/// Company/city used when the field is missing or unparseable.
pub const UNKNOWN: &str = "Unknown";

/// What an extractor produces from one listing card.
///
/// `link` is always absolute by the time extraction returns; a card whose
/// link cannot be recovered is skipped entirely, while the other fields
/// degrade to sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub link: String,
    pub company: String,
    pub city: Option<String>,
}

/// One discovered posting, as notified and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub link: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub posted: String,
    /// Set when the job first passes the dedup filter. Entries read back
    /// with a missing or unparseable timestamp deserialize to `None` and
    /// are dropped at prune time instead of poisoning the whole corpus.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub discovered_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn from_draft(
        draft: JobDraft,
        source: &str,
        posted: String,
        discovered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: draft.title,
            link: draft.link,
            company: draft.company,
            city: draft.city,
            source: Some(source.to_string()),
            posted,
            discovered_at: Some(discovered_at),
        }
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|value| value.as_str())
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|parsed| parsed.with_timezone(&Utc)))
}
