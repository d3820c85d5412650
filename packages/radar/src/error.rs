use reqwest::StatusCode;

/// Failure of a single HTTP retrieval.
///
/// Each fetch is independent: a `FetchError` is handled where the call was
/// made (one source, one detail page) and never aborts the rest of the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("timed out fetching {url}")]
    Timeout { url: String },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },
}

/// Failure reading or writing the persisted corpus.
///
/// Only `persist` surfaces this; a corrupt corpus on `load` recovers to an
/// empty one instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write corpus to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize corpus: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure delivering one notification message.
///
/// The pipeline only cares that the send failed; the transport detail is
/// carried as text so sinks stay opaque to the core.
#[derive(Debug, thiserror::Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

impl From<telegram::TelegramError> for DeliveryError {
    fn from(err: telegram::TelegramError) -> Self {
        Self(err.to_string())
    }
}
