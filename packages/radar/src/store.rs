//! Persisted corpus of previously notified jobs.
//!
//! The corpus is a single JSON file, loaded fully at run start and
//! overwritten fully at run end. Corrupt or missing state recovers to an
//! empty corpus; a run never fails because of what a previous run left
//! behind.

use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::job::Job;

pub struct RetentionStore {
    path: PathBuf,
}

impl RetentionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted corpus; missing or unparseable state yields an
    /// empty corpus.
    pub async fn load(&self) -> Vec<Job> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => {
                tracing::debug!(path = %self.path.display(), "No corpus file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corpus file unreadable, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Drop every entry older than `window`, and every entry whose
    /// `discovered_at` is missing or unparseable (unverifiable age counts
    /// as expired).
    pub fn prune(corpus: Vec<Job>, now: DateTime<Utc>, window: Duration) -> Vec<Job> {
        let cutoff = now - window;
        let before = corpus.len();

        let kept: Vec<Job> = corpus
            .into_iter()
            .filter(|job| match job.discovered_at {
                Some(discovered_at) => discovered_at >= cutoff,
                None => false,
            })
            .collect();

        if kept.len() < before {
            tracing::info!(
                pruned = before - kept.len(),
                kept = kept.len(),
                "Pruned expired corpus entries"
            );
        }
        kept
    }

    /// Serialize the full corpus and replace the previous state.
    ///
    /// Writes to a sibling temp file and renames it over the target so a
    /// partial write is never observable on success.
    pub async fn persist(&self, corpus: &[Job]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(corpus)?;

        let tmp = self.path.with_extension("tmp");
        let write_err = |source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };

        tokio::fs::write(&tmp, json).await.map_err(write_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(write_err)?;

        tracing::debug!(
            path = %self.path.display(),
            entries = corpus.len(),
            "Persisted corpus"
        );
        Ok(())
    }
}
