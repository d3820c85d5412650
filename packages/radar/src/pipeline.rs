//! The per-run aggregation pipeline.
//!
//! One invocation runs the phases in order: prune the persisted corpus,
//! fetch and extract every configured source, dedup against the corpus's
//! canonical keys, apply the optional keyword filter, dispatch up to the
//! batch cap, and persist the survivors. Phases never run in parallel and
//! never repeat; a run owns the corpus file for its whole duration.
//!
//! Failures are handled at the smallest unit that can fail: one source's
//! fetch, one card's markup, one detail page, one message. None of them
//! aborts the run.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use url::Url;

use crate::config::Config;
use crate::dedup;
use crate::fetcher::Fetch;
use crate::filter;
use crate::job::Job;
use crate::notifier::{self, Sink};
use crate::posted::{self, POSTED_FORMAT};
use crate::sources::{self, Listing, Source};
use crate::store::RetentionStore;

/// What a single run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub extracted: usize,
    pub new: usize,
    pub dispatched: usize,
}

/// Run the pipeline once over the static source registry.
pub async fn run(
    config: &Config,
    fetcher: &impl Fetch,
    sink: &impl Sink,
    store: &RetentionStore,
) -> Result<RunReport> {
    run_with_sources(config, fetcher, sink, store, sources::registry()).await
}

/// Run the pipeline once over an explicit source list.
pub async fn run_with_sources(
    config: &Config,
    fetcher: &impl Fetch,
    sink: &impl Sink,
    store: &RetentionStore,
    source_list: &[Source],
) -> Result<RunReport> {
    let now = Utc::now();

    // Effective corpus: persisted state minus everything past the
    // retention window.
    let corpus = store.load().await;
    let corpus = RetentionStore::prune(corpus, now, Duration::days(config.retention_days));

    // Fetch and extract every source; one source failing never blocks the
    // rest, and the aggregate keeps registry order.
    let mut extracted: Vec<Listing> = Vec::new();
    for source in source_list {
        match fetch_source(fetcher, source).await {
            Ok(mut listings) => {
                tracing::info!(
                    source = source.name,
                    count = listings.len(),
                    "Extracted listings"
                );
                extracted.append(&mut listings);
            }
            Err(e) => {
                tracing::warn!(source = source.name, error = %e, "Source failed, skipping");
            }
        }
    }
    let extracted_count = extracted.len();

    // Dedup against the pruned corpus's canonical keys, then apply the
    // optional keyword filter.
    let keys = dedup::corpus_keys(&corpus);
    let fresh = dedup::filter_new(extracted, &keys);
    let fresh = filter::apply(fresh, &config.keywords);
    let fresh_count = fresh.len();

    if fresh.is_empty() {
        tracing::info!(extracted = extracted_count, "No new jobs this run");
        return Ok(RunReport {
            extracted: extracted_count,
            ..Default::default()
        });
    }

    // Enrich the survivors: one bounded detail fetch each for the posting
    // date, and the discovery timestamp that retention works from.
    let mut new_jobs = Vec::with_capacity(fresh.len());
    for listing in fresh {
        let posted = fetch_posted_date(fetcher, &listing.draft.link, now).await;
        new_jobs.push(Job::from_draft(listing.draft, listing.source, posted, now));
    }

    // Dispatch up to the cap, then persist exactly the dispatched subset
    // appended to the pruned corpus.
    let dispatched = notifier::notify(sink, new_jobs, config.notify_cap).await;
    let dispatched_count = dispatched.len();

    if dispatched.is_empty() {
        return Ok(RunReport {
            extracted: extracted_count,
            new: fresh_count,
            dispatched: 0,
        });
    }

    let mut next_corpus = corpus;
    next_corpus.extend(dispatched);
    store
        .persist(&next_corpus)
        .await
        .context("Failed to persist corpus")?;

    Ok(RunReport {
        extracted: extracted_count,
        new: fresh_count,
        dispatched: dispatched_count,
    })
}

/// Fetch one source's listing page and extract its drafts.
async fn fetch_source(fetcher: &impl Fetch, source: &Source) -> Result<Vec<Listing>> {
    let html = fetcher.fetch(source.url).await?;
    let base_url = Url::parse(source.url).context("Invalid source URL")?;

    Ok(source
        .extractor
        .extract(&html, &base_url)
        .into_iter()
        .map(|draft| Listing {
            source: source.name,
            draft,
        })
        .collect())
}

/// Best-effort posting date: one extra fetch for the detail page, current
/// date when the fetch or the scan comes up empty.
async fn fetch_posted_date(fetcher: &impl Fetch, link: &str, now: DateTime<Utc>) -> String {
    let today = now.date_naive();
    match fetcher.fetch(link).await {
        Ok(html) => posted::posted_from_html(&html, today),
        Err(e) => {
            tracing::debug!(url = %link, error = %e, "Detail fetch failed, using current date");
            today.format(POSTED_FORMAT).to_string()
        }
    }
}
