//! Batch-capped notification dispatch.
//!
//! The sink is opaque to the pipeline: it either delivers a rendered text
//! message or it doesn't. A failed send is logged and the batch continues;
//! partial delivery is acceptable under transient errors.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::job::{Job, UNKNOWN};

/// Trait for notification delivery (to allow mocking).
#[async_trait]
pub trait Sink: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Telegram chat delivery.
pub struct TelegramSink {
    service: telegram::TelegramService,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            service: telegram::TelegramService::new(telegram::TelegramOptions { bot_token }),
            chat_id,
        }
    }
}

#[async_trait]
impl Sink for TelegramSink {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        self.service
            .send_message(&self.chat_id, text, Some("Markdown"))
            .await
            .map(|_| ())
            .map_err(DeliveryError::from)
    }
}

/// Dispatch new jobs through the sink, at most `cap` per run.
///
/// Jobs keep their extraction order; anything beyond the cap is silently
/// dropped from this run. Returns the capped subset (the jobs that had a
/// delivery attempted), which is what the caller persists.
pub async fn notify(sink: &impl Sink, jobs: Vec<Job>, cap: usize) -> Vec<Job> {
    let total = jobs.len();
    let mut batch = jobs;
    if batch.len() > cap {
        tracing::warn!(
            total,
            cap,
            dropped = total - cap,
            "More new jobs than the batch cap, truncating"
        );
        batch.truncate(cap);
    }

    for job in &batch {
        let message = render_message(job);
        if let Err(e) = sink.send(&message).await {
            tracing::error!(link = %job.link, error = %e, "Failed to deliver notification");
        }
    }

    batch
}

/// Render one job as a Telegram Markdown message.
pub fn render_message(job: &Job) -> String {
    let source = job.source.as_deref().unwrap_or(UNKNOWN);
    let city = job.city.as_deref().unwrap_or(UNKNOWN);

    format!(
        "\u{1F4E1} [VacancyRadar] {source}\n\
         \u{1F4BC} Posisi: *{title}*\n\
         \u{1F3E2} Perusahaan: _{company}_\n\
         \u{1F4CD} {city}\n\
         \u{1F5D3} Diposting: {posted}\n\
         \u{1F517} {link}",
        source = escape_markdown(source),
        title = escape_markdown(&job.title),
        company = escape_markdown(&job.company),
        city = escape_markdown(city),
        posted = escape_markdown(&job.posted),
        link = job.link,
    )
}

/// Escape the characters Telegram's Markdown mode treats as markup, so a
/// title like `C* developer [remote]` cannot corrupt the message.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    struct MockSink {
        sent: Mutex<Vec<String>>,
        fail_on: Option<usize>,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(index: usize) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_on: Some(index),
            }
        }
    }

    #[async_trait]
    impl Sink for MockSink {
        async fn send(&self, text: &str) -> Result<(), DeliveryError> {
            let mut sent = self.sent.lock().unwrap();
            if self.fail_on == Some(sent.len()) {
                sent.push(format!("FAILED: {text}"));
                return Err(DeliveryError("chat unavailable".to_string()));
            }
            sent.push(text.to_string());
            Ok(())
        }
    }

    fn job(n: usize) -> Job {
        Job {
            title: format!("Job {n}"),
            link: format!("https://x/{n}"),
            company: "Acme".to_string(),
            city: None,
            source: Some("loker.id".to_string()),
            posted: "01 August 2026".to_string(),
            discovered_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_cap_truncates_preserving_order() {
        let sink = MockSink::new();
        let jobs: Vec<Job> = (0..20).map(job).collect();

        let dispatched = notify(&sink, jobs, 9).await;

        assert_eq!(dispatched.len(), 9);
        let links: Vec<_> = dispatched.iter().map(|j| j.link.as_str()).collect();
        let expected: Vec<String> = (0..9).map(|n| format!("https://x/{n}")).collect();
        assert_eq!(links, expected.iter().map(String::as_str).collect::<Vec<_>>());

        assert_eq!(sink.sent.lock().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_under_cap_sends_everything() {
        let sink = MockSink::new();
        let dispatched = notify(&sink, vec![job(0), job(1)], 9).await;

        assert_eq!(dispatched.len(), 2);
        assert_eq!(sink.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_send_failure_does_not_abort_batch() {
        let sink = MockSink::failing_on(1);
        let dispatched = notify(&sink, vec![job(0), job(1), job(2)], 9).await;

        // All three stay in the dispatched batch; delivery of the middle one
        // failed but the remaining sends still went out.
        assert_eq!(dispatched.len(), 3);
        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 3);
        assert!(sent[1].starts_with("FAILED:"));
        assert!(sent[2].contains("Job 2"));
    }

    #[test]
    fn test_render_message_escapes_markup() {
        let mut j = job(0);
        j.title = "C* developer [remote]".to_string();
        j.company = "some_company".to_string();

        let message = render_message(&j);
        assert!(message.contains(r"C\* developer \[remote\]"));
        assert!(message.contains(r"some\_company"));
        // Link stays raw so it remains clickable
        assert!(message.contains("https://x/0"));
    }

    #[test]
    fn test_render_message_uses_sentinels() {
        let mut j = job(0);
        j.city = None;
        j.source = None;

        let message = render_message(&j);
        assert!(message.contains("\u{1F4CD} Unknown"));
        assert!(message.contains("[VacancyRadar] Unknown"));
    }
}
