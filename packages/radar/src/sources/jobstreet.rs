//! JobStreet Indonesia listing extraction.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::job::{JobDraft, NO_TITLE, UNKNOWN};

use super::{resolve_link, select_text};

pub fn extract(html: &str, base_url: &Url) -> Vec<JobDraft> {
    let document = Html::parse_document(html);
    let cards = match Selector::parse("article[data-job-id]") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let mut drafts = Vec::new();
    for card in document.select(&cards) {
        match parse_card(&card, base_url) {
            Some(draft) => drafts.push(draft),
            None => tracing::debug!(source = "jobstreet", "Skipping card without a usable link"),
        }
    }
    drafts
}

fn parse_card(card: &ElementRef, base_url: &Url) -> Option<JobDraft> {
    let anchor_selector = Selector::parse("a[data-automation='jobTitle']").ok()?;
    let anchor = card.select(&anchor_selector).next()?;
    let link = resolve_link(anchor.value().attr("href")?, base_url)?;

    let title = {
        let text = anchor.text().collect::<String>().trim().to_string();
        if text.is_empty() {
            NO_TITLE.to_string()
        } else {
            text
        }
    };

    let company = select_text(card, "[data-automation='jobCompany']")
        .unwrap_or_else(|| UNKNOWN.to_string());
    let city = select_text(card, "[data-automation='jobLocation']");

    Some(JobDraft {
        title,
        link,
        company,
        city,
    })
}
