//! Best-effort posting-date extraction from detail pages.
//!
//! Job boards render the date inline next to a locale-specific marker
//! ("Posted", "Diposting", "diunggah") as `day month year`. English month
//! names are tried first, Indonesian second. When nothing matches the
//! current date is used.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;

/// Rendering format for the `posted` field, e.g. `03 August 2026`.
pub const POSTED_FORMAT: &str = "%d %B %Y";

lazy_static! {
    // "Posted: 3 August 2026" / "Diposting 3 Agustus 2026" / "diunggah 3 Agustus 2026"
    static ref POSTED_REGEX: Regex = Regex::new(
        r"(?i)(?:posted|diposting|diunggah)\s*:?\s*(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})"
    )
    .unwrap();
}

const ENGLISH_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const INDONESIAN_MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "maret",
    "april",
    "mei",
    "juni",
    "juli",
    "agustus",
    "september",
    "oktober",
    "november",
    "desember",
];

/// Scan free text for a posting date; fall back to `today`.
pub fn extract_posted_date(text: &str, today: NaiveDate) -> String {
    for caps in POSTED_REGEX.captures_iter(text) {
        let day: u32 = match caps[1].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        let year: i32 = match caps[3].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        let Some(month) = month_number(&caps[2]) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return date.format(POSTED_FORMAT).to_string();
        }
    }

    today.format(POSTED_FORMAT).to_string()
}

/// Scan a detail page's visible text for a posting date.
pub fn posted_from_html(html: &str, today: NaiveDate) -> String {
    let document = Html::parse_document(html);
    let text = document.root_element().text().collect::<String>();
    extract_posted_date(&text, today)
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    ENGLISH_MONTHS
        .iter()
        .position(|m| *m == lower)
        .or_else(|| INDONESIAN_MONTHS.iter().position(|m| *m == lower))
        .map(|index| index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    #[test]
    fn test_english_marker() {
        assert_eq!(
            extract_posted_date("Posted 3 August 2026 by Acme", today()),
            "03 August 2026"
        );
    }

    #[test]
    fn test_indonesian_marker_and_month() {
        assert_eq!(
            extract_posted_date("Diposting: 3 Agustus 2026", today()),
            "03 August 2026"
        );
        assert_eq!(
            extract_posted_date("Lowongan diunggah 14 Mei 2026", today()),
            "14 May 2026"
        );
    }

    #[test]
    fn test_unknown_month_falls_through_to_later_match() {
        let text = "Posted 3 Floreal 2026 ... Diposting 4 Juni 2026";
        assert_eq!(extract_posted_date(text, today()), "04 June 2026");
    }

    #[test]
    fn test_no_match_falls_back_to_today() {
        assert_eq!(
            extract_posted_date("no date markers here", today()),
            "08 August 2026"
        );
    }

    #[test]
    fn test_invalid_day_falls_back() {
        assert_eq!(
            extract_posted_date("Posted 31 February 2026", today()),
            "08 August 2026"
        );
    }

    #[test]
    fn test_posted_from_html() {
        let html = r#"<html><body>
            <div class="meta">Diposting: 1 Oktober 2026</div>
            <p>Deskripsi pekerjaan</p>
        </body></html>"#;
        assert_eq!(posted_from_html(html, today()), "01 October 2026");
    }
}
