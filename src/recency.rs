//! Month-lookback filtering on the displayed publication labels.
//!
//! Result pages show dates as free text: relative ("5 mins ago",
//! "Yesterday") for recent stories, absolute ("March 5, 2024") for older
//! ones. Labels are parsed best-effort into a calendar date; records whose
//! label cannot be read are kept rather than silently dropped.

use crate::models::ArticleRecord;
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument};

static RELATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(\d+|an?|one)\s+(secs?|seconds?|mins?|minutes?|hrs?|hours?|days?|weeks?)\s+ago$",
    )
    .expect("valid relative-date regex")
});

/// Parse a displayed publication label into a date, relative to `now`.
///
/// Returns `None` when the label is not in a recognized form.
pub fn parse_published_label(label: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let label = label.trim().trim_end_matches('.');
    let today = now.date();

    match label.to_lowercase().as_str() {
        "" => return None,
        "just now" | "now" | "today" => return Some(today),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    if let Some(caps) = RELATIVE_RE.captures(label) {
        let amount: i64 = match caps[1].to_lowercase().as_str() {
            "a" | "an" | "one" => 1,
            n => n.parse().ok()?,
        };
        let unit = caps[2].to_lowercase();
        let delta = match unit.trim_end_matches('s') {
            "sec" | "second" => Duration::try_seconds(amount)?,
            "min" | "minute" => Duration::try_minutes(amount)?,
            "hr" | "hour" => Duration::try_hours(amount)?,
            "day" => Duration::try_days(amount)?,
            "week" => Duration::try_weeks(amount)?,
            _ => return None,
        };
        return now.checked_sub_signed(delta).map(|t| t.date());
    }

    // "Sep." style abbreviations carry a trailing period on the month.
    let cleaned = label.replace('.', "");
    for fmt in ["%B %d, %Y", "%B %d %Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(date);
        }
    }

    // Month and day only: the most recent such date not in the future. Feb 29
    // can sit up to eight years back.
    (0..=8)
        .map(|back| format!("{cleaned}, {}", today.year() - back))
        .filter_map(|s| NaiveDate::parse_from_str(&s, "%B %d, %Y").ok())
        .find(|date| *date <= today)
}

/// First day of the month `months` months before the month of `today`.
///
/// `0` is the start of the current month.
pub fn cutoff(today: NaiveDate, months: u32) -> Option<NaiveDate> {
    today.with_day(1)?.checked_sub_months(Months::new(months))
}

/// Keep records published within the lookback window.
///
/// `None` disables filtering. Unparseable labels are kept.
#[instrument(level = "info", skip(records), fields(count = records.len()))]
pub fn filter_by_months(
    records: Vec<ArticleRecord>,
    months: Option<u32>,
    now: NaiveDateTime,
) -> Vec<ArticleRecord> {
    let Some(months) = months else {
        return records;
    };
    let Some(since) = cutoff(now.date(), months) else {
        return records;
    };

    let before = records.len();
    let kept: Vec<ArticleRecord> = records
        .into_iter()
        .filter(|rec| match parse_published_label(&rec.published_label, now) {
            Some(date) => date >= since,
            None => {
                debug!(
                    label = %rec.published_label,
                    "Unrecognized date label; keeping article"
                );
                true
            }
        })
        .collect();

    info!(%since, before, after = kept.len(), "Applied month lookback");
    kept
}
