//! The extraction run: search, collect, score, filter, write.
//!
//! ```text
//! Idle -> Searching -> (CategoryFiltering)? -> Extracting -> Writing -> Done
//!            |                 |                  |
//!            +-----------------+------------------+--> TimedOut -> Idle
//! ```
//!
//! A timeout in any browser stage ends the run: one `ERROR` event is logged,
//! the browser is closed and no file is produced. Other failures propagate
//! to the caller.

use crate::browser::Browser;
use crate::error::ExtractError;
use crate::models::{ArticleRecord, SearchRequest};
use crate::outputs::xlsx;
use crate::recency;
use crate::scrapers::apnews;
use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

pub const DEFAULT_SITE_URL: &str = "https://apnews.com/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Run-level settings that do not come from the search request.
#[derive(Debug, Clone)]
pub struct Settings {
    pub site_url: String,
    /// Upper bound for every DOM wait in the run.
    pub timeout: Duration,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Searching,
    CategoryFiltering,
    Extracting,
    Writing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Searching => "searching",
            Stage::CategoryFiltering => "category_filtering",
            Stage::Extracting => "extracting",
            Stage::Writing => "writing",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// Search, score and save. Returns the workbook path, or `None` if the run
/// timed out.
///
/// `clock` supplies local wall-clock time for the recency filter and the
/// output filename.
///
/// # Errors
///
/// Anything other than a timeout: misaligned result lists, browser
/// interaction failures, spreadsheet write failures.
#[instrument(
    level = "info",
    skip_all,
    fields(phrase = %request.phrase, category = %request.category)
)]
pub fn extract_news<B, C>(
    browser: &mut B,
    request: &SearchRequest,
    settings: &Settings,
    clock: C,
) -> Result<Option<PathBuf>, ExtractError>
where
    B: Browser,
    C: Fn() -> NaiveDateTime,
{
    match run(browser, request, settings, &clock) {
        Ok(path) => {
            info!(
                path = %path.display(),
                "News data has been extracted and saved to: {}",
                path.display()
            );
            Ok(Some(path))
        }
        Err(e) if e.is_timeout() => {
            match &e {
                ExtractError::SearchTimeout(source) => {
                    error!(cause = %source, "Timeout error: Failed to load search results.")
                }
                ExtractError::CategoryTimeout { category, source } => {
                    error!(
                        cause = %source,
                        "Timeout error: Failed to load news category: {category}."
                    )
                }
                _ => error!(cause = %e, "Timeout error: Failed to load article listings."),
            }
            browser.close();
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn run<B, C>(
    browser: &mut B,
    request: &SearchRequest,
    settings: &Settings,
    clock: &C,
) -> Result<PathBuf, ExtractError>
where
    B: Browser,
    C: Fn() -> NaiveDateTime,
{
    let timeout = settings.timeout;

    debug!(stage = %Stage::Searching, "Entering stage");
    apnews::search(browser, &settings.site_url, &request.phrase, timeout)?;

    if let Some(category) = request.category() {
        debug!(stage = %Stage::CategoryFiltering, %category, "Entering stage");
        apnews::select_category(browser, category, timeout)?;
    }

    debug!(stage = %Stage::Extracting, "Entering stage");
    let page = apnews::collect(browser, timeout)?;
    let records: Vec<ArticleRecord> = page
        .into_triples()?
        .into_iter()
        .map(|(title, date, description)| {
            ArticleRecord::score(&request.phrase, title, date, description)
        })
        .collect();
    let records = recency::filter_by_months(records, request.months, clock());

    debug!(stage = %Stage::Writing, rows = records.len(), "Entering stage");
    let path = xlsx::write_records(&records, &settings.output_dir, clock())?;

    debug!(stage = %Stage::Done, "Run complete");
    Ok(path)
}
