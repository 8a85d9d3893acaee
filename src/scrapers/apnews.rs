//! AP News search scraper.
//!
//! Drives the [AP News](https://apnews.com/) search overlay through a
//! [`Browser`] and reads the first page of results.
//!
//! # Page Structure
//!
//! Each result is a `PagePromo` card. The headline text sits in a span under
//! `h3.PagePromo-title`, the date in a `Timestamp` span and the teaser in a
//! span under `div.PagePromo-description`. The three are read as separate
//! lists and paired by position afterwards.

use crate::browser::{Browser, Locator};
use crate::error::ExtractError;
use crate::models::ScrapedPage;
use crate::utils::truncate_for_log;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const SEARCH_BUTTON: &str = "//button[contains(@class, 'SearchOverlay-search-button')]";
pub const SEARCH_INPUT: &str = "//input[contains(@class, 'SearchOverlay-search-input')]";
pub const RESULTS_MARKER: &str = "//*[contains(@class, 'PagePromo-title')]";
pub const HEADLINES: &str = "//h3[contains(@class, 'PagePromo-title')]//span";
pub const DATES: &str = "//span[contains(@class, 'Timestamp')]";
pub const DESCRIPTIONS: &str = "//div[contains(@class, 'PagePromo-description')]//span";

/// Open `site_url` and search for `phrase`.
///
/// Every wait is bounded by `timeout`; there are no retries.
///
/// # Errors
///
/// - [`ExtractError::SearchTimeout`] if the search controls or the results
///   never appear
/// - [`ExtractError::Browser`] for navigation or interaction failures
#[instrument(level = "info", skip(browser, timeout))]
pub fn search<B: Browser>(
    browser: &mut B,
    site_url: &str,
    phrase: &str,
    timeout: Duration,
) -> Result<(), ExtractError> {
    browser.open(site_url)?;
    submit_search(browser, phrase, timeout).map_err(|e| match e {
        ExtractError::Browser(inner) if inner.is_timeout() => ExtractError::SearchTimeout(inner),
        other => other,
    })?;
    info!("Search results loaded");
    Ok(())
}

fn submit_search<B: Browser>(
    browser: &mut B,
    phrase: &str,
    timeout: Duration,
) -> Result<(), ExtractError> {
    let button = browser.wait_for(&Locator::xpath(SEARCH_BUTTON), timeout)?;
    browser.click(&button)?;

    let input = browser.wait_for(&Locator::xpath(SEARCH_INPUT), timeout)?;
    browser.type_text(&input, phrase)?;
    browser.press_enter()?;
    debug!(%phrase, "Submitted search");

    browser.wait_for(&Locator::xpath(RESULTS_MARKER), timeout)?;
    Ok(())
}

/// Narrow the current results to `category` by clicking its link.
///
/// # Errors
///
/// - [`ExtractError::CategoryTimeout`] if the link or the narrowed results
///   never appear
/// - [`ExtractError::Browser`] for interaction failures
#[instrument(level = "info", skip(browser, timeout))]
pub fn select_category<B: Browser>(
    browser: &mut B,
    category: &str,
    timeout: Duration,
) -> Result<(), ExtractError> {
    click_category(browser, category, timeout).map_err(|e| match e {
        ExtractError::Browser(inner) if inner.is_timeout() => ExtractError::CategoryTimeout {
            category: category.to_string(),
            source: inner,
        },
        other => other,
    })?;
    info!(%category, "Category results loaded");
    Ok(())
}

fn click_category<B: Browser>(
    browser: &mut B,
    category: &str,
    timeout: Duration,
) -> Result<(), ExtractError> {
    let link = browser.wait_for(&Locator::link_text(category), timeout)?;
    browser.click(&link)?;
    browser.wait_for(&Locator::xpath(RESULTS_MARKER), timeout)?;
    Ok(())
}

/// Read headline, date and description text from the current results page.
///
/// # Errors
///
/// [`ExtractError::ResultsTimeout`] if any of the three lists never appears.
#[instrument(level = "info", skip_all)]
pub fn collect<B: Browser>(
    browser: &mut B,
    timeout: Duration,
) -> Result<ScrapedPage, ExtractError> {
    let page = ScrapedPage {
        headlines: read_texts(browser, HEADLINES, timeout)?,
        dates: read_texts(browser, DATES, timeout)?,
        descriptions: read_texts(browser, DESCRIPTIONS, timeout)?,
    };
    info!(
        headlines = page.headlines.len(),
        dates = page.dates.len(),
        descriptions = page.descriptions.len(),
        "Collected result listings"
    );
    Ok(page)
}

fn read_texts<B: Browser>(
    browser: &mut B,
    xpath: &str,
    timeout: Duration,
) -> Result<Vec<String>, ExtractError> {
    let elements = browser
        .wait_for_all(&Locator::xpath(xpath), timeout)
        .map_err(|e| {
            if e.is_timeout() {
                ExtractError::ResultsTimeout(e)
            } else {
                ExtractError::Browser(e)
            }
        })?;

    let mut texts = browser.text_all(&elements)?;
    for text in &mut texts {
        *text = text.trim().to_string();
        debug!(%xpath, text = %truncate_for_log(text, 80), "Read element text");
    }
    Ok(texts)
}
