//! Browser automation capability.
//!
//! The extraction pipeline never talks to Chrome directly. It drives a
//! [`Browser`], which exposes only the handful of operations the pipeline
//! needs: open a page, wait for elements, click, type, read text and close.
//! The production implementation lives in [`chrome`]; tests substitute an
//! in-memory fake.
//!
//! # Waiting
//!
//! Every wait is bounded. A wait that does not see a match within its
//! timeout fails with [`BrowserError::Timeout`]. There is no cancellation
//! other than the timeout itself.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub mod chrome;

pub use chrome::ChromeBrowser;

/// How an element is located on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// An XPath expression evaluated against the document.
    XPath(String),
    /// An `<a>` element whose visible text equals the given string.
    LinkText(String),
}

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        Locator::LinkText(text.into())
    }

    /// Render this locator as an XPath expression.
    ///
    /// Link text is matched against the whitespace-normalized text of the
    /// anchor. Quotes in the text are handled with `concat()` so arbitrary
    /// category names survive.
    pub fn to_xpath(&self) -> String {
        match self {
            Locator::XPath(expr) => expr.clone(),
            Locator::LinkText(text) => {
                format!("//a[normalize-space(.)={}]", xpath_literal(text.trim()))
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(expr) => write!(f, "xpath `{expr}`"),
            Locator::LinkText(text) => write!(f, "link text `{text}`"),
        }
    }
}

/// Quote a string as an XPath 1.0 literal.
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{s}'")
    } else if !s.contains('"') {
        format!("\"{s}\"")
    } else {
        let parts = s
            .split('\'')
            .map(|p| format!("'{p}'"))
            .collect::<Vec<_>>()
            .join(", \"'\", ");
        format!("concat({parts})")
    }
}

/// Failures surfaced by a [`Browser`].
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("timed out after {waited:?} waiting for {locator}")]
    Timeout { locator: Locator, waited: Duration },

    #[error("failed to launch Chrome (is Chrome/Chromium installed?): {0}")]
    Launch(String),

    #[error("failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("browser interaction failed: {0}")]
    Interaction(String),
}

impl BrowserError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::Timeout { .. })
    }
}

/// The capability the extraction pipeline depends on.
///
/// Implementations own one browser session. `close` must be idempotent;
/// the pipeline may call it on the timeout path and the caller again once
/// the run is over.
pub trait Browser {
    /// Handle to an element found by a wait.
    type Element;

    fn open(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Wait until at least one element matches `locator` and return the first.
    fn wait_for(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Self::Element, BrowserError>;

    /// Wait until at least one element matches `locator` and return all
    /// matches in document order.
    fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<Self::Element>, BrowserError>;

    fn click(&mut self, element: &Self::Element) -> Result<(), BrowserError>;

    fn type_text(&mut self, element: &Self::Element, text: &str) -> Result<(), BrowserError>;

    /// Press Enter in whatever currently has focus.
    fn press_enter(&mut self) -> Result<(), BrowserError>;

    /// Visible text of the element.
    fn text(&mut self, element: &Self::Element) -> Result<String, BrowserError>;

    /// Visible text of each element, in the order given.
    fn text_all(&mut self, elements: &[Self::Element]) -> Result<Vec<String>, BrowserError> {
        elements.iter().map(|el| self.text(el)).collect()
    }

    fn close(&mut self);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_text_to_xpath() {
        let loc = Locator::link_text("Business");
        assert_eq!(loc.to_xpath(), "//a[normalize-space(.)='Business']");
    }

    #[test]
    fn test_link_text_with_single_quote() {
        let loc = Locator::link_text("Editor's Picks");
        let expected = "//a[normalize-space(.)=\"Editor's Picks\"]";
        assert_eq!(loc.to_xpath(), expected);
    }

    #[test]
    fn test_link_text_with_both_quotes() {
        let loc = Locator::link_text(r#"It's "big""#);
        assert_eq!(
            loc.to_xpath(),
            r#"//a[normalize-space(.)=concat('It', "'", 's "big"')]"#
        );
    }

    #[test]
    fn test_xpath_passthrough() {
        let loc = Locator::xpath("//span[contains(@class, 'Timestamp')]");
        assert_eq!(loc.to_xpath(), "//span[contains(@class, 'Timestamp')]");
    }

    #[test]
    fn test_timeout_display_names_locator() {
        let err = BrowserError::Timeout {
            locator: Locator::link_text("Sports"),
            waited: Duration::from_secs(10),
        };
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "timed out after 10s waiting for link text `Sports`"
        );
    }

    #[test]
    fn test_text_all_reads_in_given_order() {
        let mut browser = fake::FakeBrowser::default()
            .with(Locator::xpath("//h3"), &["one", "two"])
            .with(Locator::xpath("//p"), &["three"]);
        let (p, h3) = (Locator::xpath("//p"), Locator::xpath("//h3"));
        let timeout = Duration::from_secs(1);
        let mut elements = browser.wait_for_all(&p, timeout).unwrap();
        elements.extend(browser.wait_for_all(&h3, timeout).unwrap());

        let texts = browser.text_all(&elements).unwrap();
        assert_eq!(texts, vec!["three", "one", "two"]);
        assert_eq!(browser.batch_reads, 1);
    }
}
