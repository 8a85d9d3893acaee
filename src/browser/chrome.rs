//! Headless Chrome implementation of [`Browser`].
//!
//! Elements are addressed by the XPath that found them plus their position
//! in the match list, and are re-resolved on every interaction. Chrome's own
//! element handles borrow the tab, which would tie their lifetime to the
//! session. Batched text reads resolve each XPath once per batch.

use super::{Browser, BrowserError, Locator};
use headless_chrome::{Browser as Chrome, LaunchOptions, Tab};
use itertools::Itertools;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// An element previously matched by a wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeElement {
    xpath: String,
    index: usize,
}

struct Session {
    // Dropping the browser terminates the Chrome process.
    _browser: Chrome,
    tab: Arc<Tab>,
}

/// A single Chrome session with one tab.
pub struct ChromeBrowser {
    session: Option<Session>,
}

impl std::fmt::Debug for ChromeBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeBrowser")
            .field("open", &self.session.is_some())
            .finish()
    }
}

impl ChromeBrowser {
    /// Launch Chrome and open a blank tab.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Launch`] if no Chrome/Chromium binary can be
    /// started.
    #[instrument(level = "info")]
    pub fn launch(headless: bool) -> Result<Self, BrowserError> {
        info!(headless, "Launching Chrome");

        let options = LaunchOptions {
            headless,
            sandbox: false,
            window_size: Some((1920, 1080)),
            idle_browser_timeout: Duration::from_secs(120),
            args: vec![
                OsStr::new("--disable-blink-features=AutomationControlled"),
                OsStr::new("--disable-dev-shm-usage"),
            ],
            ..Default::default()
        };

        let browser = Chrome::new(options).map_err(|e| BrowserError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::Launch(format!("failed to open tab: {e}")))?;

        Ok(Self {
            session: Some(Session {
                _browser: browser,
                tab,
            }),
        })
    }

    fn tab(&self) -> Result<&Arc<Tab>, BrowserError> {
        match &self.session {
            Some(session) => Ok(&session.tab),
            None => Err(BrowserError::Interaction("browser already closed".into())),
        }
    }

    fn find_all<'a>(
        tab: &'a Tab,
        xpath: &str,
    ) -> Result<Vec<headless_chrome::Element<'a>>, BrowserError> {
        tab.find_elements_by_xpath(xpath)
            .map_err(|e| BrowserError::Interaction(e.to_string()))
    }

    fn resolve<'a>(
        tab: &'a Tab,
        element: &ChromeElement,
    ) -> Result<headless_chrome::Element<'a>, BrowserError> {
        Self::find_all(tab, &element.xpath)?
            .into_iter()
            .nth(element.index)
            .ok_or_else(|| gone(element))
    }
}

fn gone(element: &ChromeElement) -> BrowserError {
    BrowserError::Interaction(format!(
        "element #{} of `{}` is no longer on the page",
        element.index, element.xpath
    ))
}

fn failed<E: std::fmt::Display>(action: &'static str) -> impl FnOnce(E) -> BrowserError {
    move |e| BrowserError::Interaction(format!("{action} failed: {e}"))
}

impl Browser for ChromeBrowser {
    type Element = ChromeElement;

    #[instrument(level = "info", skip(self))]
    fn open(&mut self, url: &str) -> Result<(), BrowserError> {
        let tab = self.tab()?;
        tab.navigate_to(url)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        info!("Page loaded");
        Ok(())
    }

    fn wait_for(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<ChromeElement, BrowserError> {
        let xpath = locator.to_xpath();
        debug!(%locator, ?timeout, "Waiting for element");
        self.tab()?
            .wait_for_xpath_with_custom_timeout(&xpath, timeout)
            .map_err(|e| {
                debug!(%locator, error = %e, "Wait failed");
                BrowserError::Timeout {
                    locator: locator.clone(),
                    waited: timeout,
                }
            })?;
        Ok(ChromeElement { xpath, index: 0 })
    }

    fn wait_for_all(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<ChromeElement>, BrowserError> {
        let first = self.wait_for(locator, timeout)?;
        let count = Self::find_all(self.tab()?, &first.xpath)?.len();
        debug!(%locator, count, "Elements present");
        Ok((0..count)
            .map(|index| ChromeElement {
                xpath: first.xpath.clone(),
                index,
            })
            .collect())
    }

    fn click(&mut self, element: &ChromeElement) -> Result<(), BrowserError> {
        let tab = self.tab()?;
        Self::resolve(tab, element)?
            .click()
            .map_err(failed("click"))?;
        Ok(())
    }

    fn type_text(&mut self, element: &ChromeElement, text: &str) -> Result<(), BrowserError> {
        let tab = self.tab()?;
        Self::resolve(tab, element)?
            .type_into(text)
            .map_err(failed("typing"))?;
        Ok(())
    }

    fn press_enter(&mut self) -> Result<(), BrowserError> {
        let tab = self.tab()?;
        tab.press_key("Enter").map_err(failed("key press"))?;
        Ok(())
    }

    fn text(&mut self, element: &ChromeElement) -> Result<String, BrowserError> {
        let tab = self.tab()?;
        Self::resolve(tab, element)?
            .get_inner_text()
            .map_err(failed("reading text"))
    }

    /// Resolves each XPath once for the whole batch instead of once per
    /// element.
    fn text_all(&mut self, elements: &[ChromeElement]) -> Result<Vec<String>, BrowserError> {
        let tab = self.tab()?;
        let mut texts = Vec::with_capacity(elements.len());
        for (xpath, batch) in &elements.iter().chunk_by(|el| el.xpath.clone()) {
            let found = Self::find_all(tab, &xpath)?;
            for el in batch {
                let node = found.get(el.index).ok_or_else(|| gone(el))?;
                texts.push(node.get_inner_text().map_err(failed("reading text"))?);
            }
        }
        Ok(texts)
    }

    fn close(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.tab.close(true) {
                warn!(error = %e, "Closing tab failed; shutting Chrome down anyway");
            }
            info!("Browser closed");
        }
    }
}

impl Drop for ChromeBrowser {
    fn drop(&mut self) {
        self.close();
    }
}
