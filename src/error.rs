//! Error types for the extraction pipeline.

use crate::browser::BrowserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("timed out waiting for search results")]
    SearchTimeout(#[source] BrowserError),

    #[error("timed out loading news category: {category}")]
    CategoryTimeout {
        category: String,
        #[source]
        source: BrowserError,
    },

    #[error("timed out reading article listings")]
    ResultsTimeout(#[source] BrowserError),

    #[error("misaligned lists: {headlines} headlines, {dates} dates, {descriptions} descriptions")]
    MisalignedResults {
        headlines: usize,
        dates: usize,
        descriptions: usize,
    },

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("failed to write spreadsheet: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

impl ExtractError {
    /// Timeouts end a run without a file but are not program failures.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ExtractError::SearchTimeout(_)
                | ExtractError::CategoryTimeout { .. }
                | ExtractError::ResultsTimeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::Locator;
    use std::time::Duration;

    fn timeout() -> BrowserError {
        BrowserError::Timeout {
            locator: Locator::xpath("//x"),
            waited: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_category_timeout_names_category() {
        let err = ExtractError::CategoryTimeout {
            category: "Sports".to_string(),
            source: timeout(),
        };
        assert_eq!(err.to_string(), "timed out loading news category: Sports");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_misaligned_is_not_timeout() {
        let err = ExtractError::MisalignedResults {
            headlines: 3,
            dates: 2,
            descriptions: 3,
        };
        assert!(!err.is_timeout());
        assert!(
            err.to_string()
                .contains("3 headlines, 2 dates, 3 descriptions")
        );
    }

    #[test]
    fn test_browser_error_converts() {
        let err: ExtractError = BrowserError::Interaction("boom".to_string()).into();
        assert_eq!(err.to_string(), "browser interaction failed: boom");
    }
}
