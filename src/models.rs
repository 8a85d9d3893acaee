//! Data models for a single extraction run.
//!
//! - [`SearchRequest`]: what the user asked for
//! - [`ScrapedPage`]: raw text lists read off the results page
//! - [`ArticleRecord`]: one scored row of the output spreadsheet
//!
//! Nothing here outlives a run; records are discarded once written.

use crate::error::ExtractError;
use crate::scoring::{keyword_count, mentions_money, picture_filename};
use itertools::izip;

/// Search parameters collected from flags, environment and prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text phrase submitted to the site search.
    pub phrase: String,
    /// Category link to narrow results by. Empty means no filter.
    pub category: String,
    /// Month lookback. `None` keeps every article.
    pub months: Option<u32>,
}

impl SearchRequest {
    pub fn category(&self) -> Option<&str> {
        let c = self.category.trim();
        if c.is_empty() { None } else { Some(c) }
    }
}

/// The three parallel text lists read from a results page, in DOM order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedPage {
    pub headlines: Vec<String>,
    pub dates: Vec<String>,
    pub descriptions: Vec<String>,
}

impl ScrapedPage {
    /// Pair up headlines, dates and descriptions by position.
    ///
    /// # Errors
    ///
    /// [`ExtractError::MisalignedResults`] if the three lists differ in
    /// length. Nothing is truncated.
    pub fn into_triples(self) -> Result<Vec<(String, String, String)>, ExtractError> {
        let (h, d, s) = (
            self.headlines.len(),
            self.dates.len(),
            self.descriptions.len(),
        );
        if h != d || h != s {
            return Err(ExtractError::MisalignedResults {
                headlines: h,
                dates: d,
                descriptions: s,
            });
        }
        let triples = izip!(self.headlines, self.dates, self.descriptions).collect();
        Ok(triples)
    }
}

/// One article row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    /// Publication label exactly as displayed ("3 hours ago", "March 5, 2024").
    pub published_label: String,
    pub description: String,
    /// Stand-in image name derived from the title; no image is fetched.
    pub picture_filename: String,
    /// Occurrences of the search phrase in title and description.
    pub keyword_count: usize,
    /// Whether the description mentions a dollar amount.
    pub mentions_money: bool,
}

impl ArticleRecord {
    /// Score a scraped triple against the search phrase.
    pub fn score(
        phrase: &str,
        title: String,
        published_label: String,
        description: String,
    ) -> Self {
        let keyword_count = keyword_count(phrase, [title.as_str(), description.as_str()]);
        let mentions_money = mentions_money(&description);
        let picture_filename = picture_filename(&title);
        Self {
            title,
            published_label,
            description,
            picture_filename,
            keyword_count,
            mentions_money,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(h: &[&str], d: &[&str], s: &[&str]) -> ScrapedPage {
        let v = |xs: &[&str]| xs.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        ScrapedPage {
            headlines: v(h),
            dates: v(d),
            descriptions: v(s),
        }
    }

    #[test]
    fn test_into_triples_preserves_order() {
        let triples = page(&["a", "b"], &["1", "2"], &["x", "y"])
            .into_triples()
            .unwrap();
        assert_eq!(
            triples,
            vec![
                ("a".to_string(), "1".to_string(), "x".to_string()),
                ("b".to_string(), "2".to_string(), "y".to_string()),
            ]
        );
    }

    #[test]
    fn test_into_triples_rejects_misaligned() {
        let err = page(&["a", "b", "c"], &["1", "2"], &["x", "y", "z"])
            .into_triples()
            .unwrap_err();
        match err {
            ExtractError::MisalignedResults {
                headlines,
                dates,
                descriptions,
            } => {
                assert_eq!((headlines, dates, descriptions), (3, 2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_page_is_aligned() {
        assert!(ScrapedPage::default().into_triples().unwrap().is_empty());
    }

    #[test]
    fn test_score_record() {
        let rec = ArticleRecord::score(
            "election",
            "Election results delayed".to_string(),
            "2 hours ago".to_string(),
            "The election cost $3,000,000 to run.".to_string(),
        );
        assert_eq!(rec.keyword_count, 2);
        assert!(rec.mentions_money);
        assert_eq!(rec.picture_filename, "Election_results_del.png");
        assert_eq!(rec.published_label, "2 hours ago");
    }

    #[test]
    fn test_money_only_checked_in_description() {
        let rec = ArticleRecord::score(
            "x",
            "Stocks fall $500".to_string(),
            "Today".to_string(),
            "Markets slide".to_string(),
        );
        assert!(!rec.mentions_money);
    }

    #[test]
    fn test_request_category_blank_means_none() {
        let req = SearchRequest {
            phrase: "climate".to_string(),
            category: "   ".to_string(),
            months: None,
        };
        assert_eq!(req.category(), None);

        let req = SearchRequest {
            category: " Science ".to_string(),
            ..req
        };
        assert_eq!(req.category(), Some("Science"));
    }
}
