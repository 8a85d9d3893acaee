//! Spreadsheet output.
//!
//! Each run writes one workbook with a single sheet: a fixed header row and
//! one row per [`ArticleRecord`] in page order.
//!
//! # File Naming
//!
//! ```text
//! output_dir/
//! └── news_2025-05-06_14-30-00.xlsx
//! ```
//!
//! The timestamp has second granularity. Two runs within the same second
//! write to the same path and the later one wins.

use crate::error::ExtractError;
use crate::models::ArticleRecord;
use chrono::NaiveDateTime;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Column headers, in output order.
pub const HEADERS: [&str; 6] = [
    "Title",
    "Date",
    "Description",
    "Picture Filename",
    "Search Phrase Count",
    "Contains Money",
];

const SHEET_NAME: &str = "News";

/// Filename for a workbook saved at `now`.
pub fn output_filename(now: NaiveDateTime) -> String {
    format!("news_{}.xlsx", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write `records` to a new workbook in `output_dir`.
///
/// # Returns
///
/// The path of the saved file.
///
/// # Errors
///
/// [`ExtractError::Write`] if the workbook cannot be built or saved.
#[instrument(
    level = "info",
    skip(records, output_dir),
    fields(count = records.len(), output_dir = %output_dir.display())
)]
pub fn write_records(
    records: &[ArticleRecord],
    output_dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, ExtractError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, rec) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &rec.title)?;
        worksheet.write_string(row, 1, &rec.published_label)?;
        worksheet.write_string(row, 2, &rec.description)?;
        worksheet.write_string(row, 3, &rec.picture_filename)?;
        worksheet.write_number(row, 4, rec.keyword_count as f64)?;
        worksheet.write_boolean(row, 5, rec.mentions_money)?;
        debug!(row, title = %rec.title, "Wrote row");
    }

    let path = output_dir.join(output_filename(now));
    workbook.save(&path)?;
    info!(path = %path.display(), rows = records.len(), "Saved workbook");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, open_workbook_auto};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 6)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_output_filename_format() {
        assert_eq!(output_filename(now()), "news_2025-05-06_14-30-05.xlsx");
    }

    #[test]
    fn test_write_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_records(&[], dir.path(), now()).unwrap();
        assert_eq!(path, dir.path().join("news_2025-05-06_14-30-05.xlsx"));

        let mut wb = open_workbook_auto(&path).unwrap();
        let range = wb.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.height(), 1);
        let header: Vec<String> = range
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(header, HEADERS);
    }

    #[test]
    fn test_write_rows_in_order_with_typed_cells() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            ArticleRecord::score(
                "fed",
                "Fed raises rates".to_string(),
                "1 hour ago".to_string(),
                "The Fed cost banks $2,000.".to_string(),
            ),
            ArticleRecord::score(
                "fed",
                "Storm hits coast".to_string(),
                "March 3, 2025".to_string(),
                "Residents evacuate.".to_string(),
            ),
        ];
        let path = write_records(&records, dir.path(), now()).unwrap();

        let mut wb = open_workbook_auto(&path).unwrap();
        let range = wb.worksheet_range_at(0).unwrap().unwrap();
        let rows: Vec<_> = range.rows().collect();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[1][0], Data::String("Fed raises rates".to_string()));
        assert_eq!(rows[1][1], Data::String("1 hour ago".to_string()));
        assert_eq!(rows[1][3].to_string(), "Fed_raises_rates.png");
        assert_eq!(rows[1][4], Data::Float(2.0));
        assert_eq!(rows[1][5], Data::Bool(true));

        assert_eq!(rows[2][0], Data::String("Storm hits coast".to_string()));
        assert_eq!(rows[2][4], Data::Float(0.0));
        assert_eq!(rows[2][5], Data::Bool(false));
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does/not/exist");
        let err = write_records(&[], &missing, now()).unwrap_err();
        assert!(matches!(err, ExtractError::Write(_)));
    }
}
