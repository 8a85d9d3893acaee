//! Output generation.
//!
//! - [`xlsx`]: writes scored articles to a timestamped spreadsheet
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── news_2025-05-06_08-15-42.xlsx
//! └── news_2025-05-06_14-30-00.xlsx
//! ```

pub mod xlsx;
