//! # AP News Extract
//!
//! Searches [AP News](https://apnews.com/) in a headless Chrome session,
//! optionally narrows the results to a news category, scores each article
//! and saves the results to a timestamped spreadsheet.
//!
//! ## Usage
//!
//! ```sh
//! apnews_extract -p "interest rates" -c Business -n 1
//! ```
//!
//! Missing search parameters are prompted for on the terminal.
//!
//! ## Architecture
//!
//! The run is a single forward pipeline:
//! 1. **Search**: open the site, submit the phrase, pick the category
//! 2. **Collect**: read headline, date and description text off the page
//! 3. **Score**: keyword count, money mention, picture filename
//! 4. **Filter**: apply the month lookback
//! 5. **Write**: save `news_<timestamp>.xlsx`
//!
//! A timeout at any browser step ends the run without a file.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

mod browser;
mod cli;
mod error;
mod logging;
mod models;
mod outputs;
mod pipeline;
mod prompt;
mod recency;
mod scoring;
mod scrapers;
mod utils;

use browser::{Browser, ChromeBrowser};
use cli::Cli;
use error::ExtractError;
use logging::LogSink;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    logging::init(&LogSink::from_arg(&args.log_file), &args.log_level)?;

    let start_time = Instant::now();
    info!("apnews_extract starting up");
    debug!(?args, "Parsed CLI arguments");

    let request = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        prompt::complete_request(args.supplied(), !args.no_prompt, &mut input, &mut output)?
    };
    let settings = args.settings();
    info!(
        phrase = %request.phrase,
        category = %request.category,
        months = ?request.months,
        site = %settings.site_url,
        "Search request ready"
    );

    // Early check: a bad output path should fail before Chrome is started
    if let Err(e) = ensure_writable_dir(&settings.output_dir).await {
        error!(
            path = %settings.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let headless = !args.headed;
    let outcome = tokio::task::spawn_blocking(move || -> Result<Option<PathBuf>, ExtractError> {
        let mut browser = ChromeBrowser::launch(headless)?;
        let clock = || Local::now().naive_local();
        let result = pipeline::extract_news(&mut browser, &request, &settings, clock);
        browser.close();
        result
    })
    .await?;

    match outcome {
        Ok(Some(path)) => {
            println!(
                "News data has been extracted and saved to: {}",
                path.display()
            );
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Extraction failed");
            return Err(e.into());
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
