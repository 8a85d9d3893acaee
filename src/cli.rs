//! Command-line interface definitions.
//!
//! Every option can also come from an environment variable. The three search
//! parameters are optional here; whatever is missing is prompted for on the
//! terminal unless `--no-prompt` is given.

use crate::pipeline::{DEFAULT_SITE_URL, Settings};
use crate::prompt::Supplied;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Fully interactive, like the original bot
/// apnews_extract
///
/// # Scripted
/// apnews_extract -p "interest rates" -c Business -n 1 --no-prompt -o ./out
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Phrase to search for
    #[arg(short, long, env = "NEWS_SEARCH_PHRASE")]
    pub phrase: Option<String>,

    /// News category link to narrow results by (empty for all)
    #[arg(short, long, env = "NEWS_CATEGORY")]
    pub category: Option<String>,

    /// Months of news to keep: 0 for the current month, 1 adds the previous one, ...
    #[arg(short = 'n', long, env = "NEWS_MONTHS")]
    pub months: Option<u32>,

    /// Fail instead of prompting for missing values
    #[arg(long)]
    pub no_prompt: bool,

    /// Directory the spreadsheet is written to
    #[arg(short, long, env = "NEWS_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Site to search
    #[arg(
        long,
        env = "NEWS_SITE_URL",
        default_value = DEFAULT_SITE_URL,
        value_parser = parse_site_url
    )]
    pub site_url: Url,

    /// Seconds to wait for each page element
    #[arg(long, env = "NEWS_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Log file, opened for appending; `-` logs to stderr
    #[arg(long, env = "NEWS_LOG_FILE", default_value = "ap_news_bot.log")]
    pub log_file: String,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_site_url(s: &str) -> Result<Url, String> {
    let url = Url::parse(s).map_err(|e| format!("invalid URL `{s}`: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "unsupported scheme `{other}`; expected http or https"
        )),
    }
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            site_url: self.site_url.to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
            output_dir: self.output_dir.clone(),
        }
    }

    pub fn supplied(&self) -> Supplied {
        Supplied {
            phrase: self.phrase.clone(),
            category: self.category.clone(),
            months: self.months,
        }
    }
}
