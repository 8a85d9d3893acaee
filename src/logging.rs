//! Tracing subscriber setup.
//!
//! The sink and level are chosen by the caller: an append-only log file or
//! stderr, at the level given on the command line unless `RUST_LOG` says
//! otherwise. Each line carries an RFC 3339 timestamp, the level and the
//! message.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::UtcTime;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Append to a file, creating it if needed.
    File(PathBuf),
    Stderr,
}

impl LogSink {
    /// `-` selects stderr; anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            LogSink::Stderr
        } else {
            LogSink::File(PathBuf::from(arg))
        }
    }
}

/// `RUST_LOG` if set and valid, otherwise `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Build a formatting subscriber writing to `writer`.
pub fn build_subscriber<W>(
    filter: EnvFilter,
    writer: W,
    ansi: bool,
) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(ansi)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(writer)
        .finish()
}

fn open_append(path: &Path) -> std::io::Result<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber for this process.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(sink: &LogSink, level: &str) -> Result<(), Box<dyn Error>> {
    let filter = env_filter(level);
    match sink {
        LogSink::File(path) => {
            let file = open_append(path)?;
            let subscriber = build_subscriber(filter, Mutex::new(file), false);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogSink::Stderr => {
            let subscriber = build_subscriber(filter, std::io::stderr, true);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
