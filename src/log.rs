// src/log.rs
//
// Subscriber setup for the binary: human-readable lines on stderr, plus a
// plain append-only copy in `<repo>/.store/debug.log`. The library itself
// only emits `tracing` events.

use std::fs::OpenOptions;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::consts::LOG_FILE;
use crate::file::ensure_directory;

const DEFAULT_FILTER: &str = "info,lottang_scrape=debug";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// The returned guard flushes the file writer on drop; hold it for the
/// life of the process. `None` means file logging is off (directory not
/// writable) and only stderr is used.
pub fn init(store_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (file_layer, guard) = match open_log(store_dir) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: file logging disabled ({e})");
            (None, None)
        }
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: logging already initialized ({e})");
    }

    guard
}

fn open_log(store_dir: &Path) -> crate::Result<std::fs::File> {
    ensure_directory(store_dir)?;
    let path = store_dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| crate::Error::io(path, e))
}
