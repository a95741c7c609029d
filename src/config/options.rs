// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;

use super::consts::*;

/// Known (draw, date) pair the weekly cadence is counted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub draw: u32,
    pub date: NaiveDate,
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub repo_root: PathBuf,
    pub anchor: Anchor,
    pub today: NaiveDate,
    pub probe: bool,                 // confirm/extend the estimate against the metadata endpoint
    pub scoring: bool,               // hand matched events to the scorer
    pub scorer_program: OsString,    // interpreter for the scoring script
    pub request_pause: Duration,     // pause between consecutive draw fetches
}

impl RunOptions {
    pub fn new(repo_root: impl Into<PathBuf>, anchor: Anchor, today: NaiveDate) -> Self {
        Self {
            repo_root: repo_root.into(),
            anchor,
            today,
            probe: true,
            scoring: true,
            scorer_program: OsString::from(SCORER_PROGRAM),
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }

    pub fn paths(&self) -> Paths {
        Paths::under(&self.repo_root)
    }
}

/// Every file the pipeline touches, resolved against the repository root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub store_dir: PathBuf,
    pub ledger: PathBuf,
    pub wins: PathBuf,
    pub unmatched: PathBuf,
    pub reference: PathBuf,
    pub scored: PathBuf,
    pub summary: PathBuf,
    pub scorer_script: PathBuf,
}

impl Paths {
    pub fn under(root: &Path) -> Self {
        let data_dir = root.join(DATA_DIR);
        Self {
            root: root.to_path_buf(),
            store_dir: root.join(STORE_DIR),
            ledger: data_dir.join(LEDGER_FILE),
            wins: data_dir.join(WINS_FILE),
            unmatched: data_dir.join(UNMATCHED_FILE),
            reference: data_dir.join(REFERENCE_FILE),
            scored: data_dir.join(SCORED_FILE),
            summary: data_dir.join(SUMMARY_FILE),
            scorer_script: root.join(SCORER_SCRIPT),
            data_dir,
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.store_dir.join(LOG_FILE)
    }
}
