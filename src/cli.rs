// src/cli.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use crate::config::options::{Anchor, Paths, RunOptions};
use crate::error::Error;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};
use crate::scrape::LiveSource;

/// Weekly scrape of lottery winning-store listings into the local ledger,
/// then store matching and the A3 scoring hand-off.
#[derive(Debug, Parser)]
#[command(name = "lottang_scrape", version, about)]
pub struct Args {
    /// Repository root; data/, scripts/ and .store/ live under it.
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// A draw number known to have happened on --base-date.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub base_draw: u32,

    /// Date of --base-draw (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub base_date: NaiveDate,

    /// Pretend today is this date (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Trust the weekly estimate; don't ask the site about later draws.
    #[arg(long)]
    pub no_probe: bool,

    /// Reconcile but don't run the scoring script.
    #[arg(long)]
    pub skip_scoring: bool,
}

impl Args {
    pub fn into_options(self) -> RunOptions {
        let today = self.today.unwrap_or_else(|| chrono::Local::now().date_naive());
        let anchor = Anchor { draw: self.base_draw, date: self.base_date };
        let mut opts = RunOptions::new(self.repo_root, anchor, today);
        opts.probe = !self.no_probe;
        opts.scoring = !self.skip_scoring;
        opts
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Prints one line per draw to stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        if total == 0 {
            eprintln!("Ledger is up to date.");
        }
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, draw: u32, rows: usize) {
        self.done += 1;
        eprintln!("[{}/{}] draw {draw}: {rows} listings", self.done, self.total);
    }

    fn item_failed(&mut self, draw: u32, msg: &str) {
        self.done += 1;
        eprintln!("[{}/{}] draw {draw}: skipped ({msg})", self.done, self.total);
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let opts = args.into_options();

    let _guard = crate::log::init(&Paths::under(&opts.repo_root).store_dir);
    info!(root = %opts.repo_root.display(), today = %opts.today, "run started");

    let source = LiveSource::new().wrap_err("could not build HTTP client")?;
    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, &source, Some(&mut progress)).wrap_err("pipeline run failed")?;

    report(&summary);
    Ok(())
}

fn report(s: &RunSummary) {
    eprintln!(
        "Latest draw {}: fetched {}, failed {}, empty {}; ledger +{} rows ({} total{})",
        s.latest_draw,
        s.fetched.len(),
        s.failed.len(),
        s.empty.len(),
        s.rows_added,
        s.ledger_rows,
        if s.ledger_written { "" } else { ", unchanged" },
    );
    if !s.failed.is_empty() {
        eprintln!("Will retry next run: {:?}", s.failed);
    }
    match (s.matched, s.unmatched) {
        (Some(m), Some(u)) => eprintln!("Matched {m}, unmatched {u}{}", if s.scored { "; scores updated" } else { "" }),
        _ => eprintln!("No store reference dataset; matching and scoring skipped."),
    }
}
