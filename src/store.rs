// src/store.rs
//
// The ledger: every (draw, store listing) observation ever scraped, kept in
// one CSV file. Append-only per draw: once a draw number is present it is
// never fetched or merged again unless someone edits the file by hand.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::data::DrawRecord;
use crate::error::Result;
use crate::file;

pub const LEDGER_HEADERS: [&str; 6] = ["draw", "draw_date", "rank", "name", "choice_type", "address"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    rows: Vec<DrawRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<DrawRecord>) -> Self {
        Self { rows }
    }

    /// Load from `path`; a missing file is an empty ledger with the fixed schema.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no ledger yet; starting empty");
            return Ok(Self::new());
        }
        let rows: Vec<DrawRecord> = file::read_csv(path)?;
        debug!(path = %path.display(), rows = rows.len(), "ledger loaded");
        Ok(Self { rows })
    }

    /// Write the whole ledger atomically (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        file::write_csv(path, &LEDGER_HEADERS, &self.rows)
    }

    pub fn rows(&self) -> &[DrawRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn present_draws(&self) -> BTreeSet<u32> {
        self.rows.iter().map(|r| r.draw).collect()
    }

    /// Draws to fetch so the ledger reaches `latest`: every draw in
    /// `[min(present ∪ {latest}), latest]` not already present.
    /// Gaps below the oldest known draw are left alone.
    pub fn missing_draws(&self, latest: u32) -> Vec<u32> {
        let present = self.present_draws();
        let start = present.first().copied().map_or(latest, |lo| lo.min(latest));
        (start..=latest).filter(|d| !present.contains(d)).collect()
    }

    /// Append `fetched` rows whose draw isn't in the ledger yet, then re-sort.
    /// Returns how many rows were added.
    pub fn merge(&mut self, fetched: Vec<DrawRecord>) -> usize {
        let present = self.present_draws();
        let before = self.rows.len();
        self.rows.extend(fetched.into_iter().filter(|r| !present.contains(&r.draw)));
        let added = self.rows.len() - before;
        if added > 0 {
            self.sort();
        }
        added
    }

    /// (draw, rank, name) ascending; stable, so ties keep page order.
    pub fn sort(&mut self) {
        self.rows
            .sort_by(|a, b| (a.draw, a.rank, &a.name).cmp(&(b.draw, b.rank, &b.name)));
    }
}
