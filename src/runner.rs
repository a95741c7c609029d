// src/runner.rs
//
// One pipeline run: estimate → diff → fetch → merge → persist → reconcile → score.
// Everything before reconciliation is best-effort per draw; a missing draw
// is simply tried again next week.

use tracing::{info, warn};

use crate::{
    config::options::RunOptions,
    error::Result,
    estimate,
    file::ensure_directory,
    index::StoreIndex,
    progress::Progress,
    reconcile::reconcile,
    scoring::ScoringCommand,
    scrape::{self, DrawSource},
    store::Ledger,
};

/// What a run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub latest_draw: u32,
    pub fetched: Vec<u32>,
    pub failed: Vec<u32>,
    pub empty: Vec<u32>,
    pub rows_added: usize,
    pub ledger_rows: usize,
    pub ledger_written: bool,
    /// `None` when the reference dataset was absent.
    pub matched: Option<usize>,
    pub unmatched: Option<usize>,
    pub scored: bool,
}

/// Top-level runner. `progress` can be None (no UI updates).
pub fn run(
    opts: &RunOptions,
    source: &dyn DrawSource,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary> {
    let paths = opts.paths();
    ensure_directory(&paths.data_dir)?;

    let mut summary = RunSummary::default();

    /* ---------------- which draws ---------------- */

    let probe = opts.probe.then_some(source);
    summary.latest_draw = estimate::latest_draw(&opts.anchor, opts.today, probe);
    info!(latest = summary.latest_draw, "latest draw estimated");

    let mut ledger = Ledger::load(&paths.ledger)?;
    let missing = ledger.missing_draws(summary.latest_draw);
    info!(present = ledger.present_draws().len(), missing = missing.len(), "ledger diffed");
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("latest draw {}, {} to fetch", summary.latest_draw, missing.len()));
    }

    /* ---------------- fetch + merge ---------------- */

    let collected = scrape::collect_draws(source, &missing, opts.request_pause, progress.as_deref_mut());
    summary.fetched = collected.fetched;
    summary.failed = collected.failed;
    summary.empty = collected.empty;

    summary.rows_added = ledger.merge(collected.records);
    summary.ledger_rows = ledger.len();

    if summary.rows_added > 0 || !paths.ledger.exists() {
        ledger.save(&paths.ledger)?;
        summary.ledger_written = true;
        info!(added = summary.rows_added, total = summary.ledger_rows, "ledger saved");
    } else {
        info!(total = summary.ledger_rows, "ledger unchanged");
    }

    /* ---------------- reconcile + score ---------------- */

    if !paths.reference.exists() {
        warn!(
            path = %paths.reference.display(),
            "store reference dataset missing; skipping reconciliation and scoring"
        );
        return Ok(summary);
    }

    let index = StoreIndex::load(&paths.reference)?;
    let rec = reconcile(&ledger, &index);
    rec.save(&paths.wins, &paths.unmatched)?;
    summary.matched = Some(rec.matched.len());
    summary.unmatched = Some(rec.unmatched.len());
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("{} matched, {} unmatched", rec.matched.len(), rec.unmatched.len()));
    }

    if opts.scoring {
        ScoringCommand::from_paths(&paths, opts.scorer_program.clone(), opts.today).run()?;
        summary.scored = true;
    } else {
        info!("scoring disabled for this run");
    }

    Ok(summary)
}
