// src/estimate.rs
//
// Latest-draw estimation: weekly cadence from a known anchor, then walk
// forward while the metadata endpoint confirms the next draw exists.
// A heuristic, not an authority: probe failures stop the walk quietly.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::consts::{DRAW_CADENCE_DAYS, MAX_FORWARD_PROBES};
use crate::config::options::Anchor;
use crate::scrape::{draw_exists, DrawSource};

/// `anchor.draw + whole weeks since anchor.date`, never below `anchor.draw`.
pub fn weekly_estimate(anchor: &Anchor, today: NaiveDate) -> u32 {
    let days = (today - anchor.date).num_days();
    let weeks = days.div_euclid(DRAW_CADENCE_DAYS).max(0);
    anchor.draw.saturating_add(u32::try_from(weeks).unwrap_or(u32::MAX))
}

/// Weekly estimate, optionally extended by probing `candidate + 1`, `+ 2`, …
/// until the first draw that doesn't exist.
pub fn latest_draw(anchor: &Anchor, today: NaiveDate, probe: Option<&dyn DrawSource>) -> u32 {
    let mut cur = weekly_estimate(anchor, today);
    debug!(anchor = anchor.draw, %today, estimate = cur, "weekly cadence estimate");

    let Some(source) = probe else {
        return cur;
    };

    for _ in 0..MAX_FORWARD_PROBES {
        let Some(next) = cur.checked_add(1) else { return cur };
        if !draw_exists(source, next) {
            return cur;
        }
        debug!(draw = next, "probe: draw exists, advancing");
        cur = next;
    }
    warn!(limit = MAX_FORWARD_PROBES, draw = cur, "forward probing hit its limit; stopping here");
    cur
}
