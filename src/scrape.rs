// src/scrape.rs
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::{
    core::net,
    data::DrawRecord,
    error::{Error, Result},
    progress::Progress,
    specs::{draw_info, winners::{self, ParsedListings}},
};

/// Where draws come from. The live site in production; canned pages in tests.
pub trait DrawSource {
    /// Date of `draw`, or `None` if it hasn't been drawn.
    fn draw_date(&self, draw: u32) -> Result<Option<NaiveDate>>;

    /// Raw listing document for `draw`.
    fn listing_html(&self, draw: u32) -> Result<String>;
}

/// The operator's website over blocking HTTP.
pub struct LiveSource {
    client: Client,
}

impl LiveSource {
    pub fn new() -> Result<Self> {
        Ok(Self { client: net::client()? })
    }
}

impl DrawSource for LiveSource {
    fn draw_date(&self, draw: u32) -> Result<Option<NaiveDate>> {
        draw_info::fetch(&self.client, draw)
    }

    fn listing_html(&self, draw: u32) -> Result<String> {
        winners::fetch(&self.client, draw)
    }
}

/// Existence check used by the estimator. Any failure reads as "not drawn yet".
pub fn draw_exists(source: &dyn DrawSource, draw: u32) -> bool {
    match source.draw_date(draw) {
        Ok(date) => date.is_some(),
        Err(e) => {
            debug!(draw, error = %e, "probe failed; treating draw as absent");
            false
        }
    }
}

/// One draw's parsed listing page plus its (optional) date.
#[derive(Debug)]
pub struct ListingPage {
    pub draw: u32,
    pub draw_date: Option<NaiveDate>,
    pub parsed: ParsedListings,
}

impl ListingPage {
    /// Zero listings: worth a warning (layout change?), not an error.
    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }

    pub fn into_records(self) -> Vec<DrawRecord> {
        let draw_date = self.draw_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        self.parsed
            .listings
            .into_iter()
            .map(|l| DrawRecord {
                draw: self.draw,
                draw_date: draw_date.clone(),
                rank: l.rank,
                name: l.name,
                choice_type: l.choice_type,
                address: l.address,
            })
            .collect()
    }
}

/// Fetch and parse one draw. A failed listing request is `Error::Fetch`;
/// a failed date lookup only leaves the date empty.
pub fn fetch_draw(source: &dyn DrawSource, draw: u32) -> Result<ListingPage> {
    let html_doc = source.listing_html(draw).map_err(|e| Error::fetch(draw, e))?;

    let draw_date = source.draw_date(draw).unwrap_or_else(|e| {
        debug!(draw, error = %e, "draw date lookup failed");
        None
    });

    let t = std::time::Instant::now();
    let parsed = winners::parse_doc(&html_doc);
    debug!(draw, elapsed = ?t.elapsed(), strategy = ?parsed.strategy, "parsed listing page");

    Ok(ListingPage { draw, draw_date, parsed })
}

/// Outcome of fetching a batch of draws.
#[derive(Debug, Default)]
pub struct Collected {
    pub records: Vec<DrawRecord>,
    pub fetched: Vec<u32>,
    pub empty: Vec<u32>,
    pub failed: Vec<u32>,
}

/// Fetch `draws` one at a time, in the order given. Failures are logged and
/// skipped; whatever succeeded is returned.
pub fn collect_draws(
    source: &dyn DrawSource,
    draws: &[u32],
    pause: Duration,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Collected {
    let mut out = Collected::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(draws.len());
    }

    for (i, &draw) in draws.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            thread::sleep(pause); // be polite
        }
        info!(draw, "scraping draw");

        match fetch_draw(source, draw) {
            Ok(page) => {
                if page.is_empty() {
                    warn!(
                        draw,
                        undetermined_rank = page.parsed.undetermined_rank,
                        "no listings parsed; page layout may have changed"
                    );
                    out.empty.push(draw);
                } else if page.parsed.undetermined_rank > 0 {
                    warn!(draw, skipped = page.parsed.undetermined_rank, "listings without a readable rank were dropped");
                }
                let records = page.into_records();
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(draw, records.len());
                }
                out.fetched.push(draw);
                out.records.extend(records);
            }
            Err(e) => {
                warn!(draw, error = %e, "skipping draw; it stays missing until the next run");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(draw, &e.to_string());
                }
                out.failed.push(draw);
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    out
}
