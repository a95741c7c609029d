//! Page knowledge for the winning-store listing page
//! (`store.do?method=topStore&pageGubun=L645&drwNo=N`).
//!
//! The page has shipped in (at least) two layouts over time:
//! - **tables**: one `<table>` per prize tier, the tier named in a caption,
//!   a header cell, or a heading just above the table;
//! - **cards**: `ul.list_map > li` items with free-text lines.
//!
//! Each layout is one [`ListingStrategy`]. Strategies run in priority order
//! (tables, then cards) and the first one that yields anything wins. An empty
//! result from every strategy is not an error: the caller logs it, since it
//! usually means the page changed shape.
//!
//! Rank is never guessed. A listing whose tier can't be read off the page is
//! dropped and counted in [`ParsedListings::undetermined_rank`].

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{
    ADDRESS_TOKENS, CARD_SELECTOR, CHOICE_TOKENS, HOST, LISTING_PATH, LISTING_TIMEOUT_SECS,
};
use crate::core::html::{parent_element, prev_element_sibling, text_lines, text_of};
use crate::core::net;
use crate::data::Rank;
use crate::error::Result;

// Constant selectors; parse failure would be a typo caught by the tests below.
static TABLE: LazyLock<Selector> = LazyLock::new(|| sel("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| sel("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| sel("td"));
static TABLE_HEAD: LazyLock<Selector> = LazyLock::new(|| sel("caption, th"));
static CARD: LazyLock<Selector> = LazyLock::new(|| sel(CARD_SELECTOR));

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("constant CSS selector")
}

/// One winning store as read off the page, before draw/date stamping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Listing {
    pub name: String,
    pub choice_type: String,
    pub address: String,
    pub rank: Rank,
}

/// What one strategy pulled out of a document.
#[derive(Debug, Default)]
pub struct Extracted {
    pub listings: Vec<Listing>,
    pub undetermined_rank: usize,
}

/// A layout-specific extractor producing zero or more listings.
pub trait ListingStrategy {
    fn name(&self) -> &'static str;
    fn extract(&self, doc: &Html) -> Extracted;
}

pub struct Tabular;
pub struct Cards;

/// Priority order: first non-empty result wins.
pub const STRATEGIES: &[&dyn ListingStrategy] = &[&Tabular, &Cards];

/// Outcome of parsing one listing page.
#[derive(Debug, Default)]
pub struct ParsedListings {
    pub listings: Vec<Listing>,
    /// Strategy that produced `listings`; `None` when every strategy came up empty.
    pub strategy: Option<&'static str>,
    /// Listings skipped because no rank marker applied to them.
    pub undetermined_rank: usize,
}

impl ParsedListings {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

pub fn url(draw: u32) -> String {
    format!("{HOST}{LISTING_PATH}{draw}")
}

pub fn fetch(client: &Client, draw: u32) -> Result<String> {
    net::http_get(client, &url(draw), Duration::from_secs(LISTING_TIMEOUT_SECS))
}

/// Split out for unit tests.
pub fn parse_doc(html_doc: &str) -> ParsedListings {
    parse_with(html_doc, STRATEGIES)
}

pub fn parse_with(html_doc: &str, strategies: &[&dyn ListingStrategy]) -> ParsedListings {
    let doc = Html::parse_document(html_doc);
    let mut out = ParsedListings::default();

    for strategy in strategies {
        let found = strategy.extract(&doc);
        out.undetermined_rank += found.undetermined_rank;
        tracing::debug!(
            strategy = strategy.name(),
            listings = found.listings.len(),
            undetermined_rank = found.undetermined_rank,
            "listing strategy tried"
        );
        if !found.listings.is_empty() {
            out.listings = dedup(found.listings);
            out.strategy = Some(strategy.name());
            break;
        }
    }
    out
}

/* ---------------- tables ---------------- */

impl ListingStrategy for Tabular {
    fn name(&self) -> &'static str { "table" }

    fn extract(&self, doc: &Html) -> Extracted {
        let mut out = Extracted::default();

        for table in doc.select(&TABLE) {
            let table_rank = table_rank(table);

            for tr in table.select(&ROW) {
                let mut row_rank = None;
                let mut cells: Vec<String> = Vec::with_capacity(5);
                for td in tr.select(&CELL) {
                    let text = text_of(td);
                    // A cell that is nothing but a rank marker overrides the table's tier.
                    if let Some(r) = exact_rank_marker(&text) {
                        row_rank = Some(r);
                    } else {
                        cells.push(text);
                    }
                }
                // Leading ordinal column ("1", "2", …) is not part of the listing.
                // With only three cells a digit-only first cell is the store name.
                if cells.len() > 3 && is_ordinal(&cells[0]) {
                    cells.remove(0);
                }
                if cells.len() < 3 {
                    continue; // header rows, spacer rows, "no data" rows
                }
                let Some(rank) = row_rank.or(table_rank) else {
                    out.undetermined_rank += 1;
                    continue;
                };
                let mut cells = cells.into_iter();
                out.listings.push(Listing {
                    name: cells.next().unwrap_or_default(),
                    choice_type: cells.next().unwrap_or_default(),
                    address: cells.next().unwrap_or_default(),
                    rank,
                });
            }
        }
        out
    }
}

/// Tier of a whole table: caption / header cells first, then a heading just above it.
fn table_rank(table: ElementRef<'_>) -> Option<Rank> {
    let head: Vec<String> = table.select(&TABLE_HEAD).map(text_of).collect();
    rank_in(&head.join(" ")).or_else(|| heading_rank(table))
}

/// Look for a tier heading right before `el`, or before one of its two nearest
/// wrappers (`<h4>1등 배출점</h4><div class="wrap"><table>…`).
fn heading_rank(el: ElementRef<'_>) -> Option<Rank> {
    let mut cur = Some(el);
    for _ in 0..3 {
        let node = cur?;
        if let Some(prev) = prev_element_sibling(node) {
            let text = text_of(prev);
            if is_heading(prev, &text) {
                if let Some(r) = rank_in(&text) {
                    return Some(r);
                }
            }
        }
        cur = parent_element(node);
    }
    None
}

// Headings proper, or any short label; long blocks (a previous table) don't name tiers.
fn is_heading(el: ElementRef<'_>, text: &str) -> bool {
    const SHORT_LABEL_CHARS: usize = 30;
    let tag = el.value().name();
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6") || text.chars().count() <= SHORT_LABEL_CHARS
}

fn is_ordinal(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}

/* ---------------- cards ---------------- */

impl ListingStrategy for Cards {
    fn name(&self) -> &'static str { "cards" }

    fn extract(&self, doc: &Html) -> Extracted {
        let mut out = Extracted::default();

        for li in doc.select(&CARD) {
            let mut card_rank = None;
            let mut lines = Vec::new();
            for line in text_lines(li) {
                match exact_rank_marker(&line) {
                    Some(r) => card_rank = Some(r),
                    None => lines.push(line),
                }
            }
            let Some(name) = lines.first().cloned() else {
                continue; // empty card
            };
            let rank = card_rank.or_else(|| parent_element(li).and_then(heading_rank));
            let Some(rank) = rank else {
                out.undetermined_rank += 1;
                continue;
            };
            let choice_at = lines.iter().position(|l| CHOICE_TOKENS.iter().any(|t| l.contains(t)));
            let choice_type = choice_at.map(|i| lines[i].clone()).unwrap_or_default();
            // "자동" contains the "동" address token; the choice line is never the address.
            let address = lines
                .iter()
                .enumerate()
                .rev()
                .find(|&(i, l)| Some(i) != choice_at && ADDRESS_TOKENS.iter().any(|t| l.contains(t)))
                .map(|(_, l)| l.clone())
                .unwrap_or_default();

            out.listings.push(Listing { name, choice_type, address, rank });
        }
        out
    }
}

/* ---------------- rank markers ---------------- */

/// Ranks mentioned in `text`: "1등", "1 등", "1st", "2등", "2nd".
/// A digit preceded by another digit ("11등") doesn't count.
fn rank_mentions(text: &str) -> (bool, bool) {
    let chars: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    let (mut first, mut second) = (false, false);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && chars[i - 1].is_ascii_digit() {
            continue;
        }
        let rest = &chars[i + 1..];
        let suffix_ok = |suffix: &[char]| rest.starts_with(&['등'][..]) || rest.starts_with(suffix);
        match c {
            '1' if suffix_ok(&['s', 't'][..]) => first = true,
            '2' if suffix_ok(&['n', 'd'][..]) => second = true,
            _ => {}
        }
    }
    (first, second)
}

/// Rank named by free text (headings, captions). Text naming both tiers is ambiguous.
pub fn rank_in(text: &str) -> Option<Rank> {
    match rank_mentions(text) {
        (true, false) => Some(Rank::First),
        (false, true) => Some(Rank::Second),
        _ => None,
    }
}

/// Rank when `text` is *only* a marker. Store names like "1등복권방" don't qualify.
pub fn exact_rank_marker(text: &str) -> Option<Rank> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    match compact.as_str() {
        "1등" | "1st" => Some(Rank::First),
        "2등" | "2nd" => Some(Rank::Second),
        _ => None,
    }
}

/* ---------------- helpers ---------------- */

/// Drop exact repeats, keeping first-seen order.
fn dedup(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::with_capacity(listings.len());
    listings.into_iter().filter(|l| seen.insert(l.clone())).collect()
}
