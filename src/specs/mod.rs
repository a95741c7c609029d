//! # Page-knowledge (`specs`) module
//!
//! Page-specific knowledge of the lottery operator's site: *where the ground
//! truth lives* in each response and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure parsing** of remote documents (`parse_doc`), testable offline
//!   against inline fixtures.
//! - **Layout precedence**: the listing page is read by an ordered set of
//!   independent strategies (tables before cards); the first one that yields
//!   anything wins.
//! - A thin `fetch` per endpoint that pairs the URL with the right timeout.
//!
//! ## What does **not** live here
//! - **Which draws to fetch**, retries, or skip-and-warn policy: `scrape` and
//!   `runner` own that.
//! - **Persistence** of any kind: the ledger lives in `store`.
//! - **Store matching**: `index` and `reconcile`.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect_draws → scrape::fetch_draw → specs::winners::fetch / parse_doc
//!                                                    ↘  specs::draw_info::fetch (date)
//!        → store::Ledger::merge / save
//! ```
//!
//! ## Conventions & invariants
//! - Tag and class matching goes through `scraper` selectors; text cleanup
//!   through `core::html` / `core::sanitize`.
//! - Parsers never fail on odd markup: they return fewer (possibly zero)
//!   records and say why through counters.
//! - Rank is read off the page or the record is dropped; never defaulted.
pub mod draw_info;
pub mod winners;
