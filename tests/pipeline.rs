// tests/pipeline.rs
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;

use lottang_scrape::config::options::{Anchor, RunOptions};
use lottang_scrape::data::{DrawRecord, Event, Rank};
use lottang_scrape::file;
use lottang_scrape::progress::NullProgress;
use lottang_scrape::runner::run;
use lottang_scrape::scrape::DrawSource;
use lottang_scrape::store::Ledger;
use lottang_scrape::{Error, Result};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Draws 100..=102 exist. Draw 101's listing fails until `heal()` is called.
struct FakeSite {
    pages: HashMap<u32, String>,
    flaky_ok: Cell<bool>,
}

impl FakeSite {
    fn new() -> Self {
        let mut pages = HashMap::new();
        pages.insert(
            100,
            table_page(&[("행복 점", "자동", "서울 강남구 1길")], &[("모름", "수동", "어딘가 1번지")]),
        );
        pages.insert(
            101,
            table_page(&[("로또 명당", "반자동", "부산 해운대구 우동")], &[]),
        );
        pages.insert(
            102,
            String::from(
                r#"<ul class="list_map">
                     <li><p>1등</p><p>행복점</p><p>수동</p><p>서울 강남구 1길</p></li>
                     <li><p>2등</p><p>GS25 편의점 역삼</p><p>자동</p><p>서울 강남구 역삼동</p></li>
                   </ul>"#,
            ),
        );
        Self { pages, flaky_ok: Cell::new(false) }
    }

    fn heal(&self) {
        self.flaky_ok.set(true);
    }
}

fn table_page(first: &[(&str, &str, &str)], second: &[(&str, &str, &str)]) -> String {
    let rows = |list: &[(&str, &str, &str)]| {
        list.iter()
            .map(|(n, c, a)| format!("<tr><td>{n}</td><td>{c}</td><td>{a}</td></tr>"))
            .collect::<String>()
    };
    format!(
        "<html><body>\
         <table><caption>1등 배출점</caption>{}</table>\
         <table><caption>2등 배출점</caption>{}</table>\
         </body></html>",
        rows(first),
        rows(second)
    )
}

impl DrawSource for FakeSite {
    fn draw_date(&self, draw: u32) -> Result<Option<NaiveDate>> {
        Ok(match draw {
            100..=102 => date(2024, 1, 6).checked_add_days(chrono::Days::new(u64::from(draw - 100) * 7)),
            _ => None,
        })
    }

    fn listing_html(&self, draw: u32) -> Result<String> {
        if draw == 101 && !self.flaky_ok.get() {
            return Err(Error::Status { url: format!("listing {draw}"), status: 503 });
        }
        self.pages
            .get(&draw)
            .cloned()
            .ok_or(Error::Status { url: format!("listing {draw}"), status: 404 })
    }
}

fn options(root: &Path) -> RunOptions {
    let anchor = Anchor { draw: 100, date: date(2024, 1, 6) };
    let mut opts = RunOptions::new(root, anchor, date(2024, 1, 8));
    opts.request_pause = Duration::ZERO;
    opts.scoring = false;
    opts
}

fn seed_ledger(root: &Path) {
    let rows = vec![DrawRecord {
        draw: 100,
        draw_date: String::from("2024-01-06"),
        rank: Rank::First,
        name: String::from("행복 점"),
        choice_type: String::from("자동"),
        address: String::from("서울 강남구 1길"),
    }];
    Ledger::from_rows(rows).save(&options(root).paths().ledger).unwrap();
}

fn write_reference(root: &Path) {
    let geo = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","geometry":null,"properties":{"store_id":"S1","name":"행복점","address":"서울강남구1길"}},
        {"type":"Feature","geometry":null,"properties":{"store_id":"S2","name":"로또명당","address":"부산 해운대구 우동"}},
        {"type":"Feature","geometry":null,"properties":{"store_id":"S7","name":"GS25역삼","address":"서울 강남구 역삼동"}}
    ]}"#;
    let paths = options(root).paths();
    fs::create_dir_all(&paths.data_dir).unwrap();
    fs::write(paths.reference, geo).unwrap();
}

#[test]
fn probing_finds_draws_past_the_weekly_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::new();
    site.heal();
    // weekly estimate is 100 two days after the anchor; the site already has 102
    let summary = run(&options(dir.path()), &site, None).unwrap();
    assert_eq!(summary.latest_draw, 102);
    // empty ledger: only the latest draw is fetched
    assert_eq!(summary.fetched, vec![102]);
    assert_eq!(summary.rows_added, 2);

    let mut opts = options(dir.path());
    opts.probe = false;
    let summary = run(&opts, &site, None).unwrap();
    assert_eq!(summary.latest_draw, 100);
}

#[test]
fn failed_draw_is_retried_next_run_and_caught_up_run_leaves_ledger_alone() {
    let dir = tempfile::tempdir().unwrap();
    seed_ledger(dir.path());
    let ledger_path = options(dir.path()).paths().ledger;
    let site = FakeSite::new();

    let first = run(&options(dir.path()), &site, None).unwrap();
    assert_eq!(first.latest_draw, 102);
    assert_eq!(first.failed, vec![101]);
    assert_eq!(first.fetched, vec![102]);
    assert_eq!(first.rows_added, 2);
    assert!(first.ledger_written);
    let draws = Ledger::load(&ledger_path).unwrap().present_draws();
    assert_eq!(draws.into_iter().collect::<Vec<_>>(), vec![100, 102]);

    site.heal();
    let second = run(&options(dir.path()), &site, None).unwrap();
    assert_eq!(second.fetched, vec![101]);
    assert!(second.failed.is_empty());
    assert_eq!(second.rows_added, 1);
    assert_eq!(second.ledger_rows, 4);

    let before = fs::read(&ledger_path).unwrap();
    let third = run(&options(dir.path()), &site, None).unwrap();
    assert!(third.fetched.is_empty());
    assert_eq!(third.rows_added, 0);
    assert!(!third.ledger_written);
    assert_eq!(fs::read(&ledger_path).unwrap(), before);
}

#[test]
fn present_draw_is_never_refetched_even_if_partial() {
    let dir = tempfile::tempdir().unwrap();
    // draw 100 on file has only its 1st-rank row; the page also has a 2nd-rank row
    seed_ledger(dir.path());
    let site = FakeSite::new();
    site.heal();
    run(&options(dir.path()), &site, None).unwrap();
    let ledger = Ledger::load(&options(dir.path()).paths().ledger).unwrap();
    let draw_100: Vec<&DrawRecord> = ledger.rows().iter().filter(|r| r.draw == 100).collect();
    assert_eq!(draw_100.len(), 1);
}

#[test]
fn missing_reference_skips_matching() {
    let dir = tempfile::tempdir().unwrap();
    let site = FakeSite::new();
    site.heal();
    let summary = run(&options(dir.path()), &site, Some(&mut NullProgress)).unwrap();
    assert_eq!(summary.matched, None);
    assert_eq!(summary.unmatched, None);
    assert!(!summary.scored);
    let paths = options(dir.path()).paths();
    assert!(paths.ledger.exists());
    assert!(!paths.wins.exists());
    assert!(!paths.unmatched.exists());
}

#[test]
fn reconciliation_partitions_the_whole_ledger() {
    let dir = tempfile::tempdir().unwrap();
    seed_ledger(dir.path());
    write_reference(dir.path());
    let site = FakeSite::new();
    site.heal();

    let summary = run(&options(dir.path()), &site, None).unwrap();
    let paths = options(dir.path()).paths();
    let ledger = Ledger::load(&paths.ledger).unwrap();
    let wins: Vec<Event> = file::read_csv(&paths.wins).unwrap();
    let unmatched: Vec<Event> = file::read_csv(&paths.unmatched).unwrap();

    assert_eq!(wins.len() + unmatched.len(), ledger.len());
    assert_eq!(summary.matched, Some(wins.len()));
    assert_eq!(summary.unmatched, Some(unmatched.len()));
    assert!(unmatched.is_empty());

    let got: Vec<(u32, &str)> = wins.iter().map(|e| (e.draw_no, e.store_id.as_str())).collect();
    assert_eq!(got, vec![(100, "S1"), (101, "S2"), (102, "S1"), (102, "S7")]);
    assert_eq!(wins[3].rank, Rank::Second);
    assert_eq!(wins[3].date, "2024-01-20");
}

#[cfg(unix)]
#[test]
fn scorer_failure_aborts_after_files_are_written() {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path());
    let site = FakeSite::new();
    site.heal();

    let mut opts = options(dir.path());
    opts.scoring = true;
    opts.scorer_program = "false".into();
    let err = run(&opts, &site, None).unwrap_err();
    assert!(matches!(err, Error::Scoring { .. }));
    assert!(opts.paths().wins.exists());

    opts.scorer_program = "true".into();
    assert!(run(&opts, &site, None).unwrap().scored);
}
