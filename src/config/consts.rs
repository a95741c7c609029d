// src/config/consts.rs

// Net config
pub const HOST: &str = "https://www.dhlottery.co.kr";
pub const LISTING_PATH: &str = "/store.do?method=topStore&pageGubun=L645&drwNo=";
pub const DRAW_INFO_PATH: &str = "/common.do?method=getLottoNumber&drwNo=";
pub const USER_AGENT: &str = concat!("lottang_scrape/", env!("CARGO_PKG_VERSION"));
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DRAW_INFO_TIMEOUT_SECS: u64 = 10;
pub const LISTING_TIMEOUT_SECS: u64 = 20;

// Draw cadence
pub const DRAW_CADENCE_DAYS: i64 = 7;
pub const MAX_FORWARD_PROBES: u32 = 104; // two years of weekly draws

// Scrape
pub const REQUEST_PAUSE_MS: u64 = 600; // be polite
pub const CARD_SELECTOR: &str = "ul.list_map > li";
pub const CHOICE_TOKENS: &[&str] = &["반자동", "자동", "수동"];
pub const ADDRESS_TOKENS: &[&str] = &["구 ", "동", "로", "길"];

// Matching
pub const KEY_SEP: &str = "|";
pub const GENERIC_DESCRIPTOR: &str = "편의점";

// Layout under the repository root
pub const DATA_DIR: &str = "data";
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const LEDGER_FILE: &str = "dhlottery_stores.csv";
pub const WINS_FILE: &str = "wins.csv";
pub const UNMATCHED_FILE: &str = "wins_unmatched.csv";
pub const REFERENCE_FILE: &str = "stores_clean.geojson";
pub const SCORED_FILE: &str = "stores_clean.a3.geojson";
pub const SUMMARY_FILE: &str = "scores_a3_summary.csv";

// Scoring collaborator
pub const SCORER_PROGRAM: &str = "python3";
pub const SCORER_SCRIPT: &str = "scripts/compute_a3_scores.py";
