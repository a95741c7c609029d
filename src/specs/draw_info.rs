//! Page knowledge for the draw metadata endpoint
//! (`common.do?method=getLottoNumber&drwNo=N`).
//!
//! The endpoint answers with JSON for any draw number. Drawn draws carry
//! `"returnValue":"success"` and a `drwNoDate` of `YYYY-MM-DD`; future draws
//! come back as `"returnValue":"fail"` with no date. The same lookup serves
//! two callers: date enrichment of fetched listings, and existence probing
//! in the draw estimator.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::consts::{DRAW_INFO_PATH, DRAW_INFO_TIMEOUT_SECS, HOST};
use crate::core::net;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct DrawInfoDoc {
    #[serde(rename = "returnValue", default)]
    return_value: Option<String>,
    #[serde(rename = "drwNoDate", default)]
    draw_date: Option<String>,
}

pub fn url(draw: u32) -> String {
    format!("{HOST}{DRAW_INFO_PATH}{draw}")
}

pub fn fetch(client: &Client, draw: u32) -> Result<Option<NaiveDate>> {
    let body = net::http_get(client, &url(draw), Duration::from_secs(DRAW_INFO_TIMEOUT_SECS))?;
    parse_doc(&body)
}

/// `Ok(None)` when the draw has no valid date (not drawn yet).
/// Malformed JSON is an error.
pub fn parse_doc(body: &str) -> Result<Option<NaiveDate>> {
    let doc: DrawInfoDoc = serde_json::from_str(body.trim())?;
    if doc.return_value.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("fail")) {
        return Ok(None);
    }
    Ok(doc
        .draw_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()))
}
