// src/core/net.rs
// Blocking HTTP GET with fixed short timeouts. A single attempt per call;
// retry policy belongs to the caller (here: the next scheduled run).

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{CONNECT_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

pub fn client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// GET `url` and return the body decoded per the response charset.
/// Non-2xx statuses are errors.
pub fn http_get(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    let resp = client.get(url).timeout(timeout).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status { url: s!(url), status: status.as_u16() });
    }
    Ok(resp.text()?)
}
