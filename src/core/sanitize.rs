// src/core/sanitize.rs

use crate::config::consts::{GENERIC_DESCRIPTOR, KEY_SEP};

/// Collapse runs of whitespace into a single space and trim.
/// Display cleanup for scraped text; not the matching key.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Matching-key normalization for store names and addresses.
///
/// Drops *every* whitespace character (not just runs) and strips the
/// over-general "편의점" descriptor. Stripping repeats until none is left,
/// so the result is a fixed point: `normalize_key(normalize_key(x)) == normalize_key(x)`.
pub fn normalize_key(s: &str) -> String {
    let mut out: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    while out.contains(GENERIC_DESCRIPTOR) {
        out = out.replace(GENERIC_DESCRIPTOR, "");
    }
    out
}

/// Join key shared by the store index and the reconciler.
pub fn match_key(name: &str, address: &str) -> String {
    join!(normalize_key(name), KEY_SEP, &normalize_key(address))
}
