// src/error.rs
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status { url: String, status: u16 },

    /// One draw could not be fetched. The runner skips it and the draw stays missing.
    #[error("draw {draw}: fetch failed: {source}")]
    Fetch {
        draw: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rank {0}, expected 1 or 2")]
    InvalidRank(u8),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("could not launch scoring collaborator {program}: {source}")]
    ScoringSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("scoring collaborator failed: {status}")]
    Scoring { status: ExitStatus },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub fn fetch(draw: u32, source: Error) -> Self {
        Error::Fetch { draw, source: Box::new(source) }
    }
}
