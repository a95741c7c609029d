// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod data;
pub mod estimate;
pub mod file;
pub mod index;
pub mod progress;
pub mod reconcile;
pub mod runner;
pub mod scoring;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod log;

pub use error::{Error, Result};
