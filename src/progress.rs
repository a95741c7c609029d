// src/progress.rs
/// Lightweight progress reporting for the per-draw scrape loop.
/// Front-ends implement this to surface status to users; the library
/// logs through `tracing` regardless.
pub trait Progress {
    /// Called at the start with the number of draws to fetch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One draw fetched and parsed (`rows` may be zero).
    fn item_done(&mut self, _draw: u32, _rows: usize) {}

    /// One draw skipped after a fetch failure.
    fn item_failed(&mut self, _draw: u32, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
