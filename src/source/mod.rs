//! Status source abstraction for fetching status documents.
//!
//! This module provides a trait-based abstraction for fetching status
//! documents from various backends (HTTP endpoints, files). The poller
//! drives the cadence; sources only know how to perform one fetch.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;

use crate::data::StatusDocument;

/// Trait for fetching status documents.
///
/// Implementations perform a single fetch per call. A fetch fails on
/// transport errors (unreachable endpoint, non-success HTTP status) and on
/// decode errors (body not a valid status document); the two are treated
/// identically by callers — logged, cycle skipped, never retried here.
#[async_trait]
pub trait StatusSource: Send + Sync + Debug {
    /// Fetch the current status document.
    async fn fetch(&self) -> Result<StatusDocument>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
