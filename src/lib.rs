// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # shelfwatch
//!
//! A terminal viewer that polls a DAQ shelf monitor status endpoint and
//! applies the returned values to a page of named display elements.
//!
//! The monitor endpoint serves a JSON document mapping hardware module
//! identifiers (e.g. `"AMC1"`) to monitor sets, each mapping a display
//! element identifier to a class and a value. Every cycle, each item is
//! written into the element whose identifier matches its key; items with
//! no matching element are logged and skipped without affecting the rest.
//!
//! ## Architecture
//!
//! - **[`data`]**: The wire format — [`StatusDocument`], [`MonitorSet`],
//!   and [`MonitorValue`]
//! - **[`source`]**: Fetch abstraction ([`StatusSource`] trait) with HTTP
//!   and file implementations
//! - **[`poll`]**: The repeating scheduler — at most one outstanding fetch,
//!   first fetch after one full interval, caller-owned stop handle
//! - **[`display`]**: The page — [`DisplaySurface`] trait, the
//!   [`ElementRegistry`] implementation, and [`apply_document`]
//! - **[`app`]** / **[`ui`]**: Application state and terminal rendering
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll a shelf monitor endpoint
//! shelfwatch --url http://shelf01:9090/jsonupdate --page page.toml
//!
//! # Replay a saved status document
//! shelfwatch --file status.json --page page.toml
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::time::Duration;
//! use shelfwatch::{apply_document, ElementRegistry, HttpSource, Poller, PollUpdate};
//!
//! # tokio_test::block_on(async {
//! let source = Box::new(HttpSource::new("http://shelf01:9090/jsonupdate").unwrap());
//! let (handle, mut updates) = Poller::spawn(source, Duration::from_millis(1000));
//!
//! let mut page = ElementRegistry::from_ids(["temp_elem"]);
//! if let Some(PollUpdate::Document { document, .. }) = updates.recv().await {
//!     let report = apply_document(&mut page, &document);
//!     println!("updated {} elements", report.updated);
//! }
//!
//! handle.stop();
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod display;
pub mod events;
pub mod poll;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{PageConfig, PageElement};
pub use data::{Content, MonitorSet, MonitorValue, StatusDocument};
pub use display::{apply_document, ApplyFailure, ApplyReport, DisplaySurface, Element, ElementRegistry};
pub use poll::{PollUpdate, Poller, PollerHandle};
pub use source::{FileSource, HttpSource, StatusSource};
pub use ui::{count_classes, ClassCounts, ClassKind, Theme};
