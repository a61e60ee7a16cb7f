//! Data model for shelf monitor status documents.

mod document;

pub use document::{Content, MonitorSet, MonitorValue, StatusDocument};
