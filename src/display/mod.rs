//! Display surface abstraction for applying status documents.
//!
//! This module provides a trait-based abstraction for the page being
//! updated. The original monitor wrote into a browser DOM; here the same
//! contract is expressed over a registry of named display elements.

mod apply;
mod registry;

pub use apply::{apply_document, ApplyFailure, ApplyReport};
pub use registry::{Element, ElementRegistry};

use anyhow::Result;

/// Trait for a surface of named display elements.
///
/// Implementations hold a fixed set of elements (the analog of a
/// pre-existing page). The updater only ever writes two properties per
/// element; it never creates, removes, or reorders elements.
///
/// # Example
///
/// ```
/// use shelfwatch::{DisplaySurface, ElementRegistry};
///
/// let mut surface = ElementRegistry::from_ids(["temp_elem"]);
/// surface.update_element("temp_elem", "ok", "42").unwrap();
/// assert!(surface.update_element("no_such_elem", "ok", "42").is_err());
/// ```
pub trait DisplaySurface {
    /// Write the display class and content of the element with the given
    /// identifier.
    ///
    /// Returns an error when no element with that identifier exists.
    fn update_element(&mut self, id: &str, class: &str, content: &str) -> Result<()>;
}
