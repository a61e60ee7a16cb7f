//! Applying a status document to a display surface.

use tracing::error;

use super::DisplaySurface;
use crate::data::StatusDocument;

/// A failed per-item update.
#[derive(Debug, Clone)]
pub struct ApplyFailure {
    /// Group key the item belonged to.
    pub group: String,
    /// Item key that failed to apply.
    pub item: String,
    /// Why the update failed.
    pub reason: String,
}

/// Outcome of applying one status document.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Number of elements successfully updated.
    pub updated: usize,
    /// Per-item failures, in iteration order.
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    /// Whether every item applied cleanly.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply a status document to a display surface.
///
/// For every group, for every item in that group's monitor set, writes the
/// item's class and content to the element whose identifier equals the item
/// key. Items are fully isolated: a failed lookup is logged, recorded in the
/// report, and iteration continues with the next item. Nothing is ever
/// rethrown from here.
pub fn apply_document(surface: &mut dyn DisplaySurface, document: &StatusDocument) -> ApplyReport {
    let mut report = ApplyReport::default();

    for (group, monitor_set) in document {
        for (item, value) in monitor_set {
            match surface.update_element(item, value.class_text(), &value.content_text()) {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    error!("update failed for {}/{}: {}", group, item, e);
                    report.failures.push(ApplyFailure {
                        group: group.clone(),
                        item: item.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    report
}
