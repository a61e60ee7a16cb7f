//! In-memory element registry.
//!
//! The registry plays the role of the page: a fixed set of elements,
//! each with an identifier, an optional human-readable label, and the
//! two writable properties (class and content).

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::Serialize;

use super::DisplaySurface;

/// A single display element.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Element {
    /// Human-readable label shown next to the element, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Group heading this element is displayed under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Current display class (written by the updater).
    pub class: String,
    /// Current content (written by the updater).
    pub content: String,
}

/// A registry of display elements, keyed by identifier.
///
/// Elements are seeded up front from the page definition; the updater can
/// only write to elements that already exist.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: BTreeMap<String, Element>,
}

impl ElementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry containing blank elements with the given ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for id in ids {
            registry.register(id.into(), None, None);
        }
        registry
    }

    /// Add an element to the registry.
    pub fn register(&mut self, id: String, label: Option<String>, group: Option<String>) {
        self.elements.insert(
            id,
            Element {
                label,
                group,
                ..Element::default()
            },
        );
    }

    /// Look up an element by identifier.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Iterate over all elements in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Element)> {
        self.elements.iter()
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the registry has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the registry state as a JSON object keyed by element id.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.elements).unwrap_or(serde_json::Value::Null)
    }
}

impl DisplaySurface for ElementRegistry {
    fn update_element(&mut self, id: &str, class: &str, content: &str) -> Result<()> {
        let Some(element) = self.elements.get_mut(id) else {
            bail!("no element with id '{}'", id);
        };
        element.class = class.to_string();
        element.content = content.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_from_ids() {
        let registry = ElementRegistry::from_ids(["a", "b"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("a").is_some());
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_update_existing_element() {
        let mut registry = ElementRegistry::from_ids(["temp_elem"]);
        registry.update_element("temp_elem", "ok", "42").unwrap();

        let element = registry.get("temp_elem").unwrap();
        assert_eq!(element.class, "ok");
        assert_eq!(element.content, "42");
    }

    #[test]
    fn test_update_missing_element_fails() {
        let mut registry = ElementRegistry::from_ids(["temp_elem"]);
        let result = registry.update_element("other_elem", "ok", "42");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("other_elem"));

        // Existing element untouched
        let element = registry.get("temp_elem").unwrap();
        assert_eq!(element.class, "");
        assert_eq!(element.content, "");
    }

    #[test]
    fn test_update_overwrites_previous_state() {
        let mut registry = ElementRegistry::from_ids(["e"]);
        registry.update_element("e", "label label-success", "RUNNING").unwrap();
        registry.update_element("e", "", "").unwrap();

        let element = registry.get("e").unwrap();
        assert_eq!(element.class, "");
        assert_eq!(element.content, "");
    }

    #[test]
    fn test_to_json_contains_element_state() {
        let mut registry = ElementRegistry::from_ids(["temp_elem"]);
        registry.update_element("temp_elem", "ok", "42").unwrap();

        let json = registry.to_json();
        assert_eq!(json["temp_elem"]["class"], "ok");
        assert_eq!(json["temp_elem"]["content"], "42");
    }
}
