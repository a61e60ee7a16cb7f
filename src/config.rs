//! Page definition loading.
//!
//! The page definition is the analog of the HTML page the original script
//! ran against: it declares which display elements exist (by identifier),
//! and may carry default connection settings. Loaded via the `config`
//! crate, so TOML/JSON/YAML all work by file extension.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::display::ElementRegistry;

/// One declared display element.
#[derive(Debug, Clone, Deserialize)]
pub struct PageElement {
    /// Element identifier; item keys in the status document match on this.
    pub id: String,
    /// Human-readable label shown next to the element.
    #[serde(default)]
    pub label: Option<String>,
    /// Group heading the element is displayed under.
    #[serde(default)]
    pub group: Option<String>,
}

/// A page definition: the declared elements plus optional defaults.
///
/// # Example (TOML)
///
/// ```toml
/// url = "http://shelf01:9090/jsonupdate"
/// interval_ms = 1000
///
/// [[elements]]
/// id = "temp_elem"
/// label = "Board temperature"
/// group = "AMC1"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    /// Default endpoint URL; overridden by `--url`.
    #[serde(default)]
    pub url: Option<String>,
    /// Default polling interval in milliseconds; overridden by `--interval-ms`.
    #[serde(default)]
    pub interval_ms: Option<u64>,
    /// The display elements that exist on this page.
    #[serde(default)]
    pub elements: Vec<PageElement>,
}

impl PageConfig {
    /// Load a page definition from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .with_context(|| format!("loading page definition {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("parsing page definition {}", path.display()))
    }

    /// Build the element registry declared by this page.
    pub fn build_registry(&self) -> ElementRegistry {
        let mut registry = ElementRegistry::new();
        for element in &self.elements {
            registry.register(
                element.id.clone(),
                element.label.clone(),
                element.group.clone(),
            );
        }
        registry
    }
}
