//! Read-only component lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::{Category, Component};
use crate::error::{PcForgeError, Result};
use crate::ids::ComponentId;

/// Supplies components to build workflows.
///
/// The pricer never talks to a provider directly; callers resolve component
/// ids here and hand the resulting values to the pricer.
pub trait CatalogProvider {
    /// Components of one category, in catalog order.
    fn components(&self, category: Category) -> Vec<&Component>;

    /// Look up a component by id.
    fn find(&self, id: &ComponentId) -> Option<&Component>;

    /// Look up a component by id, failing if it is missing.
    fn require(&self, id: &ComponentId) -> Result<&Component> {
        self.find(id)
            .ok_or_else(|| PcForgeError::ComponentNotFound(id.to_string()))
    }
}

/// On-disk catalog layout: a flat list of components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    components: Vec<Component>,
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<Component>,
    index: HashMap<ComponentId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_components(components: Vec<Component>) -> Result<Self> {
        let mut index = HashMap::with_capacity(components.len());
        for (position, component) in components.iter().enumerate() {
            if index.insert(component.id.clone(), position).is_some() {
                return Err(PcForgeError::DuplicateComponent(component.id.to_string()));
            }
        }
        Ok(Self { components, index })
    }

    /// Parse a TOML catalog (`[[components]]` tables).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_components(file.components)
    }

    /// Parse a JSON catalog (`{"components": [...]}`).
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_components(file.components)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All components in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }
}

impl CatalogProvider for Catalog {
    fn components(&self, category: Category) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.category() == category)
            .collect()
    }

    fn find(&self, id: &ComponentId) -> Option<&Component> {
        self.index.get(id).map(|&i| &self.components[i])
    }
}
