//! One component per category slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{CatalogProvider, Category, Component};
use crate::error::{PcForgeError, Result};
use crate::ids::ComponentId;

/// A chosen set of components, at most one per category.
///
/// Slots are keyed by the closed [`Category`] enum, and a component always
/// sits in the slot of its own category. Serialized as a list of
/// `{"type": <category>, "component": {...}}` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SlotEntry>", into = "Vec<SlotEntry>")]
pub struct BuildSelection {
    slots: BTreeMap<Category, Component>,
}

/// Serialized form of one filled slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotEntry {
    #[serde(rename = "type")]
    pub slot: String,
    pub component: Component,
}

impl BuildSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from `(category key, component)` pairs.
    ///
    /// Fails on unknown keys, on a component placed under another category's
    /// key, and on a key given twice.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Component)>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for (key, component) in entries {
            let slot: Category = key.as_ref().parse()?;
            if component.category() != slot {
                return Err(PcForgeError::CategoryMismatch {
                    component: component.id.to_string(),
                    slot,
                    actual: component.category(),
                });
            }
            if selection.select(component).is_some() {
                return Err(PcForgeError::DuplicateSlot(slot));
            }
        }
        Ok(selection)
    }

    /// Resolve catalog ids into a selection.
    ///
    /// Two ids of the same category are rejected rather than letting the
    /// later one silently win.
    pub fn from_catalog<P>(catalog: &P, ids: &[ComponentId]) -> Result<Self>
    where
        P: CatalogProvider + ?Sized,
    {
        let mut selection = Self::new();
        for id in ids {
            let component = catalog.require(id)?.clone();
            let category = component.category();
            if selection.select(component).is_some() {
                return Err(PcForgeError::DuplicateSlot(category));
            }
        }
        Ok(selection)
    }

    /// Put a component into its category slot, returning the one it replaced.
    pub fn select(&mut self, component: Component) -> Option<Component> {
        self.slots.insert(component.category(), component)
    }

    /// Empty a slot.
    pub fn remove(&mut self, category: Category) -> Option<Component> {
        self.slots.remove(&category)
    }

    pub fn get(&self, category: Category) -> Option<&Component> {
        self.slots.get(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    /// Filled slots in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Component)> {
        self.slots.iter().map(|(category, component)| (*category, component))
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Unfilled categories, in category order.
    pub fn missing(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|c| !self.contains(*c))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.len() == Category::ALL.len()
    }

    /// Fail with the missing categories unless every slot is filled.
    pub fn ensure_complete(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PcForgeError::IncompleteBuild { missing })
        }
    }
}

impl TryFrom<Vec<SlotEntry>> for BuildSelection {
    type Error = PcForgeError;

    fn try_from(entries: Vec<SlotEntry>) -> Result<Self> {
        Self::from_entries(entries.into_iter().map(|e| (e.slot, e.component)))
    }
}

impl From<BuildSelection> for Vec<SlotEntry> {
    fn from(selection: BuildSelection) -> Self {
        selection
            .slots
            .into_iter()
            .map(|(category, component)| SlotEntry {
                slot: category.as_str().to_string(),
                component,
            })
            .collect()
    }
}

impl FromIterator<Component> for BuildSelection {
    /// Later components replace earlier ones of the same category.
    fn from_iter<T: IntoIterator<Item = Component>>(iter: T) -> Self {
        let mut selection = Self::new();
        for component in iter {
            selection.select(component);
        }
        selection
    }
}
