//! Purchasable components and their compatibility attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::Category;
use crate::ids::ComponentId;

/// Category-specific compatibility attributes.
///
/// The variant decides the component's category, so a component can only
/// carry the attributes its category defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ComponentSpec {
    Cpu {
        socket: String,
    },
    Motherboard {
        socket: String,
        ram_type: String,
    },
    Ram {
        memory_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        capacity_gb: Option<u32>,
    },
    Gpu {
        /// Power draw in watts.
        power: u32,
    },
    Storage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        capacity_gb: Option<u32>,
    },
    Psu {
        /// Rated output in watts.
        power: u32,
    },
    Cooler {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default)]
        supported_sockets: BTreeSet<String>,
    },
    Case,
}

impl ComponentSpec {
    pub fn cpu(socket: impl Into<String>) -> Self {
        ComponentSpec::Cpu {
            socket: socket.into(),
        }
    }

    pub fn motherboard(socket: impl Into<String>, ram_type: impl Into<String>) -> Self {
        ComponentSpec::Motherboard {
            socket: socket.into(),
            ram_type: ram_type.into(),
        }
    }

    pub fn ram(memory_type: impl Into<String>) -> Self {
        ComponentSpec::Ram {
            memory_type: memory_type.into(),
            capacity_gb: None,
        }
    }

    pub fn gpu(power: u32) -> Self {
        ComponentSpec::Gpu { power }
    }

    pub fn storage() -> Self {
        ComponentSpec::Storage {
            kind: None,
            capacity_gb: None,
        }
    }

    pub fn psu(power: u32) -> Self {
        ComponentSpec::Psu { power }
    }

    pub fn cooler<I, S>(supported_sockets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ComponentSpec::Cooler {
            kind: None,
            supported_sockets: supported_sockets.into_iter().map(Into::into).collect(),
        }
    }

    /// The category this spec belongs to.
    pub fn category(&self) -> Category {
        match self {
            ComponentSpec::Cpu { .. } => Category::Cpu,
            ComponentSpec::Motherboard { .. } => Category::Motherboard,
            ComponentSpec::Ram { .. } => Category::Ram,
            ComponentSpec::Gpu { .. } => Category::Gpu,
            ComponentSpec::Storage { .. } => Category::Storage,
            ComponentSpec::Psu { .. } => Category::Psu,
            ComponentSpec::Cooler { .. } => Category::Cooler,
            ComponentSpec::Case => Category::Case,
        }
    }
}

/// A purchasable part.
///
/// Builds hold components by value, so a later catalog price change does not
/// reach into builds that were already priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Identifier, unique within the catalog.
    pub id: ComponentId,
    /// Display name.
    pub name: String,
    /// Unit price in the smallest currency unit.
    pub price: u64,
    /// Category and compatibility attributes.
    #[serde(flatten)]
    pub spec: ComponentSpec,
}

impl Component {
    pub fn new(
        id: impl Into<ComponentId>,
        name: impl Into<String>,
        price: u64,
        spec: ComponentSpec,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            spec,
        }
    }

    pub fn category(&self) -> Category {
        self.spec.category()
    }

    /// Socket for CPUs and motherboards.
    pub fn socket(&self) -> Option<&str> {
        match &self.spec {
            ComponentSpec::Cpu { socket } | ComponentSpec::Motherboard { socket, .. } => {
                Some(socket)
            }
            _ => None,
        }
    }

    /// Power draw for GPUs, rated output for PSUs.
    pub fn power(&self) -> Option<u32> {
        match &self.spec {
            ComponentSpec::Gpu { power } | ComponentSpec::Psu { power } => Some(*power),
            _ => None,
        }
    }
}
