//! The eight fixed component categories a build is made of.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PcForgeError;

/// A category slot in a PC build.
///
/// The set is closed: any other key is rejected with
/// [`PcForgeError::InvalidCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Storage,
    Psu,
    Cooler,
    Case,
}

impl Category {
    /// All categories in build order. Every one is required for a complete build.
    pub const ALL: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Gpu,
        Category::Storage,
        Category::Psu,
        Category::Cooler,
        Category::Case,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Gpu => "gpu",
            Category::Storage => "storage",
            Category::Psu => "psu",
            Category::Cooler => "cooler",
            Category::Case => "case",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Cpu => "Processor",
            Category::Motherboard => "Motherboard",
            Category::Ram => "Memory",
            Category::Gpu => "Graphics card",
            Category::Storage => "Storage",
            Category::Psu => "Power supply",
            Category::Cooler => "Cooler",
            Category::Case => "Case",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Category {
    type Err = PcForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Category::Cpu),
            "motherboard" => Ok(Category::Motherboard),
            "ram" => Ok(Category::Ram),
            "gpu" => Ok(Category::Gpu),
            "storage" => Ok(Category::Storage),
            "psu" => Ok(Category::Psu),
            "cooler" => Ok(Category::Cooler),
            "case" => Ok(Category::Case),
            _ => Err(PcForgeError::InvalidCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
