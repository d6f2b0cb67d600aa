//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use pcforge_core::build::Markup;
use pcforge_core::money::Currency;
use pcforge_store::BuildPolicy;
use serde::{Deserialize, Serialize};

/// Config file names looked up from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["pcforge.toml", ".pcforge.toml", "pcforge.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PcForgeConfig {
    /// Pricing defaults.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Component catalog location.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Build store location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Workflow rules.
    #[serde(default)]
    pub policy: BuildPolicy,
}

impl PcForgeConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// Pricing defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency prices are kept in.
    #[serde(default)]
    pub currency: Currency,

    /// Markup used when a command is not given one.
    #[serde(default)]
    pub default_markup: Markup,
}

/// Component catalog location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (TOML or JSON), relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Build store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON store file, relative to the config file.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "pcforge-builds.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Generate a default pcforge.toml config file.
pub fn generate_default_config() -> String {
    r#"# pcforge configuration

[pricing]
currency = "RUB"
default_markup = { kind = "percentage", value = 15.0 }

[catalog]
path = "catalog.toml"

[store]
path = "pcforge-builds.json"

[policy]
# Refuse to save builds whose sale price is below zero.
reject_negative_price = true
# Builds with compatibility issues can still be published.
allow_publish_incompatible = true
# Only published builds can be sold.
require_published_for_sale = true
"#
    .to_string()
}
