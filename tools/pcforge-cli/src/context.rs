//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use pcforge_core::catalog::Catalog;
use pcforge_store::{BuildService, JsonFileRepository};
use tracing::debug;

use crate::config::{PcForgeConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: PcForgeConfig,
    /// The file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (PcForgeConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some(path) => (PcForgeConfig::load(&path)?, Some(path)),
                None => (PcForgeConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory that relative paths in the config are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd)
    }

    /// Resolve a config path relative to the config file.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(self.base_dir(), path)
    }

    /// Load the configured component catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.config.catalog.path.as_deref().ok_or_else(|| {
            anyhow!("No catalog configured. Set [catalog] path in pcforge.toml.")
        })?;
        let path = self.resolve_path(path);

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let catalog = if path.extension().map_or(false, |ext| ext == "json") {
            Catalog::from_json_str(&content)
        } else {
            Catalog::from_toml_str(&content)
        }
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;

        debug!(path = %path.display(), components = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Open the build store with the configured policy and currency.
    pub fn service(&self) -> Result<BuildService<JsonFileRepository>> {
        let path = self.resolve_path(&self.config.store.path);
        let repo = JsonFileRepository::open(&path)
            .with_context(|| format!("Failed to open build store: {}", path.display()))?;

        Ok(BuildService::new(repo)
            .with_policy(self.config.policy)
            .with_currency(self.config.pricing.currency))
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
