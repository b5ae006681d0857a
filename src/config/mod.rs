// ABOUTME: Configuration management for the creation wizard
// Loads defaults, logging preferences and an optional catalog override from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, ResourceTypeDefinition, FREE_SKU};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Tier preselected when the entry URL names none
    #[serde(default = "default_sku")]
    pub default_sku: String,

    /// Tracing filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit logs as JSON lines instead of plain text
    #[serde(default)]
    pub json_logs: bool,

    /// Replaces the built-in catalog when non-empty
    #[serde(default)]
    pub resource_types: Vec<ResourceTypeDefinition>,
}

fn default_sku() -> String {
    FREE_SKU.to_string()
}

fn default_log_filter() -> String {
    "konnektr_wizard=info".to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            default_sku: default_sku(),
            log_filter: default_log_filter(),
            json_logs: false,
            resource_types: Vec::new(),
        }
    }
}

impl WizardConfig {
    /// Load from `path`, or from the user config file when no path is given
    ///
    /// A missing user config file yields defaults; a missing explicit path is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::user_config_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: WizardConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// ~/.konnektr/wizard.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".konnektr").join("wizard.toml"))
    }

    /// Configured catalog, or the built-in one
    pub fn catalog(&self) -> Catalog {
        if self.resource_types.is_empty() {
            Catalog::default()
        } else {
            Catalog::new(self.resource_types.clone())
        }
    }
}
