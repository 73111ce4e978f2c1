use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{GateError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub discovery: DiscoveryConfig,
    pub validation: ValidationConfig,
    pub schema: SchemaConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Fraction (0.0-1.0) above which existing data is trusted without
    /// research.
    pub high_confidence_threshold: f64,
    /// Normalized percentage floor for single-property research answers.
    pub research_acceptance_floor: u8,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            high_confidence_threshold: 0.85,
            research_acceptance_floor: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Normalized percentage below which a merged property is flagged as
    /// weakly supported.
    pub low_confidence_floor: u8,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            low_confidence_floor: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub schema_dir: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from("schemas"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub records_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            records_dir: PathBuf::from("materials"),
        }
    }
}

impl GateConfig {
    pub async fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join("matgate.toml");
        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, dir: &Path) -> Result<()> {
        self.validate()?;
        let config_path = dir.join("matgate.toml");
        let content =
            toml::to_string_pretty(self).map_err(|e| GateError::Config(e.to_string()))?;
        fs::write(&config_path, content).await?;
        Ok(())
    }

    /// Validates every section and reports all violations at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.discovery.high_confidence_threshold) {
            errors.push("discovery.high_confidence_threshold must be between 0.0 and 1.0");
        }
        if self.discovery.research_acceptance_floor > 100 {
            errors.push("discovery.research_acceptance_floor must be at most 100");
        }
        if self.discovery.research_acceptance_floor < 50 {
            errors.push("discovery.research_acceptance_floor must be at least 50");
        }
        if self.validation.low_confidence_floor > 100 {
            errors.push("validation.low_confidence_floor must be at most 100");
        }
        if self.schema.schema_dir.as_os_str().is_empty() {
            errors.push("schema.schema_dir must not be empty");
        }
        if self.store.records_dir.as_os_str().is_empty() {
            errors.push("store.records_dir must not be empty");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GateError::Config(errors.join("; ")))
        }
    }
}
