//! Durable storage for material records, one YAML document per material.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::MaterialRecord;
use crate::error::{GateError, Result};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load(&self, name: &str) -> Result<MaterialRecord>;
    async fn save(&self, record: &MaterialRecord) -> Result<()>;
    async fn list(&self) -> Result<Vec<String>>;
}

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\', '.']) {
            return Err(GateError::Store(format!(
                "invalid material name: '{}'",
                name
            )));
        }
        Ok(self.root.join(format!("{}.yaml", name)))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn load(&self, name: &str) -> Result<MaterialRecord> {
        let path = self.record_path(name)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_yaml_bw::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(GateError::MaterialNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, record: &MaterialRecord) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        let path = self.record_path(&record.name)?;
        let content = serde_yaml_bw::to_string(record)?;

        // temp+rename so a crashed save never leaves a truncated record
        let temp_path = path.with_extension(format!("yaml.{}.tmp", std::process::id()));
        fs::write(&temp_path, &content).await?;
        match fs::rename(&temp_path, &path).await {
            Ok(_) => {
                debug!(material = %record.name, path = %path.display(), "record saved");
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                Err(e.into())
            }
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

impl FileStore {
    pub fn root(&self) -> &Path {
        &self.root
    }
}
