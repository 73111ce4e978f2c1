use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::MaterialCategory;
use crate::error::{GateError, Result};
use crate::schema::merge::deep_merge;

/// Candidate schema locations, highest priority first. The organized layout
/// under `active/` is preferred; the flat legacy locations are kept for
/// repositories that predate it.
const CANDIDATES: &[&str] = &[
    "active/material.schema.yaml",
    "material.schema.yaml",
    "active/material.enhanced.schema.yaml",
    "material.enhanced.schema.yaml",
    "active/material.basic.schema.yaml",
    "material.basic.schema.yaml",
];

#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    /// None when the built-in minimal schema was used.
    pub path: Option<PathBuf>,
    pub tree: Value,
}

impl ResolvedSchema {
    pub fn is_builtin(&self) -> bool {
        self.path.is_none()
    }
}

/// Guaranteed-available last resort: the minimal structural contract a
/// record must satisfy.
pub fn builtin_minimal_schema() -> Value {
    json!({
        "required": ["name", "category", "properties"],
        "property": {
            "required": ["value", "confidence", "source"],
            "numeric_requires_unit": true,
        },
    })
}

pub struct SchemaResolver {
    root: PathBuf,
}

impl SchemaResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walks the candidate chain and returns the first usable schema.
    /// Malformed candidates are skipped, never fatal; the built-in minimal
    /// schema makes this operation infallible.
    pub fn primary_schema(&self) -> ResolvedSchema {
        for candidate in CANDIDATES {
            let path = self.root.join(candidate);
            if !path.exists() {
                continue;
            }
            match load_schema_file(&path) {
                Ok(tree) => {
                    debug!(path = %path.display(), "resolved primary schema");
                    return ResolvedSchema {
                        path: Some(path),
                        tree,
                    };
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unusable schema candidate"
                    );
                }
            }
        }

        debug!("no schema file found, using built-in minimal schema");
        ResolvedSchema {
            path: None,
            tree: builtin_minimal_schema(),
        }
    }

    /// Primary schema deep-merged with the category specialization when one
    /// exists on disk.
    pub fn resolve_for_category(&self, category: MaterialCategory) -> ResolvedSchema {
        let primary = self.primary_schema();
        let specific_path = self
            .root
            .join("categories")
            .join(format!("{}.schema.yaml", category));
        if !specific_path.exists() {
            return primary;
        }

        match load_schema_file(&specific_path) {
            Ok(specific) => ResolvedSchema {
                path: primary.path,
                tree: deep_merge(&primary.tree, &specific),
            },
            Err(e) => {
                warn!(
                    path = %specific_path.display(),
                    error = %e,
                    "skipping unusable category schema"
                );
                primary
            }
        }
    }
}

fn load_schema_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let tree: Value = serde_yaml_bw::from_str(&content)?;
    if !tree.is_object() {
        return Err(GateError::Schema(format!(
            "schema root must be a mapping: {}",
            path.display()
        )));
    }
    Ok(tree)
}
