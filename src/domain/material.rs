use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::property::RawProperty;
use crate::error::GateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Metal,
    Ceramic,
    Plastic,
    Composite,
    Wood,
    Stone,
    Glass,
    Semiconductor,
    Masonry,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 9] = [
        Self::Metal,
        Self::Ceramic,
        Self::Plastic,
        Self::Composite,
        Self::Wood,
        Self::Stone,
        Self::Glass,
        Self::Semiconductor,
        Self::Masonry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metal => "metal",
            Self::Ceramic => "ceramic",
            Self::Plastic => "plastic",
            Self::Composite => "composite",
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Glass => "glass",
            Self::Semiconductor => "semiconductor",
            Self::Masonry => "masonry",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MaterialCategory {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .copied()
            .ok_or_else(|| GateError::Config(format!("unknown material category: '{}'", s)))
    }
}

/// One record per material. Properties are keyed by camelCase property name
/// and kept in the stored (flat) shape; the discovery pipeline is the only
/// component that rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    pub category: MaterialCategory,
    #[serde(default)]
    pub properties: BTreeMap<String, RawProperty>,
}

impl MaterialRecord {
    pub fn new(name: impl Into<String>, category: MaterialCategory) -> Self {
        Self {
            name: name.into(),
            category,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, property: RawProperty) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    pub fn property_names(&self) -> std::collections::BTreeSet<String> {
        self.properties.keys().cloned().collect()
    }
}
