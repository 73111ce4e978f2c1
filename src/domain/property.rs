use serde::{Deserialize, Serialize};

use crate::domain::taxonomy::QualitativeTaxonomy;
use crate::error::{GateError, Result};

/// A property value as it appears on the wire: either a measurement or an
/// enumerated grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySource {
    ExistingData,
    AiResearch,
    FallbackRange,
}

impl std::fmt::Display for PropertySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExistingData => write!(f, "existing_data"),
            Self::AiResearch => write!(f, "ai_research"),
            Self::FallbackRange => write!(f, "fallback_range"),
        }
    }
}

/// Stored shape of a single property. This is the structural contract every
/// persisted record satisfies: `min` and `max` keys are always present, null
/// when not applicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProperty {
    pub value: PropertyValue,
    #[serde(default)]
    pub unit: Option<String>,
    /// May arrive as a fraction (0.0-1.0) or a percentage; normalized before
    /// any record is written back.
    pub confidence: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub source: Option<PropertySource>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RawProperty {
    pub fn number(value: f64, unit: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: PropertyValue::Number(value),
            unit: Some(unit.into()),
            confidence,
            min: None,
            max: None,
            source: None,
            description: None,
        }
    }

    pub fn text(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: PropertyValue::Text(value.into()),
            unit: None,
            confidence,
            min: None,
            max: None,
            source: None,
            description: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_source(mut self, source: PropertySource) -> Self {
        self.source = Some(source);
        self
    }
}

/// Kind of a classified property, decided exactly once at construction.
/// Consumers switch on this tag instead of re-deriving "is this qualitative?".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyData {
    Quantitative {
        value: f64,
        unit: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    Qualitative {
        value: String,
        allowed_values: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(flatten)]
    pub data: PropertyData,
    /// Normalized integer percentage, 0-100.
    pub confidence: u8,
    pub source: PropertySource,
    #[serde(default)]
    pub description: Option<String>,
}

impl PropertyRecord {
    /// Classifies a stored property into its tagged form. Text values for
    /// properties outside the taxonomy cannot be classified; the caller
    /// decides whether that is a skip or an error.
    pub fn classify(
        name: &str,
        raw: &RawProperty,
        taxonomy: &QualitativeTaxonomy,
    ) -> Result<Self> {
        let confidence = crate::discovery::confidence::normalize(raw.confidence);
        let source = raw.source.unwrap_or(PropertySource::ExistingData);

        if let Some(definition) = taxonomy.definition(name) {
            let value = raw.value.to_string();
            return Ok(Self {
                data: PropertyData::Qualitative {
                    value,
                    allowed_values: definition.allowed_values.clone(),
                },
                confidence,
                source,
                description: raw.description.clone(),
            });
        }

        match raw.value.as_number() {
            Some(value) => Ok(Self {
                data: PropertyData::Quantitative {
                    value,
                    unit: raw.unit.clone().unwrap_or_default(),
                    min: raw.min,
                    max: raw.max,
                },
                confidence,
                source,
                description: raw.description.clone(),
            }),
            None => Err(GateError::Schema(format!(
                "property '{}' has a non-numeric value but is not in the qualitative taxonomy",
                name
            ))),
        }
    }

    pub fn is_qualitative(&self) -> bool {
        matches!(self.data, PropertyData::Qualitative { .. })
    }

    /// Converts back to the stored shape. Confidence is already normalized,
    /// so the written record always carries an integer percentage.
    pub fn to_persisted(&self) -> RawProperty {
        match &self.data {
            PropertyData::Quantitative {
                value,
                unit,
                min,
                max,
            } => RawProperty {
                value: PropertyValue::Number(*value),
                unit: Some(unit.clone()),
                confidence: f64::from(self.confidence),
                min: *min,
                max: *max,
                source: Some(self.source),
                description: self.description.clone(),
            },
            PropertyData::Qualitative { value, .. } => RawProperty {
                value: PropertyValue::Text(value.clone()),
                unit: None,
                confidence: f64::from(self.confidence),
                min: None,
                max: None,
                source: Some(self.source),
                description: self.description.clone(),
            },
        }
    }
}
