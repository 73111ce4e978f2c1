//! Contract with the external research oracle.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{CategoryRanges, MaterialCategory, PropertySource, PropertyValue};
use crate::error::{GateError, Result};

/// One researched answer from the oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchedProperty {
    pub value: PropertyValue,
    #[serde(default)]
    pub unit: Option<String>,
    /// Fraction or percentage; normalized by the consumer.
    pub confidence: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Human-readable grounding for the answer.
    #[serde(default)]
    pub basis: Option<String>,
}

impl ResearchedProperty {
    pub fn number(value: f64, unit: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: PropertyValue::Number(value),
            unit: Some(unit.into()),
            confidence,
            min: None,
            max: None,
            basis: None,
        }
    }

    pub fn text(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: PropertyValue::Text(value.into()),
            unit: None,
            confidence,
            min: None,
            max: None,
            basis: None,
        }
    }

    pub fn with_basis(mut self, basis: impl Into<String>) -> Self {
        self.basis = Some(basis.into());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ResearchRequest {
    pub material: String,
    pub property: String,
    pub category: MaterialCategory,
    pub current_value: Option<f64>,
}

/// External capability that supplies values for missing properties. Bulk
/// discovery returns everything the oracle can find for a material in one
/// call; the single-property path carries the current value as context.
#[async_trait]
pub trait ResearchOracle: Send + Sync {
    async fn discover_properties(
        &self,
        material: &str,
        category: MaterialCategory,
    ) -> Result<BTreeMap<String, ResearchedProperty>>;

    async fn research_property(&self, request: &ResearchRequest) -> Result<ResearchedProperty>;

    /// How records produced from this oracle's answers are attributed.
    fn source(&self) -> PropertySource {
        PropertySource::AiResearch
    }
}

/// Offline oracle that answers from the curated range tables: the value is
/// the range midpoint, attributed as `fallback_range`. Keeps the pipeline
/// usable when no live research capability is wired in.
pub struct RangeTableOracle {
    ranges: CategoryRanges,
    confidence: f64,
}

impl RangeTableOracle {
    const DEFAULT_CONFIDENCE: f64 = 90.0;

    pub fn new(ranges: CategoryRanges) -> Self {
        Self {
            ranges,
            confidence: Self::DEFAULT_CONFIDENCE,
        }
    }

    fn answer(&self, category: MaterialCategory, property: &str) -> Option<ResearchedProperty> {
        let (min, max) = self.ranges.lookup(category, property)?;
        Some(
            ResearchedProperty::number(
                (min + max) / 2.0,
                unit_for(property),
                self.confidence,
            )
            .with_range(min, max)
            .with_basis(format!("midpoint of the curated {} range", category)),
        )
    }
}

fn unit_for(property: &str) -> &'static str {
    match property {
        "density" => "g/cm3",
        "thermalConductivity" => "W/(m*K)",
        "hardness" => "Mohs",
        "reflectivity" => "fraction",
        "thermalDestructionPoint" => "C",
        "tensileStrength" | "compressiveStrength" => "MPa",
        "porosity" | "waterAbsorption" => "%",
        "electricalConductivity" => "MS/m",
        "bandGap" => "eV",
        _ => "",
    }
}

#[async_trait]
impl ResearchOracle for RangeTableOracle {
    async fn discover_properties(
        &self,
        _material: &str,
        category: MaterialCategory,
    ) -> Result<BTreeMap<String, ResearchedProperty>> {
        let mut discovered = BTreeMap::new();
        for property in [
            "density",
            "thermalConductivity",
            "hardness",
            "reflectivity",
            "thermalDestructionPoint",
            "tensileStrength",
            "compressiveStrength",
            "porosity",
            "waterAbsorption",
            "electricalConductivity",
            "bandGap",
        ] {
            if let Some(answer) = self.answer(category, property) {
                discovered.insert(property.to_string(), answer);
            }
        }
        Ok(discovered)
    }

    async fn research_property(&self, request: &ResearchRequest) -> Result<ResearchedProperty> {
        self.answer(request.category, &request.property)
            .ok_or_else(|| {
                GateError::research(
                    &request.material,
                    &request.property,
                    format!("no curated range for {} {}", request.category, request.property),
                )
            })
    }

    fn source(&self) -> PropertySource {
        PropertySource::FallbackRange
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_range_oracle_answers_from_table() {
        let oracle = RangeTableOracle::new(CategoryRanges::builtin());
        let discovered = oracle
            .discover_properties("steel", MaterialCategory::Metal)
            .await
            .unwrap();

        let density = &discovered["density"];
        assert_eq!(density.value.as_number(), Some((0.5 + 22.6) / 2.0));
        assert_eq!(density.min, Some(0.5));
        assert_eq!(density.max, Some(22.6));
        // no curated masonry-only properties for a metal
        assert!(!discovered.contains_key("waterAbsorption"));
    }

    #[tokio::test]
    async fn test_range_oracle_misses_become_research_errors() {
        let oracle = RangeTableOracle::new(CategoryRanges::builtin());
        let request = ResearchRequest {
            material: "oak".to_string(),
            property: "bandGap".to_string(),
            category: MaterialCategory::Wood,
            current_value: None,
        };
        let err = oracle.research_property(&request).await.unwrap_err();
        assert!(matches!(err, GateError::Research { .. }));
    }
}
