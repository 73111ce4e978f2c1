use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::discovery::confidence;
use crate::discovery::coverage::EssentialCoverageValidator;
use crate::discovery::gap::GapAnalyzer;
use crate::domain::{
    CategoryRanges, CategoryRules, MaterialCategory, MaterialRecord, PropertyData,
    PropertyRecord, PropertySource, QualitativeTaxonomy, RawProperty,
};
use crate::error::{GateError, Result};
use crate::research::{ResearchOracle, ResearchRequest, ResearchedProperty};

/// Pairs of property names that describe the same physical quantity. A
/// discovered property is dropped when its counterpart is already present.
const REDUNDANT_ALIASES: &[(&str, &str)] = &[
    ("thermalDestructionPoint", "thermalDestruction"),
    ("thermalDestruction", "thermalDestructionPoint"),
    ("specificHeatCapacity", "specificHeat"),
    ("specificHeat", "specificHeatCapacity"),
];

fn redundant_counterpart(property: &str) -> Option<&'static str> {
    REDUNDANT_ALIASES
        .iter()
        .find(|(name, _)| *name == property)
        .map(|(_, counterpart)| *counterpart)
}

#[derive(Debug, Clone, Default)]
pub struct ResearchMetadata {
    /// Essential properties satisfied by existing data, with the reason.
    pub skip_reasons: BTreeMap<String, String>,
    /// Properties already present before research.
    pub existing_count: usize,
    /// Properties added by the research step.
    pub researched_count: usize,
    /// Discovered properties dropped as aliases of present ones.
    pub skipped_redundant: Vec<String>,
    /// Discovered text values outside the taxonomy, dropped for operators to
    /// review.
    pub taxonomy_gaps: Vec<String>,
}

/// Merged output of one discover-and-research run. Records are already
/// classified; nothing downstream re-derives the qualitative check.
#[derive(Debug, Clone, Default)]
pub struct PropertyResearchResult {
    pub quantitative: BTreeMap<String, PropertyRecord>,
    pub qualitative: BTreeMap<String, PropertyRecord>,
    pub metadata: ResearchMetadata,
}

impl PropertyResearchResult {
    pub fn records(&self) -> impl Iterator<Item = (&String, &PropertyRecord)> {
        self.quantitative.iter().chain(self.qualitative.iter())
    }

    pub fn len(&self) -> usize {
        self.quantitative.len() + self.qualitative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantitative.is_empty() && self.qualitative.is_empty()
    }
}

/// Drives the full discover -> research -> classify -> merge pipeline for one
/// material. Every internal failure surfaces as a property-discovery error
/// carrying the material name; there is no partial success.
pub struct ResearchCoordinator {
    gap: GapAnalyzer,
    coverage: EssentialCoverageValidator,
    taxonomy: Arc<QualitativeTaxonomy>,
    ranges: Arc<CategoryRanges>,
    oracle: Arc<dyn ResearchOracle>,
    acceptance_floor: u8,
}

impl ResearchCoordinator {
    pub fn new(
        rules: Arc<CategoryRules>,
        taxonomy: Arc<QualitativeTaxonomy>,
        ranges: Arc<CategoryRanges>,
        oracle: Arc<dyn ResearchOracle>,
    ) -> Self {
        Self::with_thresholds(
            rules,
            taxonomy,
            ranges,
            oracle,
            confidence::normalize(confidence::HIGH_CONFIDENCE_THRESHOLD),
            confidence::RESEARCH_ACCEPTANCE_FLOOR,
        )
    }

    pub fn with_thresholds(
        rules: Arc<CategoryRules>,
        taxonomy: Arc<QualitativeTaxonomy>,
        ranges: Arc<CategoryRanges>,
        oracle: Arc<dyn ResearchOracle>,
        skip_threshold: u8,
        acceptance_floor: u8,
    ) -> Self {
        Self {
            gap: GapAnalyzer::with_threshold(Arc::clone(&rules), skip_threshold),
            coverage: EssentialCoverageValidator::new(rules),
            taxonomy,
            ranges,
            oracle,
            acceptance_floor,
        }
    }

    pub async fn discover_and_research(
        &self,
        material: &str,
        category: MaterialCategory,
        existing: &BTreeMap<String, RawProperty>,
    ) -> Result<PropertyResearchResult> {
        self.run(material, category, existing)
            .await
            .map_err(|e| match e {
                already @ GateError::PropertyDiscovery { .. } => already,
                other => GateError::discovery(material, other.to_string()),
            })
    }

    async fn run(
        &self,
        material: &str,
        category: MaterialCategory,
        existing: &BTreeMap<String, RawProperty>,
    ) -> Result<PropertyResearchResult> {
        let analysis = self.gap.discover(material, category, existing)?;

        let mut result = PropertyResearchResult {
            metadata: ResearchMetadata {
                skip_reasons: analysis.skip_reasons.clone(),
                existing_count: existing.len(),
                ..ResearchMetadata::default()
            },
            ..PropertyResearchResult::default()
        };

        if !analysis.to_research.is_empty() {
            // one bulk call per material: the oracle returns everything it
            // can discover for this material/category
            let discovered = self
                .oracle
                .discover_properties(material, category)
                .await?;
            debug!(
                material,
                discovered = discovered.len(),
                needed = analysis.to_research.len(),
                "research oracle returned discovery map"
            );
            self.merge_discovered(material, category, existing, discovered, &mut result);
        }

        let mut present: BTreeSet<String> = existing.keys().cloned().collect();
        present.extend(result.quantitative.keys().cloned());
        present.extend(result.qualitative.keys().cloned());
        self.coverage.validate(material, category, &present)?;

        result.metadata.researched_count = result.len();
        Ok(result)
    }

    /// Merge order is load-bearing: existing-data precedence, then redundancy
    /// elimination, then classification. Reordering changes which properties
    /// get skipped.
    fn merge_discovered(
        &self,
        material: &str,
        category: MaterialCategory,
        existing: &BTreeMap<String, RawProperty>,
        discovered: BTreeMap<String, ResearchedProperty>,
        result: &mut PropertyResearchResult,
    ) {
        for (name, researched) in discovered {
            if existing.contains_key(&name) {
                debug!(material, property = %name, "existing data wins over research");
                continue;
            }

            if let Some(counterpart) = redundant_counterpart(&name) {
                let counterpart_present = existing.contains_key(counterpart)
                    || result.quantitative.contains_key(counterpart)
                    || result.qualitative.contains_key(counterpart);
                if counterpart_present {
                    debug!(
                        material,
                        property = %name,
                        counterpart,
                        "dropping redundant alias"
                    );
                    result.metadata.skipped_redundant.push(name);
                    continue;
                }
            }

            match self.classify(material, &name, category, &researched) {
                Some(record) if record.is_qualitative() => {
                    result.qualitative.insert(name, record);
                }
                Some(record) => {
                    result.quantitative.insert(name, record);
                }
                None => {
                    warn!(
                        material,
                        property = %name,
                        value = %researched.value,
                        "discovered value looks qualitative but the property is not in the taxonomy, skipping"
                    );
                    result.metadata.taxonomy_gaps.push(name);
                }
            }
        }
    }

    fn classify(
        &self,
        material: &str,
        name: &str,
        category: MaterialCategory,
        researched: &ResearchedProperty,
    ) -> Option<PropertyRecord> {
        let confidence = confidence::normalize(researched.confidence);
        let source = self.oracle.source();

        if let Some(definition) = self.taxonomy.definition(name) {
            let value = researched.value.to_string();
            if !definition.allows(&value) {
                // the taxonomy may lag behind the oracle; keep the value
                warn!(
                    material,
                    property = %name,
                    value = %value,
                    "researched value outside the allowed set, keeping it"
                );
            }
            return Some(PropertyRecord {
                data: PropertyData::Qualitative {
                    value,
                    allowed_values: definition.allowed_values.clone(),
                },
                confidence,
                source,
                description: researched.basis.clone(),
            });
        }

        let value = researched.value.as_number()?;
        let (min, max) = match (researched.min, researched.max) {
            (Some(min), Some(max)) => (Some(min), Some(max)),
            _ => match self.ranges.lookup(category, name) {
                Some((min, max)) => (Some(min), Some(max)),
                None => (None, None),
            },
        };
        Some(PropertyRecord {
            data: PropertyData::Quantitative {
                value,
                unit: researched.unit.clone().unwrap_or_default(),
                min,
                max,
            },
            confidence,
            source,
            description: researched.basis.clone(),
        })
    }

    /// Single-property research with the current value as context. Unlike the
    /// bulk discovery path, answers below the acceptance floor are rejected
    /// rather than merged.
    pub async fn research_single(&self, request: &ResearchRequest) -> Result<PropertyRecord> {
        let researched = self.oracle.research_property(request).await?;
        let normalized = confidence::normalize(researched.confidence);
        if normalized < self.acceptance_floor {
            return Err(GateError::research(
                &request.material,
                &request.property,
                format!(
                    "confidence {}% below the {}% acceptance floor",
                    normalized, self.acceptance_floor
                ),
            ));
        }
        self.classify(&request.material, &request.property, request.category, &researched)
            .ok_or_else(|| {
                GateError::research(
                    &request.material,
                    &request.property,
                    "researched value cannot be classified",
                )
            })
    }

    /// Writes a research result back into the material. Existing entries are
    /// kept (normalized in place); researched records are appended in their
    /// stored shape.
    pub fn apply(&self, material: &mut MaterialRecord, result: &PropertyResearchResult) {
        for raw in material.properties.values_mut() {
            raw.confidence = f64::from(confidence::normalize(raw.confidence));
            if raw.source.is_none() {
                raw.source = Some(PropertySource::ExistingData);
            }
        }
        for (name, record) in result.records() {
            material
                .properties
                .insert(name.clone(), record.to_persisted());
        }
    }
}
