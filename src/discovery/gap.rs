use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;

use crate::discovery::confidence;
use crate::domain::{CategoryRules, MaterialCategory, RawProperty};
use crate::error::{GateError, Result};

/// Outcome of gap analysis: the two sets partition the essential property
/// set — a property is either queued for research or skipped with a reason.
#[derive(Debug, Clone)]
pub struct GapAnalysis {
    pub to_research: BTreeSet<String>,
    pub skip_reasons: BTreeMap<String, String>,
}

impl GapAnalysis {
    pub fn is_complete(&self) -> bool {
        self.to_research.is_empty()
    }
}

pub struct GapAnalyzer {
    rules: Arc<CategoryRules>,
    /// Normalized percentage above which existing data satisfies a
    /// requirement without research.
    skip_threshold: u8,
}

impl GapAnalyzer {
    pub fn new(rules: Arc<CategoryRules>) -> Self {
        Self::with_threshold(rules, confidence::normalize(confidence::HIGH_CONFIDENCE_THRESHOLD))
    }

    pub fn with_threshold(rules: Arc<CategoryRules>, skip_threshold: u8) -> Self {
        Self {
            rules,
            skip_threshold,
        }
    }

    /// Computes which essential properties still need research and which are
    /// already covered by high-confidence existing data.
    pub fn discover(
        &self,
        material: &str,
        category: MaterialCategory,
        existing: &BTreeMap<String, RawProperty>,
    ) -> Result<GapAnalysis> {
        if material.trim().is_empty() {
            return Err(GateError::discovery(
                material,
                "material name must not be empty",
            ));
        }

        let essential = self.rules.essential_for(category);
        let mut to_research = BTreeSet::new();
        let mut skip_reasons = BTreeMap::new();

        for property in essential {
            match existing.get(&property) {
                Some(raw) if confidence::normalize(raw.confidence) >= self.skip_threshold => {
                    skip_reasons.insert(
                        property,
                        format!(
                            "existing data at {}% confidence (threshold {}%)",
                            confidence::normalize(raw.confidence),
                            self.skip_threshold
                        ),
                    );
                }
                _ => {
                    to_research.insert(property);
                }
            }
        }

        debug!(
            material,
            category = %category,
            to_research = to_research.len(),
            skipped = skip_reasons.len(),
            "gap analysis complete"
        );

        Ok(GapAnalysis {
            to_research,
            skip_reasons,
        })
    }
}
