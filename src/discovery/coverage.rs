use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{CategoryRules, MaterialCategory};
use crate::error::{GateError, Result};

/// Final gatekeeper: after research, every essential property for the
/// category must be present in the merged set.
pub struct EssentialCoverageValidator {
    rules: Arc<CategoryRules>,
}

impl EssentialCoverageValidator {
    pub fn new(rules: Arc<CategoryRules>) -> Self {
        Self { rules }
    }

    pub fn missing(
        &self,
        category: MaterialCategory,
        present: &BTreeSet<String>,
    ) -> Vec<String> {
        self.rules
            .essential_for(category)
            .difference(present)
            .cloned()
            .collect()
    }

    pub fn validate(
        &self,
        material: &str,
        category: MaterialCategory,
        present: &BTreeSet<String>,
    ) -> Result<()> {
        let missing = self.missing(category, present);
        if missing.is_empty() {
            return Ok(());
        }
        // BTreeSet difference keeps the names alphabetical, which keeps the
        // message deterministic
        Err(GateError::discovery(
            material,
            format!("missing essential properties: {}", missing.join(", ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_complete_set_passes() {
        let validator = EssentialCoverageValidator::new(Arc::new(CategoryRules::builtin()));
        let essential = CategoryRules::builtin().essential_for(MaterialCategory::Wood);
        assert!(validator
            .validate("oak", MaterialCategory::Wood, &essential)
            .is_ok());
    }

    #[test]
    fn test_missing_properties_fail_with_sorted_message() {
        let validator = EssentialCoverageValidator::new(Arc::new(CategoryRules::builtin()));
        let present = names(&["density", "hardness", "reflectivity", "thermalConductivity"]);

        let err = validator
            .validate("oak", MaterialCategory::Wood, &present)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing essential properties:"));
        // alphabetical: flammability < moistureResistance < workability
        let flam = message.find("flammability").unwrap();
        let moist = message.find("moistureResistance").unwrap();
        let work = message.find("workability").unwrap();
        assert!(flam < moist && moist < work);
    }

    #[test]
    fn test_extra_properties_are_ignored() {
        let validator = EssentialCoverageValidator::new(Arc::new(CategoryRules::builtin()));
        let mut present = CategoryRules::builtin().essential_for(MaterialCategory::Glass);
        present.insert("somethingExtra".to_string());
        assert!(validator
            .validate("pane", MaterialCategory::Glass, &present)
            .is_ok());
    }
}
