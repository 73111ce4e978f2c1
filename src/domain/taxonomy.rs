use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Definition of one qualitative property: the closed value set and an
/// optional display unit (usually none).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualitativeDefinition {
    pub allowed_values: Vec<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl QualitativeDefinition {
    pub fn new(allowed_values: &[&str]) -> Self {
        Self {
            allowed_values: allowed_values.iter().map(|v| v.to_string()).collect(),
            unit: None,
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values.iter().any(|v| v == value)
    }
}

/// Registry of properties whose values are enumerated grades rather than
/// measurements. Read-only after construction, shared across materials.
#[derive(Debug, Clone)]
pub struct QualitativeTaxonomy {
    definitions: BTreeMap<String, QualitativeDefinition>,
}

const GRADE_SCALE: [&str; 4] = ["poor", "fair", "good", "excellent"];

impl QualitativeTaxonomy {
    pub fn builtin() -> Self {
        let mut definitions = BTreeMap::new();
        let mut add = |name: &str, definition: QualitativeDefinition| {
            definitions.insert(name.to_string(), definition);
        };

        add("corrosionResistance", QualitativeDefinition::new(&GRADE_SCALE));
        add("chemicalResistance", QualitativeDefinition::new(&GRADE_SCALE));
        add("moistureResistance", QualitativeDefinition::new(&GRADE_SCALE));
        add("weatherResistance", QualitativeDefinition::new(&GRADE_SCALE));
        add("scratchResistance", QualitativeDefinition::new(&GRADE_SCALE));
        add("workability", QualitativeDefinition::new(&GRADE_SCALE));
        add("machinability", QualitativeDefinition::new(&GRADE_SCALE));
        add(
            "flammability",
            QualitativeDefinition::new(&["nonFlammable", "low", "moderate", "high"]),
        );
        add(
            "transparency",
            QualitativeDefinition::new(&["opaque", "translucent", "transparent"]),
        );

        Self { definitions }
    }

    pub fn from_map(definitions: BTreeMap<String, QualitativeDefinition>) -> Self {
        Self { definitions }
    }

    pub fn is_qualitative(&self, property: &str) -> bool {
        self.definitions.contains_key(property)
    }

    pub fn definition(&self, property: &str) -> Option<&QualitativeDefinition> {
        self.definitions.get(property)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for QualitativeTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_membership() {
        let taxonomy = QualitativeTaxonomy::builtin();
        assert!(taxonomy.is_qualitative("corrosionResistance"));
        assert!(taxonomy.is_qualitative("flammability"));
        assert!(!taxonomy.is_qualitative("density"));
    }

    #[test]
    fn test_definition_allows() {
        let taxonomy = QualitativeTaxonomy::builtin();
        let definition = taxonomy.definition("transparency").unwrap();
        assert!(definition.allows("opaque"));
        assert!(!definition.allows("shiny"));
    }
}
