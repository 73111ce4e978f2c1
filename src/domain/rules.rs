use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::domain::material::MaterialCategory;

/// Properties every material must carry regardless of category.
pub const UNIVERSAL_REQUIRED: [&str; 4] = [
    "thermalConductivity",
    "density",
    "hardness",
    "reflectivity",
];

/// Per-category required property sets. Built once at startup and shared
/// read-only; tests inject their own tables through `from_map`.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    required: BTreeMap<MaterialCategory, BTreeSet<String>>,
}

impl CategoryRules {
    pub fn builtin() -> Self {
        let mut required = BTreeMap::new();
        let mut add = |category: MaterialCategory, names: &[&str]| {
            required.insert(
                category,
                names.iter().map(|n| n.to_string()).collect::<BTreeSet<_>>(),
            );
        };

        add(
            MaterialCategory::Metal,
            &[
                "thermalDestructionPoint",
                "tensileStrength",
                "corrosionResistance",
                "electricalConductivity",
            ],
        );
        add(
            MaterialCategory::Ceramic,
            &["thermalDestructionPoint", "compressiveStrength", "porosity"],
        );
        add(
            MaterialCategory::Plastic,
            &["thermalDestructionPoint", "flammability", "chemicalResistance"],
        );
        add(
            MaterialCategory::Composite,
            &["tensileStrength", "thermalDestructionPoint"],
        );
        add(
            MaterialCategory::Wood,
            &["flammability", "moistureResistance", "workability"],
        );
        add(
            MaterialCategory::Stone,
            &["compressiveStrength", "porosity", "weatherResistance"],
        );
        add(
            MaterialCategory::Glass,
            &["thermalDestructionPoint", "transparency", "scratchResistance"],
        );
        add(
            MaterialCategory::Semiconductor,
            &["bandGap", "electricalConductivity", "thermalDestructionPoint"],
        );
        add(
            MaterialCategory::Masonry,
            &["compressiveStrength", "waterAbsorption", "weatherResistance"],
        );

        Self { required }
    }

    pub fn from_map(required: BTreeMap<MaterialCategory, BTreeSet<String>>) -> Self {
        Self { required }
    }

    pub fn required_for(&self, category: MaterialCategory) -> Option<&BTreeSet<String>> {
        self.required.get(&category)
    }

    /// Universal set plus the category's own requirements. A category with no
    /// rule entry falls back to the universal set alone; that is a data gap,
    /// not an error.
    pub fn essential_for(&self, category: MaterialCategory) -> BTreeSet<String> {
        let mut essential: BTreeSet<String> =
            UNIVERSAL_REQUIRED.iter().map(|n| n.to_string()).collect();
        match self.required.get(&category) {
            Some(required) => essential.extend(required.iter().cloned()),
            None => {
                warn!(
                    category = %category,
                    "no category rule entry, falling back to universal required set"
                );
            }
        }
        essential
    }

    pub fn has_rules_for(&self, category: MaterialCategory) -> bool {
        self.required.contains_key(&category)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::builtin()
    }
}
