use std::collections::BTreeMap;

use crate::domain::material::MaterialCategory;

/// Plausible physical bounds per (category, property), used to attach
/// `min`/`max` to quantitative records when the research step supplies none.
#[derive(Debug, Clone)]
pub struct CategoryRanges {
    ranges: BTreeMap<MaterialCategory, BTreeMap<String, (f64, f64)>>,
}

impl CategoryRanges {
    pub fn builtin() -> Self {
        use MaterialCategory::*;

        let mut ranges: BTreeMap<MaterialCategory, BTreeMap<String, (f64, f64)>> =
            BTreeMap::new();
        let mut add = |category: MaterialCategory, property: &str, min: f64, max: f64| {
            ranges
                .entry(category)
                .or_default()
                .insert(property.to_string(), (min, max));
        };

        // density in g/cm3
        add(Metal, "density", 0.5, 22.6);
        add(Ceramic, "density", 2.0, 6.0);
        add(Plastic, "density", 0.8, 2.2);
        add(Composite, "density", 1.0, 3.0);
        add(Wood, "density", 0.1, 1.4);
        add(Stone, "density", 1.5, 3.5);
        add(Glass, "density", 2.2, 7.5);
        add(Semiconductor, "density", 2.3, 7.3);
        add(Masonry, "density", 1.0, 2.8);

        // thermalConductivity in W/(m*K)
        add(Metal, "thermalConductivity", 6.0, 430.0);
        add(Ceramic, "thermalConductivity", 1.0, 200.0);
        add(Plastic, "thermalConductivity", 0.1, 0.6);
        add(Composite, "thermalConductivity", 0.2, 60.0);
        add(Wood, "thermalConductivity", 0.04, 0.4);
        add(Stone, "thermalConductivity", 1.0, 8.0);
        add(Glass, "thermalConductivity", 0.8, 1.4);
        add(Semiconductor, "thermalConductivity", 1.0, 490.0);
        add(Masonry, "thermalConductivity", 0.3, 2.0);

        // hardness on the Mohs scale
        for category in MaterialCategory::ALL {
            add(category, "hardness", 1.0, 10.0);
        }

        // reflectivity as a fraction
        for category in MaterialCategory::ALL {
            add(category, "reflectivity", 0.0, 1.0);
        }

        // thermalDestructionPoint in degrees C
        add(Metal, "thermalDestructionPoint", -39.0, 3422.0);
        add(Ceramic, "thermalDestructionPoint", 1000.0, 3900.0);
        add(Plastic, "thermalDestructionPoint", 80.0, 400.0);
        add(Composite, "thermalDestructionPoint", 150.0, 2000.0);
        add(Glass, "thermalDestructionPoint", 500.0, 1700.0);
        add(Semiconductor, "thermalDestructionPoint", 200.0, 2830.0);

        // tensileStrength in MPa
        add(Metal, "tensileStrength", 30.0, 2500.0);
        add(Composite, "tensileStrength", 50.0, 7000.0);

        // compressiveStrength in MPa
        add(Ceramic, "compressiveStrength", 100.0, 5000.0);
        add(Stone, "compressiveStrength", 20.0, 400.0);
        add(Masonry, "compressiveStrength", 5.0, 100.0);

        // porosity / waterAbsorption as percentages
        add(Ceramic, "porosity", 0.0, 60.0);
        add(Stone, "porosity", 0.0, 40.0);
        add(Masonry, "waterAbsorption", 0.0, 30.0);

        // electricalConductivity in MS/m
        add(Metal, "electricalConductivity", 0.1, 63.0);
        add(Semiconductor, "electricalConductivity", 0.0, 0.1);

        // bandGap in eV
        add(Semiconductor, "bandGap", 0.1, 6.0);

        Self { ranges }
    }

    pub fn from_map(
        ranges: BTreeMap<MaterialCategory, BTreeMap<String, (f64, f64)>>,
    ) -> Self {
        Self { ranges }
    }

    pub fn lookup(&self, category: MaterialCategory, property: &str) -> Option<(f64, f64)> {
        self.ranges
            .get(&category)
            .and_then(|per_property| per_property.get(property))
            .copied()
    }
}

impl Default for CategoryRanges {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let ranges = CategoryRanges::builtin();
        assert_eq!(
            ranges.lookup(MaterialCategory::Metal, "density"),
            Some((0.5, 22.6))
        );
        assert_eq!(ranges.lookup(MaterialCategory::Wood, "bandGap"), None);
    }

    #[test]
    fn test_universal_numeric_properties_have_ranges_everywhere() {
        let ranges = CategoryRanges::builtin();
        for category in MaterialCategory::ALL {
            assert!(ranges.lookup(category, "hardness").is_some());
            assert!(ranges.lookup(category, "reflectivity").is_some());
            assert!(ranges.lookup(category, "density").is_some());
            assert!(ranges.lookup(category, "thermalConductivity").is_some());
        }
    }
}
