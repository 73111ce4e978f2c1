use serde_json::Value;

use crate::domain::MaterialRecord;
use crate::error::Result;
use crate::schema::SchemaResolver;
use crate::validation::issue::{Phase, Severity, ValidationIssue};
use crate::validation::phases::PhaseOutcome;

/// Structural compliance of the record against the resolved schema: required
/// top-level fields, and the per-property stored contract.
pub struct SchemaComplianceCheck {
    resolver: SchemaResolver,
}

impl SchemaComplianceCheck {
    pub fn new(resolver: SchemaResolver) -> Self {
        Self { resolver }
    }

    pub fn run(&self, material: &MaterialRecord) -> Result<PhaseOutcome> {
        let mut outcome = PhaseOutcome::clean();
        let phase = Phase::Schema;

        let schema = self.resolver.resolve_for_category(material.category);
        let document = serde_json::to_value(material)?;

        for field in string_list(&schema.tree, &["required"]) {
            let present = match document.get(&field) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            };
            if !present {
                outcome.push(
                    ValidationIssue::new(
                        phase,
                        Severity::High,
                        format!("required field '{}' is missing or empty", field),
                    )
                    .with_field_path(field),
                );
            }
        }

        let property_required = string_list(&schema.tree, &["property", "required"]);
        let numeric_requires_unit = schema
            .tree
            .pointer("/property/numeric_requires_unit")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if let Some(properties) = document.get("properties").and_then(Value::as_object) {
            for (name, entry) in properties {
                let path = format!("properties.{}", name);
                for key in &property_required {
                    if entry.get(key).map(Value::is_null).unwrap_or(true) {
                        outcome.push(
                            ValidationIssue::new(
                                phase,
                                Severity::Medium,
                                format!("property '{}' is missing '{}'", name, key),
                            )
                            .with_field_path(format!("{}.{}", path, key)),
                        );
                    }
                }
                if numeric_requires_unit
                    && entry.get("value").map(Value::is_number).unwrap_or(false)
                {
                    let unit_missing = entry
                        .get("unit")
                        .and_then(Value::as_str)
                        .map(str::is_empty)
                        .unwrap_or(true);
                    if unit_missing {
                        outcome.push(
                            ValidationIssue::new(
                                phase,
                                Severity::Medium,
                                format!("numeric property '{}' has no unit", name),
                            )
                            .with_field_path(format!("{}.unit", path)),
                        );
                    }
                }
            }
        }

        Ok(outcome)
    }
}

fn string_list(tree: &Value, path: &[&str]) -> Vec<String> {
    let mut node = tree;
    for segment in path {
        match node.get(segment) {
            Some(next) => node = next,
            None => return Vec::new(),
        }
    }
    node.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
