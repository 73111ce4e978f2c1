use serde_json::Value;

/// Recursively merges two schema trees. Maps merge key-wise; on any other
/// conflict the specific value overrides the base. Independent of any
/// concrete schema format.
pub fn deep_merge(base: &Value, specific: &Value) -> Value {
    match (base, specific) {
        (Value::Object(base_map), Value::Object(specific_map)) => {
            let mut merged = base_map.clone();
            for (key, specific_value) in specific_map {
                let value = match merged.get(key) {
                    Some(base_value) => deep_merge(base_value, specific_value),
                    None => specific_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        _ => specific.clone(),
    }
}
