use serde_json::Value;

use super::model::Country;

/// Replace a nested `name` mapping with its `official` entry.
///
/// Records whose name is already a string, or a mapping without
/// `official`, are left alone. Returns the number of records processed.
pub fn simplify_name_field(countries: &mut [Country]) -> usize {
    for country in countries.iter_mut() {
        let official = match country.get("name") {
            Some(Value::Object(obj)) => obj.get("official").cloned(),
            _ => None,
        };
        if let Some(official) = official {
            country.set("name", official);
        }
    }
    countries.len()
}

/// Drop records whose `gini` is missing or empty. Returns how many were removed.
pub fn remove_missing_gini(countries: &mut Vec<Country>) -> usize {
    let before = countries.len();
    countries.retain(|c| {
        let keep = c.gini().is_some_and(is_truthy);
        if !keep {
            log::debug!("dropping {}: no Gini data", c.display_name());
        }
        keep
    });
    before - countries.len()
}

/// Null, `false`, zero, and empty strings/arrays/mappings count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
