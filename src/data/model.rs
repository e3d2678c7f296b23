use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Label used when a record has no usable name.
pub const UNKNOWN_NAME: &str = "Unknown";

// ---------------------------------------------------------------------------
// Country – one record of the dataset
// ---------------------------------------------------------------------------

/// A single country record.
///
/// Records stay loosely typed: the JSON object is kept as-is so that fields
/// the pipeline does not know about survive a load/save cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub fields: Map<String, Value>,
}

impl Country {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw access to any field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    /// The country name: a plain string, or the `official` entry when the
    /// name is still the nested mapping returned by the API.
    pub fn name(&self) -> Option<&str> {
        match self.fields.get("name")? {
            Value::String(s) => Some(s),
            Value::Object(obj) => obj.get("official")?.as_str(),
            _ => None,
        }
    }

    /// Name for display, falling back to [`UNKNOWN_NAME`].
    pub fn display_name(&self) -> String {
        self.name().unwrap_or(UNKNOWN_NAME).to_string()
    }

    pub fn population(&self) -> Option<f64> {
        self.fields.get("population")?.as_f64()
    }

    pub fn area(&self) -> Option<f64> {
        self.fields.get("area")?.as_f64()
    }

    /// The `gini` field as stored (usually a year → value mapping).
    pub fn gini(&self) -> Option<&Value> {
        self.fields.get("gini")
    }

    pub fn region(&self) -> Option<&str> {
        self.fields.get("region")?.as_str()
    }

    /// `None` for both a missing field and an explicit `null`.
    pub fn population_density(&self) -> Option<f64> {
        self.fields.get("population_density")?.as_f64()
    }
}

// ---------------------------------------------------------------------------
// CountryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All loaded countries plus the set of regions they span.
#[derive(Debug, Clone, Default)]
pub struct CountryDataset {
    pub countries: Vec<Country>,
    /// Sorted unique `region` values.
    pub regions: BTreeSet<String>,
}

impl CountryDataset {
    pub fn from_countries(countries: Vec<Country>) -> Self {
        let regions = countries
            .iter()
            .filter_map(|c| c.region())
            .map(str::to_string)
            .collect();
        CountryDataset { countries, regions }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
