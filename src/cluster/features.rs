use serde_json::Value;

use super::Point;
use crate::data::model::Country;

/// The clustering input: one feature row per usable country.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    /// `[population_density, gini]` rows.
    pub features: Vec<Point>,
    /// The records the rows were taken from, in the same order.
    pub countries: Vec<Country>,
    pub names: Vec<String>,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Extract `[population_density, max(gini)]` for every country that has
/// both. Records that do not fit are skipped, never fatal.
pub fn prepare_clustering_data(countries: &[Country]) -> FeatureSet {
    let mut set = FeatureSet::default();

    for country in countries {
        let Some(density) = country.population_density() else {
            continue;
        };
        let Some(gini) = country.gini().and_then(max_gini) else {
            log::debug!("skipping {}: no usable Gini mapping", country.display_name());
            continue;
        };

        set.features.push([density, gini]);
        set.names.push(country.display_name());
        set.countries.push(country.clone());
    }

    set
}

/// Largest value of a year → Gini mapping. `None` for anything that is not
/// a non-empty mapping of numbers.
fn max_gini(gini: &Value) -> Option<f64> {
    let obj = gini.as_object().filter(|o| !o.is_empty())?;
    obj.values()
        .map(Value::as_f64)
        .try_fold(f64::NEG_INFINITY, |acc, v| Some(acc.max(v?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn country(value: Value) -> Country {
        match value {
            Value::Object(map) => Country::new(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn gini_feature_is_the_maximum_yearly_value() {
        let list = vec![country(json!({
            "name": "Brazil",
            "population_density": 25.1,
            "gini": { "2017": 53.3, "2019": 53.4, "2018": 53.9 }
        }))];

        let set = prepare_clustering_data(&list);
        assert_eq!(set.features, vec![[25.1, 53.9]]);
        assert_eq!(set.names, vec!["Brazil".to_string()]);
    }

    #[test]
    fn records_without_both_features_are_skipped() {
        let list = vec![
            country(json!({ "name": "null density", "population_density": null, "gini": { "2019": 30.0 } })),
            country(json!({ "name": "no density", "gini": { "2019": 30.0 } })),
            country(json!({ "name": "empty gini", "population_density": 10.0, "gini": {} })),
            country(json!({ "name": "flat gini", "population_density": 10.0, "gini": 30.0 })),
            country(json!({ "name": "text gini", "population_density": 10.0, "gini": { "2019": "n/a" } })),
            country(json!({ "name": "ok", "population_density": 10.0, "gini": { "2019": 30.0 } })),
        ];

        let set = prepare_clustering_data(&list);
        assert_eq!(set.len(), 1);
        assert_eq!(set.names, vec!["ok".to_string()]);
        assert_eq!(set.countries[0].name(), Some("ok"));
    }

    #[test]
    fn nameless_records_are_labelled_unknown() {
        let list = vec![country(json!({ "population_density": 1.0, "gini": { "2010": 40.0 } }))];
        let set = prepare_clustering_data(&list);
        assert_eq!(set.names, vec!["Unknown".to_string()]);
    }
}
