use serde_json::Value;

use super::model::Country;

/// `population / area` rounded to one decimal place.
///
/// Rounds the exact binary value of the quotient, so `23 / 20` (stored as
/// 1.1499…) gives 1.1 and exact ties such as 1.25 go to even.
///
/// `None` when the area is missing or zero, or when the population is
/// missing.
pub fn population_density(population: Option<f64>, area: Option<f64>) -> Option<f64> {
    let area = area.filter(|a| *a != 0.0)?;
    let density = population? / area;
    format!("{density:.1}").parse().ok()
}

/// Set `population_density` on every record, `null` where it cannot be derived.
pub fn add_population_density(countries: &mut [Country]) {
    for country in countries.iter_mut() {
        let density = population_density(country.population(), country.area());
        let value = density
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        country.set("population_density", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn density_rounds_to_one_decimal() {
        assert_eq!(population_density(Some(1000.0), Some(3.0)), Some(333.3));
        assert_eq!(population_density(Some(2000.0), Some(3.0)), Some(666.7));
        assert_eq!(population_density(Some(19116209.0), Some(756102.0)), Some(25.3));
    }

    #[test]
    fn rounding_follows_the_stored_quotient() {
        assert_eq!(population_density(Some(23.0), Some(20.0)), Some(1.1));
        assert_eq!(population_density(Some(29.0), Some(20.0)), Some(1.4));
        assert_eq!(population_density(Some(1.0), Some(4.0)), Some(0.2));
        assert_eq!(population_density(Some(5.0), Some(4.0)), Some(1.2));
        assert_eq!(population_density(Some(3.0), Some(4.0)), Some(0.8));
    }

    #[test]
    fn zero_or_missing_area_gives_none() {
        assert_eq!(population_density(Some(1000.0), Some(0.0)), None);
        assert_eq!(population_density(Some(1000.0), None), None);
        assert_eq!(population_density(None, Some(10.0)), None);
    }

    #[test]
    fn density_is_written_as_number_or_null() {
        let mut list: Vec<Country> = [
            json!({ "name": "a", "population": 500, "area": 10.0 }),
            json!({ "name": "b", "population": 500, "area": 0 }),
            json!({ "name": "c", "population": 500 }),
        ]
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => Country::new(map),
            _ => unreachable!(),
        })
        .collect();

        add_population_density(&mut list);

        assert_eq!(list[0].get("population_density"), Some(&json!(50.0)));
        assert_eq!(list[1].get("population_density"), Some(&Value::Null));
        assert_eq!(list[2].get("population_density"), Some(&Value::Null));
    }
}
