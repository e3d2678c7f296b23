//! Runs the stages back to back over files in a temporary directory, the
//! way an operator chains the binaries.

use reqwest::StatusCode;
use serde_json::{json, Value};

use country_clusters::cluster::{self, kmeans::KMeans, summary::ClusterSummary};
use country_clusters::data::{clean, enrich, fetch, loader};

fn api_response() -> String {
    json!([
        {
            "name": { "common": "Brazil", "official": "Federative Republic of Brazil" },
            "population": 212559409, "area": 8515767.0, "region": "Americas",
            "gini": { "2019": 53.4 }
        },
        {
            "name": { "common": "Chile", "official": "Republic of Chile" },
            "population": 19116209, "area": 756102.0, "region": "Americas",
            "gini": { "2017": 44.4 }
        },
        {
            "name": { "common": "Bangladesh", "official": "People's Republic of Bangladesh" },
            "population": 164689383, "area": 147570.0, "region": "Asia",
            "gini": { "2016": 32.4 }
        },
        {
            "name": { "common": "Netherlands", "official": "Kingdom of the Netherlands" },
            "population": 16655799, "area": 41850.0, "region": "Europe",
            "gini": { "2018": 28.1 }
        },
        {
            "name": { "common": "Antarctica", "official": "Antarctica" },
            "population": 1000, "area": 14000000.0, "region": "Antarctic",
            "gini": {}
        },
        {
            "name": { "common": "Bouvet Island", "official": "Bouvet Island" },
            "population": 0, "area": 0, "region": "Antarctic",
            "gini": { "2000": 10.0 }
        }
    ])
    .to_string()
}

#[test]
fn fetch_clean_enrich_cluster() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("countriesListOutput.json");
    let adjusted = dir.path().join("adjustedCountriesListOutput.json");
    let csv_path = dir.path().join("assignments.csv");

    // fetch
    let records = fetch::records_from_response("test", StatusCode::OK, &api_response()).unwrap();
    loader::save_records(&raw, &records).unwrap();

    // clean, in place
    let mut countries = loader::load_countries(&raw).unwrap();
    assert_eq!(clean::simplify_name_field(&mut countries), 6);
    loader::save_countries(&raw, &countries).unwrap();

    let mut countries = loader::load_countries(&raw).unwrap();
    assert_eq!(clean::remove_missing_gini(&mut countries), 1);
    loader::save_countries(&raw, &countries).unwrap();

    // enrich
    let mut countries = loader::load_countries(&raw).unwrap();
    enrich::add_population_density(&mut countries);
    loader::save_countries(&adjusted, &countries).unwrap();

    let text = std::fs::read_to_string(&adjusted).unwrap();
    assert!(text.contains("\"name\": \"Republic of Chile\""));
    assert!(text.contains("\"population_density\": null"));

    // cluster
    let countries = loader::load_countries(&adjusted).unwrap();
    let chile = countries.iter().find(|c| c.name() == Some("Republic of Chile")).unwrap();
    assert_eq!(chile.population_density(), Some(25.3));

    let result = cluster::cluster_countries(&countries, &KMeans::new(2)).unwrap();
    // Bouvet Island has no density, Antarctica was dropped for missing Gini.
    assert_eq!(result.len(), 4);
    assert_eq!(result.centroids.len(), 2);

    let summary = ClusterSummary::from_result(&result);
    let listed: usize = summary.groups.iter().map(|g| g.names.len()).sum();
    assert_eq!(listed, 4);
    assert!(summary.to_string().contains("CLUSTERING SUMMARY"));

    loader::export_assignments_csv(&csv_path, &result).unwrap();
    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("name,population_density,gini,cluster"));
    assert_eq!(lines.count(), 4);
}

#[test]
fn failed_fetch_is_written_as_data() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("countriesListOutput.json");

    let records =
        fetch::records_from_response("test", StatusCode::NOT_FOUND, "Not Found").unwrap();
    loader::save_records(&raw, &records).unwrap();

    let loaded = loader::load_records(&raw).unwrap();
    assert_eq!(loaded, vec![Value::String("Error: 404 - Not Found".into())]);
    assert!(loader::load_countries(&raw).is_err());
}

#[test]
fn unknown_fields_survive_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");

    let records = vec![json!({
        "name": { "official": "Republic of Peru" },
        "population": 32971846, "area": 1285216.0,
        "gini": { "2019": 41.5 },
        "capital": ["Lima"]
    })];
    loader::save_records(&path, &records).unwrap();

    let mut countries = loader::load_countries(&path).unwrap();
    clean::simplify_name_field(&mut countries);
    enrich::add_population_density(&mut countries);
    loader::save_countries(&path, &countries).unwrap();

    let reloaded = loader::load_countries(&path).unwrap();
    assert_eq!(reloaded[0].get("capital"), Some(&json!(["Lima"])));
    assert_eq!(reloaded[0].population_density(), Some(25.7));
}
