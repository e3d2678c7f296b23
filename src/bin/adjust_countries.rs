//! Enrich stage: derive `population_density` for every country.

use anyhow::{Context, Result};

use country_clusters::data::{enrich, loader};
use country_clusters::PipelineConfig;

fn main() -> Result<()> {
    env_logger::init();
    let config = PipelineConfig::load().context("loading configuration")?;

    let mut countries = loader::load_countries(&config.raw_path)
        .with_context(|| format!("reading {}", config.raw_path.display()))?;
    enrich::add_population_density(&mut countries);

    let without = countries
        .iter()
        .filter(|c| c.population_density().is_none())
        .count();
    if without > 0 {
        log::warn!("{without} countries have no usable area; density set to null");
    }

    loader::save_countries(&config.adjusted_path, &countries)
        .with_context(|| format!("writing {}", config.adjusted_path.display()))?;

    println!("✓ Population density added to each country.");
    Ok(())
}
