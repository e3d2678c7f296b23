//! Fetch stage: download the country list and write it as JSON.

use anyhow::{Context, Result};

use country_clusters::data::{fetch, loader};
use country_clusters::PipelineConfig;

fn main() -> Result<()> {
    env_logger::init();
    let config = PipelineConfig::load().context("loading configuration")?;

    let countries = fetch::fetch_countries(&config.api_url)
        .with_context(|| format!("fetching {}", config.api_url))?;
    log::info!("Fetched {} records", countries.len());

    loader::save_records(&config.raw_path, &countries)
        .with_context(|| format!("writing {}", config.raw_path.display()))?;

    println!("Data written to {}", config.raw_path.display());
    Ok(())
}
