//! Clean stage: flatten names, then drop countries without Gini data.
//! The raw file is rewritten in place.

use anyhow::{Context, Result};

use country_clusters::data::{clean, loader};
use country_clusters::PipelineConfig;

fn main() -> Result<()> {
    env_logger::init();
    let config = PipelineConfig::load().context("loading configuration")?;
    let path = config.raw_path.as_path();

    let mut countries = loader::load_countries(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let processed = clean::simplify_name_field(&mut countries);
    loader::save_countries(path, &countries)
        .with_context(|| format!("writing {}", path.display()))?;

    println!("✓ Name field simplified: {processed} countries processed.");
    println!("✓ File saved to: {}", path.display());

    let mut countries = loader::load_countries(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let removed = clean::remove_missing_gini(&mut countries);
    loader::save_countries(path, &countries)
        .with_context(|| format!("writing {}", path.display()))?;

    log::info!("{} countries kept", countries.len());
    println!("✓ Removed {removed} countries with a zero or missing Gini index.");
    Ok(())
}
