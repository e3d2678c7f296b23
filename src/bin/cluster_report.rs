//! Headless cluster stage: print the summary and, when `assignments_csv`
//! is configured, export the assignments.

use anyhow::{Context, Result};

use country_clusters::cluster::{self, summary::ClusterSummary};
use country_clusters::data::loader;
use country_clusters::PipelineConfig;

fn main() -> Result<()> {
    env_logger::init();
    let config = PipelineConfig::load().context("loading configuration")?;

    let countries = loader::load_countries(&config.adjusted_path)
        .with_context(|| format!("reading {}", config.adjusted_path.display()))?;
    let result = cluster::cluster_countries(&countries, &config.kmeans())
        .context("clustering countries")?;
    println!("✓ Clustering complete");

    print!("{}", ClusterSummary::from_result(&result));

    if let Some(out) = &config.assignments_csv {
        loader::export_assignments_csv(out, &result)
            .with_context(|| format!("writing {}", out.display()))?;
        println!("\n✓ Assignments written to {}", out.display());
    }
    Ok(())
}
