use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cluster::kmeans::KMeans;
use crate::error::{PipelineError, Result};

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "country-clusters.json";

pub const DEFAULT_API_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,population,area,gini,region";

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// File locations and clustering parameters shared by every stage.
///
/// Any field missing from the override file keeps its default:
///
/// ```json
/// { "n_clusters": 3, "adjusted_path": "data/adjusted.json" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub api_url: String,
    /// Written by fetch, rewritten in place by clean, read by enrich.
    pub raw_path: PathBuf,
    /// Written by enrich, read by the cluster stage.
    pub adjusted_path: PathBuf,
    /// Where `cluster_report` writes per-country assignments, if anywhere.
    pub assignments_csv: Option<PathBuf>,
    pub n_clusters: usize,
    pub seed: u64,
    pub n_init: usize,
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            raw_path: PathBuf::from("countriesListOutput.json"),
            adjusted_path: PathBuf::from("adjustedCountriesListOutput.json"),
            assignments_csv: None,
            n_clusters: 4,
            seed: 42,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
        }
    }
}

impl PipelineConfig {
    /// Load [`CONFIG_FILE`] from the working directory, or defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("{CONFIG_FILE} not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| PipelineError::json(path, e))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// K-means parameters for the configured cluster count.
    pub fn kmeans(&self) -> KMeans {
        self.kmeans_with(self.n_clusters)
    }

    /// K-means parameters with an explicit cluster count (viewer override).
    pub fn kmeans_with(&self, n_clusters: usize) -> KMeans {
        KMeans::new(n_clusters)
            .seed(self.seed)
            .n_init(self.n_init)
            .max_iter(self.max_iter)
            .tol(self.tol)
    }
}
