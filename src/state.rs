use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::Color32;

use country_clusters::cluster::summary::ClusterSummary;
use country_clusters::cluster::{self, ClusteringResult};
use country_clusters::data::filter::{
    filtered_indices, init_filter_state, region_label, region_labels, FilterState,
};
use country_clusters::data::loader;
use country_clusters::data::model::CountryDataset;
use country_clusters::PipelineConfig;

use crate::color::{cluster_color, ColorMap};

/// Upper bound of the cluster-count control.
pub const MAX_CLUSTERS: usize = 10;

/// What the point colours encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBy {
    Cluster,
    Region,
}

impl ColorBy {
    pub const ALL: [ColorBy; 2] = [ColorBy::Cluster, ColorBy::Region];

    pub fn label(self) -> &'static str {
        match self {
            ColorBy::Cluster => "Cluster",
            ColorBy::Region => "Region",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PipelineConfig,

    /// File the dataset was loaded from.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<CountryDataset>,

    /// Latest clustering of the dataset.
    pub clustering: Option<ClusteringResult>,

    pub summary: Option<ClusterSummary>,

    /// Selected regions.
    pub filters: FilterState,

    /// Indices into `clustering` passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    pub color_by: ColorBy,

    /// Region colours, rebuilt per clustering.
    pub region_colors: Option<ColorMap>,

    /// Value of the cluster-count control.
    pub n_clusters: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PipelineConfig) -> Self {
        let n_clusters = config.n_clusters.clamp(1, MAX_CLUSTERS);
        Self {
            config,
            source: None,
            dataset: None,
            clustering: None,
            summary: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            color_by: ColorBy::Cluster,
            region_colors: None,
            n_clusters,
            status_message: None,
        }
    }

    /// Load a country file and cluster it.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let countries = loader::load_countries(path)
            .with_context(|| format!("reading {}", path.display()))?;
        log::info!("Loaded {} countries from {}", countries.len(), path.display());
        self.source = Some(path.to_path_buf());
        self.set_dataset(CountryDataset::from_countries(countries));
        Ok(())
    }

    /// Ingest a newly loaded dataset and cluster it.
    pub fn set_dataset(&mut self, dataset: CountryDataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recluster();
    }

    /// Re-run clustering with the current `n_clusters`. Errors are kept in
    /// `status_message`.
    pub fn recluster(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };

        let kmeans = self.config.kmeans_with(self.n_clusters);
        match cluster::cluster_countries(&ds.countries, &kmeans) {
            Ok(result) => {
                self.filters = init_filter_state(&result.countries);
                self.region_colors = Some(ColorMap::new(&region_labels(&result.countries)));
                self.summary = Some(ClusterSummary::from_result(&result));
                self.clustering = Some(result);
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Clustering failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.clustering = None;
                self.summary = None;
                self.region_colors = None;
                self.visible_indices.clear();
            }
        }
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        if let Some(result) = &self.clustering {
            self.visible_indices = filtered_indices(&result.countries, &self.filters);
        }
    }

    pub fn toggle_region(&mut self, region: &str) {
        if !self.filters.remove(region) {
            self.filters.insert(region.to_string());
        }
        self.refilter();
    }

    pub fn select_all(&mut self) {
        if let Some(result) = &self.clustering {
            self.filters = init_filter_state(&result.countries);
            self.refilter();
        }
    }

    pub fn select_none(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    /// Colour of clustered row `idx` under the current `color_by`.
    pub fn color_for(&self, idx: usize) -> Color32 {
        let Some(result) = &self.clustering else {
            return Color32::GRAY;
        };
        match self.color_by {
            ColorBy::Cluster => cluster_color(result.labels[idx]),
            ColorBy::Region => self
                .region_colors
                .as_ref()
                .map(|cm| cm.color_for(region_label(&result.countries[idx])))
                .unwrap_or(Color32::GRAY),
        }
    }

    /// Write the current assignments as CSV.
    pub fn export_assignments(&self, path: &Path) -> Result<()> {
        let result = self
            .clustering
            .as_ref()
            .context("nothing clustered yet")?;
        loader::export_assignments_csv(path, result)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} assignments to {}", result.len(), path.display());
        Ok(())
    }
}
