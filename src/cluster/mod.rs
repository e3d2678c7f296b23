/// Clustering stage: countries → feature rows → standardised → k-means.
///
/// ```text
///   Vec<Country>
///        │  features::prepare_clustering_data
///        ▼
///   [density, gini] rows
///        │  scaler::StandardScaler
///        ▼
///   scaled rows ──kmeans::KMeans──► labels, scaled centroids
///                                        │  inverse_transform
///                                        ▼
///                               centroids in original units
/// ```

pub mod features;
pub mod kmeans;
pub mod scaler;
pub mod summary;

use crate::data::model::Country;
use crate::error::Result;

use features::{prepare_clustering_data, FeatureSet};
use kmeans::KMeans;
use scaler::StandardScaler;

/// Number of features per country: population density and Gini index.
pub const DIMS: usize = 2;

/// One feature row.
pub type Point = [f64; DIMS];

/// Everything the summary, the viewer and the CSV export need.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    pub countries: Vec<Country>,
    pub names: Vec<String>,
    /// Unscaled `[population_density, gini]` rows.
    pub features: Vec<Point>,
    /// Standardised rows k-means ran on; distances and inertia are in these units.
    pub scaled_features: Vec<Point>,
    /// Fitted scaler, for mapping further points into the clustering space.
    pub scaler: StandardScaler,
    pub labels: Vec<usize>,
    /// Centroids as k-means returned them, in standardised units.
    pub centroids_scaled: Vec<Point>,
    /// Centroids mapped back to density / Gini units.
    pub centroids: Vec<Point>,
    pub inertia: f64,
    pub n_clusters: usize,
}

impl ClusteringResult {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row indices assigned to `cluster`.
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |(_, &l)| l == cluster)
            .map(|(i, _)| i)
    }
}

/// Standardise the features, run k-means, and back-transform the centroids.
pub fn perform_clustering(set: FeatureSet, kmeans: &KMeans) -> Result<ClusteringResult> {
    let (scaler, scaled_features) = StandardScaler::fit_transform(&set.features);
    let fit = kmeans.fit(&scaled_features)?;
    let centroids = scaler.inverse_transform(&fit.centroids);

    log::info!(
        "Clustered {} countries into {} groups (inertia {:.3}, {} iterations)",
        set.len(),
        kmeans.n_clusters,
        fit.inertia,
        fit.n_iter
    );

    Ok(ClusteringResult {
        countries: set.countries,
        names: set.names,
        features: set.features,
        scaled_features,
        scaler,
        labels: fit.labels,
        centroids_scaled: fit.centroids,
        centroids,
        inertia: fit.inertia,
        n_clusters: kmeans.n_clusters,
    })
}

/// Feature extraction followed by [`perform_clustering`].
pub fn cluster_countries(countries: &[Country], kmeans: &KMeans) -> Result<ClusteringResult> {
    let set = prepare_clustering_data(countries);
    log::info!(
        "{} of {} countries have both density and Gini data",
        set.len(),
        countries.len()
    );
    perform_clustering(set, kmeans)
}
