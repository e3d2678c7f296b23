//! Lloyd's k-means with greedy k-means++ seeding.
//!
//! Runs `n_init` independent restarts from one seeded RNG and keeps the
//! run with the lowest inertia, so a given seed always yields the same
//! partition.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Point, DIMS};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    pub n_clusters: usize,
    pub seed: u64,
    /// Independent restarts; the best one wins.
    pub n_init: usize,
    pub max_iter: usize,
    /// Relative tolerance on the squared centroid shift.
    pub tol: f64,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            seed: 42,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Cluster `data`, returning the best of `n_init` runs.
    pub fn fit(&self, data: &[Point]) -> Result<KMeansFit> {
        if self.n_clusters == 0 {
            return Err(PipelineError::NoClusters);
        }
        if data.len() < self.n_clusters {
            return Err(PipelineError::TooFewSamples {
                clusters: self.n_clusters,
                samples: data.len(),
            });
        }

        let tol = self.tol * mean_variance(data);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<KMeansFit> = None;

        for run in 0..self.n_init {
            let init = kmeans_plus_plus(data, self.n_clusters, &mut rng);
            let fit = lloyd(data, init, self.max_iter, tol);
            log::debug!(
                "k-means run {run}: inertia {:.4} after {} iterations",
                fit.inertia,
                fit.n_iter
            );
            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        best.ok_or(PipelineError::NoClusters)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster index per input row.
    pub labels: Vec<usize>,
    pub centroids: Vec<Point>,
    /// Sum of squared distances to the assigned centroid.
    pub inertia: f64,
    pub n_iter: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn squared_distance(a: &Point, b: &Point) -> f64 {
    (0..DIMS).map(|d| (a[d] - b[d]).powi(2)).sum()
}

/// (index, squared distance) of the closest centroid.
fn nearest(p: &Point, centroids: &[Point]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, squared_distance(p, c)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

fn mean_variance(data: &[Point]) -> f64 {
    let n = data.len() as f64;
    let total: f64 = (0..DIMS)
        .map(|d| {
            let mean = data.iter().map(|p| p[d]).sum::<f64>() / n;
            data.iter().map(|p| (p[d] - mean).powi(2)).sum::<f64>() / n
        })
        .sum();
    total / DIMS as f64
}

/// Pick an index with probability proportional to `weights`.
fn sample_weighted(weights: &[f64], rng: &mut StdRng) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.random_range(0..weights.len());
    }
    let mut target = rng.random::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        if target < *w {
            return i;
        }
        target -= w;
    }
    weights.len() - 1
}

/// Greedy k-means++: each new centroid is the best of several D²-weighted
/// candidates, judged by the resulting total potential.
fn kmeans_plus_plus(data: &[Point], k: usize, rng: &mut StdRng) -> Vec<Point> {
    let n_trials = 2 + (k as f64).ln() as usize;
    let mut centroids = Vec::with_capacity(k);
    centroids.push(data[rng.random_range(0..data.len())]);

    let mut closest: Vec<f64> = data
        .iter()
        .map(|p| squared_distance(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let mut best: Option<(usize, f64, Vec<f64>)> = None;
        for _ in 0..n_trials {
            let candidate = sample_weighted(&closest, rng);
            let updated: Vec<f64> = data
                .iter()
                .zip(closest.iter())
                .map(|(p, &d)| d.min(squared_distance(p, &data[candidate])))
                .collect();
            let potential: f64 = updated.iter().sum();
            if best.as_ref().map_or(true, |b| potential < b.1) {
                best = Some((candidate, potential, updated));
            }
        }
        if let Some((idx, _, updated)) = best {
            centroids.push(data[idx]);
            closest = updated;
        }
    }

    centroids
}

fn assign(data: &[Point], centroids: &[Point], labels: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (label, p) in labels.iter_mut().zip(data) {
        let (idx, dist) = nearest(p, centroids);
        *label = idx;
        inertia += dist;
    }
    inertia
}

fn compute_centroids(data: &[Point], labels: &[usize], k: usize) -> (Vec<Point>, Vec<usize>) {
    let mut sums = vec![[0.0; DIMS]; k];
    let mut counts = vec![0usize; k];
    for (p, &label) in data.iter().zip(labels) {
        counts[label] += 1;
        for d in 0..DIMS {
            sums[label][d] += p[d];
        }
    }
    let centroids = sums
        .into_iter()
        .zip(counts.iter())
        .map(|(sum, &count)| {
            if count > 0 {
                sum.map(|s| s / count as f64)
            } else {
                sum
            }
        })
        .collect();
    (centroids, counts)
}

/// Move the points farthest from their centroid into empty clusters.
fn relocate_empty(
    data: &[Point],
    labels: &mut [usize],
    centroids: &[Point],
    counts: &[usize],
) -> bool {
    let empty: Vec<usize> = (0..counts.len()).filter(|&c| counts[c] == 0).collect();
    if empty.is_empty() {
        return false;
    }

    let mut by_distance: Vec<(usize, f64)> = data
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(i, (p, &l))| (i, squared_distance(p, &centroids[l])))
        .collect();
    by_distance.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut counts = counts.to_vec();
    let mut far = by_distance.into_iter();
    for cluster in empty {
        // Never empty a donor cluster to fill another.
        for (idx, _) in far.by_ref() {
            if counts[labels[idx]] > 1 {
                counts[labels[idx]] -= 1;
                labels[idx] = cluster;
                counts[cluster] += 1;
                break;
            }
        }
    }
    true
}

fn lloyd(data: &[Point], mut centroids: Vec<Point>, max_iter: usize, tol: f64) -> KMeansFit {
    let k = centroids.len();
    let mut labels = vec![0usize; data.len()];
    let mut previous: Option<Vec<usize>> = None;
    let mut n_iter = 0;

    for _ in 0..max_iter {
        n_iter += 1;
        assign(data, &centroids, &mut labels);

        let (mut updated, counts) = compute_centroids(data, &labels, k);
        if relocate_empty(data, &mut labels, &centroids, &counts) {
            updated = compute_centroids(data, &labels, k).0;
        }

        let shift: f64 = centroids
            .iter()
            .zip(updated.iter())
            .map(|(a, b)| squared_distance(a, b))
            .sum();
        centroids = updated;

        if previous.as_deref() == Some(labels.as_slice()) || shift <= tol {
            break;
        }
        previous = Some(labels.clone());
    }

    // Final assignment so labels agree with the returned centroids.
    let inertia = assign(data, &centroids, &mut labels);

    KMeansFit {
        labels,
        centroids,
        inertia,
        n_iter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Point> {
        vec![
            [0.0, 0.0],
            [0.1, 0.2],
            [-0.1, 0.1],
            [10.0, 10.0],
            [10.2, 9.9],
            [9.8, 10.1],
            [0.0, 10.0],
            [0.1, 9.8],
            [-0.2, 10.1],
        ]
    }

    #[test]
    fn separates_well_separated_blobs() {
        let data = blobs();
        let fit = KMeans::new(3).fit(&data).unwrap();

        for group in data.chunks(3).zip(fit.labels.chunks(3)) {
            let labels = group.1;
            assert!(labels.iter().all(|&l| l == labels[0]), "{labels:?}");
        }
        assert_ne!(fit.labels[0], fit.labels[3]);
        assert_ne!(fit.labels[0], fit.labels[6]);
        assert_ne!(fit.labels[3], fit.labels[6]);
        assert!(fit.inertia < 1.0);
    }

    #[test]
    fn same_seed_same_partition() {
        let data = blobs();
        let a = KMeans::new(2).seed(7).fit(&data).unwrap();
        let b = KMeans::new(2).seed(7).fit(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn one_cluster_per_point_has_zero_inertia() {
        let data = vec![[1.0, 1.0], [2.0, 2.0], [3.0, 5.0]];
        let fit = KMeans::new(3).fit(&data).unwrap();
        assert!(fit.inertia.abs() < 1e-12);
        let mut labels = fit.labels.clone();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn single_cluster_centroid_is_the_mean() {
        let data = vec![[0.0, 0.0], [2.0, 4.0], [4.0, 2.0]];
        let fit = KMeans::new(1).fit(&data).unwrap();
        assert_eq!(fit.labels, vec![0, 0, 0]);
        assert!((fit.centroids[0][0] - 2.0).abs() < 1e-12);
        assert!((fit.centroids[0][1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_points_do_not_panic() {
        let data = vec![[1.0, 1.0]; 5];
        let fit = KMeans::new(2).fit(&data).unwrap();
        assert_eq!(fit.labels.len(), 5);
        assert!(fit.inertia.abs() < 1e-12);
    }

    #[test]
    fn zero_clusters_is_rejected() {
        let err = KMeans::new(0).fit(&blobs()).unwrap_err();
        assert!(matches!(err, PipelineError::NoClusters));
    }

    #[test]
    fn more_clusters_than_samples_is_rejected() {
        let err = KMeans::new(4).fit(&[[0.0, 0.0], [1.0, 1.0]]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TooFewSamples {
                clusters: 4,
                samples: 2
            }
        ));
    }
}
