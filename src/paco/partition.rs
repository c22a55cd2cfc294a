//! # Initial Partitioning
//!
//! Assigns every row and every column independently to one of `k` clusters
//! before the merge loop starts.

/**
 * File: /src/paco/partition.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Seeded k-means partitioner on top of linfa
 */

use linfa::prelude::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use log::debug;
use ndarray::ArrayView2;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;

use crate::paco::types::{PacoError, DEFAULT_SEED};

/// Produces one label in `0..k` per sample (row of `data`)
pub trait Partitioner: Send + Sync {
    fn partition(&self, data: ArrayView2<f64>, k: usize) -> Result<Vec<usize>, PacoError>;
    fn name(&self) -> &str;
}

/// Reject `k == 0` and `k` larger than the number of samples
pub fn check_cluster_count(n_samples: usize, k: usize) -> Result<(), PacoError> {
    if k == 0 {
        return Err(PacoError::Configuration(
            "cannot partition into 0 clusters".to_string(),
        ));
    }
    if k > n_samples {
        return Err(PacoError::Configuration(format!(
            "requested {} clusters but only {} samples are available",
            k, n_samples
        )));
    }
    Ok(())
}

/// Lloyd k-means with k-means++ seeding, reproducible through `seed`
#[derive(Debug, Clone)]
pub struct KMeansPartitioner {
    pub seed: u64,
    pub n_runs: usize,
    pub max_iter: u64,
    pub tolerance: f64,
}

impl Default for KMeansPartitioner {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_runs: 10,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

impl KMeansPartitioner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

impl Partitioner for KMeansPartitioner {
    fn partition(&self, data: ArrayView2<f64>, k: usize) -> Result<Vec<usize>, PacoError> {
        check_cluster_count(data.nrows(), k)?;

        let dataset = DatasetBase::from(data.to_owned());
        let rng = StdRng::seed_from_u64(self.seed);
        let model = KMeans::params_with_rng(k, rng)
            .n_runs(self.n_runs)
            .max_n_iterations(self.max_iter)
            .tolerance(self.tolerance)
            .fit(&dataset)
            .map_err(|e| PacoError::Partition(e.to_string()))?;

        let labels = model.predict(dataset.records()).to_vec();
        debug!(
            "k-means split {} samples into {} clusters",
            labels.len(),
            k
        );
        Ok(labels)
    }

    fn name(&self) -> &str {
        "k-means"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn two_groups() -> Array2<f64> {
        let mut data = Array2::zeros((10, 3));
        for i in 0..10 {
            let base = if i < 5 { 0.0 } else { 10.0 };
            for j in 0..3 {
                data[(i, j)] = base + 0.01 * (i * 3 + j) as f64;
            }
        }
        data
    }

    #[test]
    fn test_kmeans_separates_groups() {
        let labels = KMeansPartitioner::new(7).partition(two_groups().view(), 2).unwrap();
        assert_eq!(labels.len(), 10);
        assert!(labels[..5].iter().all(|&l| l == labels[0]));
        assert!(labels[5..].iter().all(|&l| l == labels[5]));
        assert_ne!(labels[0], labels[5]);
    }

    #[test]
    fn test_kmeans_is_deterministic_for_a_seed() {
        let data = two_groups();
        let partitioner = KMeansPartitioner::new(3);
        assert_eq!(
            partitioner.partition(data.view(), 3).unwrap(),
            partitioner.partition(data.view(), 3).unwrap()
        );
    }

    #[test]
    fn test_too_many_clusters() {
        let data = Array2::<f64>::zeros((3, 2));
        assert!(matches!(
            KMeansPartitioner::default().partition(data.view(), 4),
            Err(PacoError::Configuration(_))
        ));
        assert!(check_cluster_count(3, 0).is_err());
        assert!(check_cluster_count(3, 3).is_ok());
    }
}
