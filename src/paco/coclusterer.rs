//! # PaCo Co-clusterer
//!
//! Entry point of the engine: partitions rows and columns, runs the merge
//! loop and filters the final bi-groups.

/**
 * File: /src/paco/coclusterer.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	PaCo facade tying partitioning, merging and filtering together
 */

use std::time::Instant;

use log::info;
use ndarray::{Array2, ArrayView2};

use crate::paco::bigroups::BiGroupMask;
use crate::paco::clustering::ClusterArena;
use crate::paco::controller::ConvergenceController;
use crate::paco::merge::CoclusterState;
use crate::paco::partition::{check_cluster_count, KMeansPartitioner, Partitioner};
use crate::paco::types::*;
use crate::util::groups_to_labels;

/// Everything a PaCo run produces
#[derive(Debug, Clone)]
pub struct PacoResult {
    /// Entropy of the kept state
    pub entropy: f64,
    /// Entropy before the first merge
    pub initial_entropy: f64,
    pub row_clusters: Vec<Vec<usize>>,
    pub col_clusters: Vec<Vec<usize>>,
    pub density: Array2<f64>,
    pub count_total: Array2<u64>,
    pub count_ones: Array2<u64>,
    pub coverage: BiGroupMask,
    /// Entropy deltas of every scored merge
    pub history: Vec<f64>,
    pub steps: Vec<StepRecord>,
    pub state: RunState,
}

impl PacoResult {
    /// Number of blocks in the final grid
    pub fn bi_group_count(&self) -> usize {
        self.row_clusters.len() * self.col_clusters.len()
    }

    /// Blocks whose density is neither 0 nor 1, `(row_cluster, col_cluster, density)`
    pub fn recommendation_candidates(&self) -> Vec<(usize, usize, f64)> {
        self.density
            .indexed_iter()
            .filter(|&(_, &d)| d != 0.0 && d != 1.0)
            .map(|((i, j), &d)| (i, j, d))
            .collect()
    }

    /// Final cluster label of every row, None if `n_rows` does not match
    pub fn row_labels(&self, n_rows: usize) -> Option<Vec<usize>> {
        groups_to_labels(&self.row_clusters, n_rows)
    }

    pub fn col_labels(&self, n_cols: usize) -> Option<Vec<usize>> {
        groups_to_labels(&self.col_clusters, n_cols)
    }

    pub fn summary(&self) -> String {
        let mut summary = format!("Final entropy: {:.6}", self.entropy);
        summary.push_str(&format!(
            "\nNumber of rows: {} | Number of columns: {}",
            self.row_clusters.len(),
            self.col_clusters.len()
        ));
        summary.push_str(&format!("\nNumber of bi-groups: {}", self.bi_group_count()));
        summary.push_str(&format!(
            "\nNumber of bi-groups needing recommendations: {}",
            self.recommendation_candidates().len()
        ));
        summary.push_str(&format!(
            "\nValid bi-groups after filtering: {}",
            self.coverage.count()
        ));
        summary.push_str(&format!("\nStopped: {:?} after {} steps", self.state, self.steps.len()));
        summary
    }
}

pub struct PacoCoclusterer {
    config: PacoConfig,
    partitioner: Box<dyn Partitioner>,
}

impl PacoCoclusterer {
    /// Co-clusterer with the seeded k-means partitioner
    pub fn new(config: PacoConfig) -> Result<Self, PacoError> {
        let partitioner = KMeansPartitioner::new(config.seed_or_default());
        Self::with_partitioner(config, Box::new(partitioner))
    }

    pub fn with_partitioner(
        config: PacoConfig,
        partitioner: Box<dyn Partitioner>,
    ) -> Result<Self, PacoError> {
        config.validate()?;
        Ok(Self {
            config,
            partitioner,
        })
    }

    pub fn config(&self) -> &PacoConfig {
        &self.config
    }

    /// Partition rows and columns, then merge and filter
    pub fn run(&self, matrix: &Array2<f64>) -> Result<PacoResult, PacoError> {
        let (n_rows, n_cols) = matrix.dim();
        check_cluster_count(n_rows, self.config.row_clusters)?;
        check_cluster_count(n_cols, self.config.col_clusters)?;

        let start = Instant::now();
        let row_labels = self
            .partitioner
            .partition(matrix.view(), self.config.row_clusters)?;
        let col_labels = self
            .partitioner
            .partition(matrix.t(), self.config.col_clusters)?;
        info!(
            "[method: paco] [{}] {} partitioning done in {:?}",
            crate::timestamp(),
            self.partitioner.name(),
            start.elapsed()
        );

        self.run_with_labels(matrix.view(), &row_labels, &col_labels)
    }

    /// Merge and filter starting from externally computed labels
    pub fn run_with_labels(
        &self,
        matrix: ArrayView2<f64>,
        row_labels: &[usize],
        col_labels: &[usize],
    ) -> Result<PacoResult, PacoError> {
        let (n_rows, n_cols) = matrix.dim();
        if row_labels.len() != n_rows || col_labels.len() != n_cols {
            return Err(PacoError::InvariantViolation(format!(
                "got {} row / {} column labels for a {}x{} matrix",
                row_labels.len(),
                col_labels.len(),
                n_rows,
                n_cols
            )));
        }

        let start = Instant::now();
        let rows = ClusterArena::from_labels(row_labels, self.config.row_clusters)?;
        let cols = ClusterArena::from_labels(col_labels, self.config.col_clusters)?;
        let mut state = CoclusterState::new(
            matrix,
            rows,
            cols,
            self.config.density_low,
            self.config.parallel,
        )?;
        info!(
            "[method: paco] [{}] Block counts ready for a {}x{} grid in {:?}",
            crate::timestamp(),
            self.config.row_clusters,
            self.config.col_clusters,
            start.elapsed()
        );

        let outcome = ConvergenceController::new(&self.config).run(&mut state)?;
        let (rows, cols, counts, density) = state.into_parts();
        let coverage = BiGroupMask::extract(density.view());
        info!(
            "[method: paco] [{}] Merge loop stopped ({:?}) at entropy {:.6}, {}x{} grid, {} valid bi-groups",
            crate::timestamp(),
            outcome.state,
            outcome.entropy,
            rows.len(),
            cols.len(),
            coverage.count()
        );

        Ok(PacoResult {
            entropy: outcome.entropy,
            initial_entropy: outcome.initial_entropy,
            row_clusters: rows.to_groups(),
            col_clusters: cols.to_groups(),
            count_total: counts.total().to_owned(),
            count_ones: counts.ones().to_owned(),
            density,
            coverage,
            history: outcome.history,
            steps: outcome.steps,
            state: outcome.state,
        })
    }
}
