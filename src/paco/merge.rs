//! # Merge Selection and Execution
//!
//! The selector compares the density profiles of every pair of clusters on
//! each side and reports the closest pair. The executor commits the cheaper of
//! the two candidates: it unions the index sets, folds the count matrices and
//! recomputes the density.

/**
 * File: /src/paco/merge.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Pairwise profile distances, merge choice and commit
 */

use log::debug;
use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::paco::blocks::BlockCounts;
use crate::paco::clustering::{ArenaMark, ClusterArena};
use crate::paco::types::{MergeAxis, MergeCandidate, PacoError};

/// Euclidean distances between the density profiles of one side.
///
/// Each entry is divided by the profile length (the size of the other axis)
/// so row and column distances share a scale.
pub fn profile_distances(density: ArrayView2<f64>, side: MergeAxis, parallel: bool) -> Array2<f64> {
    let axis = side.axis();
    let n = density.len_of(axis);
    let scale = density.len_of(side.other().axis()) as f64;

    let distance = |idx: usize| -> f64 {
        let (a, b) = (idx / n, idx % n);
        if a == b || scale == 0.0 {
            return 0.0;
        }
        let squared: f64 = density
            .index_axis(axis, a)
            .iter()
            .zip(density.index_axis(axis, b).iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum();
        squared.sqrt() / scale
    };

    let cells: Vec<f64> = if parallel {
        (0..n * n).into_par_iter().map(distance).collect()
    } else {
        (0..n * n).map(distance).collect()
    };
    Array2::from_shape_vec((n, n), cells).unwrap_or_else(|_| Array2::zeros((n, n)))
}

/// Smallest entry of the strictly lower triangle.
///
/// Ties keep the first pair met in row-major order. None below two clusters.
pub fn closest_pair(distances: ArrayView2<f64>) -> Option<MergeCandidate> {
    let mut best: Option<MergeCandidate> = None;
    for i in 0..distances.nrows() {
        for j in 0..i.min(distances.ncols()) {
            let d = distances[(i, j)];
            if best.map_or(!d.is_nan(), |b| d < b.distance) {
                best = Some(MergeCandidate::new(d, i, j));
            }
        }
    }
    best
}

/// Pick the side to merge: strictly smaller distance wins, ties go to columns.
pub fn choose_side(
    row: Option<MergeCandidate>,
    col: Option<MergeCandidate>,
) -> Option<(MergeAxis, MergeCandidate)> {
    match (row, col) {
        (Some(r), Some(c)) if r.distance < c.distance => Some((MergeAxis::Rows, r)),
        (_, Some(c)) => Some((MergeAxis::Columns, c)),
        (Some(r), None) => Some((MergeAxis::Rows, r)),
        (None, None) => None,
    }
}

/// Mutable state of one run: both clusterings, their block counts and the
/// derived density.
#[derive(Debug, Clone)]
pub struct CoclusterState {
    rows: ClusterArena,
    cols: ClusterArena,
    counts: BlockCounts,
    density: Array2<f64>,
    density_low: f64,
}

/// Copy of the state taken before a merge attempt
#[derive(Debug, Clone)]
pub struct Snapshot {
    density: Array2<f64>,
    counts: BlockCounts,
    rows: ArenaMark,
    cols: ArenaMark,
}

impl CoclusterState {
    pub fn new(
        matrix: ArrayView2<f64>,
        rows: ClusterArena,
        cols: ClusterArena,
        density_low: f64,
        parallel: bool,
    ) -> Result<Self, PacoError> {
        let counts = BlockCounts::initialize(matrix, &rows, &cols, parallel)?;
        let density = counts.recompute_density(density_low);
        Ok(Self {
            rows,
            cols,
            counts,
            density,
            density_low,
        })
    }

    pub fn rows(&self) -> &ClusterArena {
        &self.rows
    }

    pub fn cols(&self) -> &ClusterArena {
        &self.cols
    }

    pub fn counts(&self) -> &BlockCounts {
        &self.counts
    }

    pub fn density(&self) -> ArrayView2<'_, f64> {
        self.density.view()
    }

    /// One row cluster and one column cluster left
    pub fn is_exhausted(&self) -> bool {
        self.rows.len() <= 1 && self.cols.len() <= 1
    }

    /// Closest row pair and closest column pair
    pub fn select(&self, parallel: bool) -> (Option<MergeCandidate>, Option<MergeCandidate>) {
        let row_distances = profile_distances(self.density.view(), MergeAxis::Rows, parallel);
        let col_distances = profile_distances(self.density.view(), MergeAxis::Columns, parallel);
        (
            closest_pair(row_distances.view()),
            closest_pair(col_distances.view()),
        )
    }

    /// Commit the better of the two candidates
    pub fn merge(
        &mut self,
        row: Option<MergeCandidate>,
        col: Option<MergeCandidate>,
    ) -> Result<(MergeAxis, MergeCandidate), PacoError> {
        let (side, candidate) = choose_side(row, col).ok_or_else(|| {
            PacoError::InvariantViolation("no pair left to merge on either side".to_string())
        })?;
        self.merge_pair(side, candidate.pair.0, candidate.pair.1)?;
        Ok((side, candidate))
    }

    /// Merge clusters `i` and `j` of `side`.
    pub fn merge_pair(&mut self, side: MergeAxis, i: usize, j: usize) -> Result<(), PacoError> {
        let clustering = match side {
            MergeAxis::Rows => &mut self.rows,
            MergeAxis::Columns => &mut self.cols,
        };
        let n = clustering.len();
        if i >= n || j >= n || i == j {
            return Err(PacoError::InvariantViolation(format!(
                "merge of {} ({}, {}) with {} clusters",
                side, i, j, n
            )));
        }

        clustering.merge(i, j)?;
        self.counts.fold(side, i, j)?;
        self.density = self.counts.recompute_density(self.density_low);
        debug!(
            "Merged {} ({}, {}), grid is now {:?}",
            side,
            i,
            j,
            self.counts.shape()
        );
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            density: self.density.clone(),
            counts: self.counts.clone(),
            rows: self.rows.mark(),
            cols: self.cols.mark(),
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.density = snapshot.density;
        self.counts = snapshot.counts;
        self.rows.restore(snapshot.rows);
        self.cols.restore(snapshot.cols);
    }

    pub fn into_parts(self) -> (ClusterArena, ClusterArena, BlockCounts, Array2<f64>) {
        (self.rows, self.cols, self.counts, self.density)
    }
}
