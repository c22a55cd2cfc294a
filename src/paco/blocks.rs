//! # Block Accounting
//!
//! Per-block cell counts over the row-cluster × column-cluster grid.
//! `total[i][j]` is the number of cells in block (i, j) and `ones[i][j]` the
//! number of non-zero interactions inside it. Counts are built from the raw
//! matrix exactly once and afterwards only folded.

/**
 * File: /src/paco/blocks.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Block counts, density and incremental folding
 */

use log::debug;
use ndarray::{Array2, ArrayView2, Zip};
use rayon::prelude::*;

use crate::matrix::Grid;
use crate::paco::clustering::ClusterArena;
use crate::paco::types::{MergeAxis, PacoError};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockCounts {
    total: Grid<u64>,
    ones: Grid<u64>,
}

impl BlockCounts {
    /// Count every block by enumerating the cross product of its members.
    pub fn initialize(
        matrix: ArrayView2<f64>,
        rows: &ClusterArena,
        cols: &ClusterArena,
        parallel: bool,
    ) -> Result<Self, PacoError> {
        let (n_rows, n_cols) = matrix.dim();
        if rows.max_index().map_or(false, |m| m >= n_rows) {
            return Err(PacoError::InvariantViolation(format!(
                "row clustering references index {:?} but the matrix has {} rows",
                rows.max_index(),
                n_rows
            )));
        }
        if cols.max_index().map_or(false, |m| m >= n_cols) {
            return Err(PacoError::InvariantViolation(format!(
                "column clustering references index {:?} but the matrix has {} columns",
                cols.max_index(),
                n_cols
            )));
        }

        let (r, c) = (rows.len(), cols.len());
        let row_sets: Vec<&[usize]> = rows.iter().collect();
        let col_sets: Vec<&[usize]> = cols.iter().collect();

        let count_block = |block: usize| -> (u64, u64) {
            let members_r = row_sets[block / c];
            let members_c = col_sets[block % c];
            let ones = members_r
                .iter()
                .map(|&i| members_c.iter().filter(|&&j| matrix[(i, j)] != 0.0).count())
                .sum::<usize>();
            ((members_r.len() * members_c.len()) as u64, ones as u64)
        };

        let counts: Vec<(u64, u64)> = if parallel {
            (0..r * c).into_par_iter().map(count_block).collect()
        } else {
            (0..r * c).map(count_block).collect()
        };
        let (total, ones): (Vec<u64>, Vec<u64>) = counts.into_iter().unzip();

        debug!("Initialized block counts for a {}x{} grid", r, c);
        Self::from_counts(
            Array2::from_shape_vec((r, c), total)
                .map_err(|e| PacoError::InvariantViolation(e.to_string()))?,
            Array2::from_shape_vec((r, c), ones)
                .map_err(|e| PacoError::InvariantViolation(e.to_string()))?,
        )
    }

    /// Build from precomputed count matrices of identical shape
    pub fn from_counts(total: Array2<u64>, ones: Array2<u64>) -> Result<Self, PacoError> {
        if total.dim() != ones.dim() {
            return Err(PacoError::InvariantViolation(format!(
                "count matrices disagree in shape: {:?} vs {:?}",
                total.dim(),
                ones.dim()
            )));
        }
        Ok(Self {
            total: Grid::new(total),
            ones: Grid::new(ones),
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.total.shape()
    }

    pub fn total(&self) -> ArrayView2<'_, u64> {
        self.total.view()
    }

    pub fn ones(&self) -> ArrayView2<'_, u64> {
        self.ones.view()
    }

    /// `ones / total` per block; empty blocks and values below `threshold` give 0.
    pub fn recompute_density(&self, threshold: f64) -> Array2<f64> {
        Zip::from(self.total.view())
            .and(self.ones.view())
            .map_collect(|&total, &ones| {
                if total == 0 {
                    return 0.0;
                }
                let density = ones as f64 / total as f64;
                if density < threshold {
                    0.0
                } else {
                    density
                }
            })
    }

    /// Sum lanes `i` and `j` of both matrices along `axis` into a trailing lane.
    pub fn fold(&mut self, axis: MergeAxis, i: usize, j: usize) -> Result<(), PacoError> {
        self.total.fold(axis.axis(), i, j)?;
        self.ones.fold(axis.axis(), i, j)?;
        debug!("Folded {} {} and {} -> grid {:?}", axis, i, j, self.shape());
        Ok(())
    }

    /// `total[i][j] == |rows_i| * |cols_j|` for every block
    pub fn is_consistent_with(&self, rows: &ClusterArena, cols: &ClusterArena) -> bool {
        if self.shape() != (rows.len(), cols.len()) {
            return false;
        }
        let row_sizes = rows.sizes();
        let col_sizes = cols.sizes();
        self.total
            .view()
            .indexed_iter()
            .all(|((i, j), &t)| t == (row_sizes[i] * col_sizes[j]) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn uniform_grid() -> BlockCounts {
        BlockCounts::from_counts(
            Array2::from_elem((4, 4), 10),
            array![[10, 0, 0, 0], [0, 10, 0, 0], [0, 0, 5, 5], [0, 0, 5, 5]],
        )
        .unwrap()
    }

    #[test]
    fn test_initialize_counts() {
        let matrix = array![
            [1.0, 0.0, 2.0, 0.0],
            [0.0, 0.0, 3.0, 1.0],
            [4.0, 5.0, 0.0, 0.0],
        ];
        let rows = ClusterArena::from_groups(vec![vec![0, 1], vec![2]]);
        let cols = ClusterArena::from_groups(vec![vec![0, 1], vec![2, 3]]);

        for parallel in [false, true] {
            let counts = BlockCounts::initialize(matrix.view(), &rows, &cols, parallel).unwrap();
            assert_eq!(counts.total(), array![[4u64, 4], [2, 2]]);
            assert_eq!(counts.ones(), array![[1u64, 3], [2, 0]]);
            assert!(counts.is_consistent_with(&rows, &cols));
        }
    }

    #[test]
    fn test_initialize_rejects_foreign_indices() {
        let matrix = Array2::<f64>::zeros((2, 2));
        let rows = ClusterArena::from_groups(vec![vec![0, 5]]);
        let cols = ClusterArena::from_groups(vec![vec![0, 1]]);
        assert!(matches!(
            BlockCounts::initialize(matrix.view(), &rows, &cols, false),
            Err(PacoError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_density_of_uniform_grid() {
        let density = uniform_grid().recompute_density(0.0);
        assert_eq!(
            density,
            array![
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.5, 0.5],
                [0.0, 0.0, 0.5, 0.5],
            ]
        );
    }

    #[test]
    fn test_density_threshold_and_empty_blocks() {
        let counts =
            BlockCounts::from_counts(array![[0, 100], [10, 10]], array![[0, 1], [5, 10]]).unwrap();
        let density = counts.recompute_density(0.05);
        // 1/100 is below the threshold, 0/0 is an empty block
        assert_eq!(density, array![[0.0, 0.0], [0.5, 1.0]]);
        // values equal to the threshold survive
        assert_eq!(counts.recompute_density(0.5), array![[0.0, 0.0], [0.5, 1.0]]);
    }

    #[test]
    fn test_fold_rows_matches_reaggregation() {
        let mut counts = uniform_grid();
        counts.fold(MergeAxis::Rows, 3, 2).unwrap();
        assert_eq!(counts.shape(), (3, 4));
        assert_eq!(counts.ones().row(2), array![0u64, 0, 10, 10]);
        assert_eq!(counts.total().row(2), array![20u64, 20, 20, 20]);
        assert_eq!(counts.recompute_density(0.0).row(2), array![0.0, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_fold_against_fresh_count() {
        let matrix = array![
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let mut rows = ClusterArena::from_groups(vec![vec![0], vec![1], vec![2, 3]]);
        let mut cols = ClusterArena::from_groups(vec![vec![0], vec![1], vec![2]]);
        let mut counts = BlockCounts::initialize(matrix.view(), &rows, &cols, false).unwrap();

        rows.merge(2, 0).unwrap();
        counts.fold(MergeAxis::Rows, 2, 0).unwrap();
        cols.merge(1, 0).unwrap();
        counts.fold(MergeAxis::Columns, 1, 0).unwrap();

        let fresh = BlockCounts::initialize(matrix.view(), &rows, &cols, false).unwrap();
        assert_eq!(counts, fresh);
        assert!(counts.is_consistent_with(&rows, &cols));
    }

    #[test]
    fn test_fold_rejects_out_of_range() {
        let mut counts = uniform_grid();
        assert!(matches!(
            counts.fold(MergeAxis::Columns, 4, 0),
            Err(PacoError::InvariantViolation(_))
        ));
        assert_eq!(counts, uniform_grid());
    }
}
