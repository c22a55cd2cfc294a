//! # Bi-Group Extraction
//!
//! Turns the final density matrix into a mask of the blocks worth using as
//! recommendation sources. Saturated blocks (density 1) carry nothing to
//! recommend and are masked from the start; the lowest-density blocks are then
//! masked one at a time for as long as every row keeps some density.

/**
 * File: /src/paco/bigroups.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Greedy covering filter over the density matrix
 */

use log::debug;
use ndarray::{Array2, ArrayView2, Axis};

/// Boolean matrix over the block grid, `true` = valid recommendation block
#[derive(Debug, Clone, PartialEq)]
pub struct BiGroupMask {
    valid: Array2<bool>,
}

impl BiGroupMask {
    /// Greedy covering filter.
    ///
    /// Repeatedly masks the smallest remaining density (first in row-major
    /// order on ties) and returns the mask as it was just before some row lost
    /// all of its remaining density. If a row has no density outside the
    /// saturated blocks to begin with, only the saturated blocks are masked.
    pub fn extract(density: ArrayView2<f64>) -> Self {
        let mut masked = density.mapv(|d| d == 1.0);
        if !Self::covers(density, masked.view()) {
            debug!("Some row has no unsaturated density, keeping every unsaturated block");
            return Self::from_masked(masked);
        }

        loop {
            let previous = masked.clone();
            let next = masked
                .indexed_iter()
                .filter(|&(_, &m)| !m)
                .map(|(idx, _)| (idx, density[idx]))
                .fold(None, |best: Option<((usize, usize), f64)>, (idx, d)| match best {
                    Some((_, b)) if b <= d => best,
                    _ => Some((idx, d)),
                });

            let Some((idx, _)) = next else {
                return Self::from_masked(previous);
            };
            masked[idx] = true;

            if !Self::covers(density, masked.view()) {
                return Self::from_masked(previous);
            }
        }
    }

    fn from_masked(masked: Array2<bool>) -> Self {
        Self {
            valid: masked.mapv(|m| !m),
        }
    }

    /// Every row keeps a positive density in some unmasked cell
    fn covers(density: ArrayView2<f64>, masked: ArrayView2<bool>) -> bool {
        density
            .axis_iter(Axis(0))
            .zip(masked.axis_iter(Axis(0)))
            .all(|(d_row, m_row)| {
                d_row
                    .iter()
                    .zip(m_row.iter())
                    .filter(|&(_, &m)| !m)
                    .map(|(&d, _)| d)
                    .sum::<f64>()
                    > 0.0
            })
    }

    pub fn valid(&self) -> ArrayView2<'_, bool> {
        self.valid.view()
    }

    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.valid.get((row, col)).copied().unwrap_or(false)
    }

    /// `(row_cluster, col_cluster)` of every valid block, row-major
    pub fn valid_blocks(&self) -> Vec<(usize, usize)> {
        self.valid
            .indexed_iter()
            .filter(|&(_, &v)| v)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    /// Every row owns a valid block with positive density
    pub fn covers_every_row(&self, density: ArrayView2<f64>) -> bool {
        self.valid.dim() == density.dim() && Self::covers(density, self.valid.mapv(|v| !v).view())
    }
}
