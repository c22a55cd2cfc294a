//! # Entropy Scorer
//!
//! Normalized Shannon entropy of a density matrix, used as the merge-quality
//! signal of the convergence controller.

/**
 * File: /src/paco/entropy.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Normalized entropy of the block density matrix
 */

use ndarray::ArrayView2;

/// `-Σ p·log2(p) / log2(R·C)` with `p = density / Σ density`.
///
/// Returns 0 for an all-zero matrix and for a single-cell grid.
pub fn entropy(density: ArrayView2<f64>) -> f64 {
    let cells = density.len();
    let total = density.sum();
    if cells < 2 || total <= 0.0 {
        return 0.0;
    }

    let h: f64 = density
        .iter()
        .filter(|&&d| d > 0.0)
        .map(|&d| {
            let p = d / total;
            -p * p.log2()
        })
        .sum();

    h / (cells as f64).log2()
}
