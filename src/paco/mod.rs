//! # PaCo: Hierarchical Co-clustering of Interaction Matrices
//!
//! Finds dense row-group × column-group blocks in a sparse user-item matrix.
//!
//! ## Algorithm Overview
//!
//! 1. **Partitioning**: rows and columns are clustered independently (k-means)
//! 2. **Block accounting**: cell and non-zero counts per block, density = ones / total
//! 3. **Merging**: the closest pair of row or column density profiles is merged,
//!    counts are folded incrementally
//! 4. **Stopping**: a merge is kept while its entropy delta stays within
//!    `mean ± 3·std` of all deltas seen so far; otherwise it is rolled back
//! 5. **Filtering**: a greedy cover keeps the blocks every row needs
//!
//! ## References
//! Vlachos, M., et al. (2014). "Improving Co-Cluster Quality with Application
//! to Product Recommendations." CIKM.

/**
 * File: /src/paco/mod.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Created PaCo module for density-driven co-clustering
 */

pub mod types;
pub mod clustering;
pub mod blocks;
pub mod entropy;
pub mod merge;
pub mod controller;
pub mod bigroups;
pub mod partition;
pub mod coclusterer;

pub use types::*;
pub use clustering::{ClusterArena, ClusterId};
pub use blocks::BlockCounts;
pub use entropy::entropy;
pub use merge::{choose_side, closest_pair, profile_distances, CoclusterState, Snapshot};
pub use controller::{within_band, ControllerOutcome, ConvergenceController};
pub use bigroups::BiGroupMask;
pub use partition::{KMeansPartitioner, Partitioner};
pub use coclusterer::{PacoCoclusterer, PacoResult};
