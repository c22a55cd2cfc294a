//! # PaCo Data Structures
//!
//! Configuration, state-machine and error types shared by the PaCo
//! co-clustering engine.

/**
 * File: /src/paco/types.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Created data structures for the PaCo merge loop
 */

use ndarray::Axis;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Seed handed to the partitioner when the configuration leaves it unset.
pub const DEFAULT_SEED: u64 = 42;

/// What happens to the entropy delta of a merge that failed the stopping test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetractionPolicy {
    /// Leave the rejected delta in the history
    Keep,
    /// Pop the rejected delta before halting
    Retract,
}

impl Default for RetractionPolicy {
    fn default() -> Self {
        RetractionPolicy::Keep
    }
}

/// Configuration parameters for a PaCo run
///
/// # Defaults
/// - 5 row clusters, 5 column clusters
/// - low-density threshold 0.008
/// - acceptance band of 3 standard deviations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacoConfig {
    /// Number of row clusters produced by the initial partitioning
    pub row_clusters: usize,
    /// Number of column clusters produced by the initial partitioning
    pub col_clusters: usize,
    /// Block densities strictly below this value are clamped to zero
    pub density_low: f64,
    /// Seed for the partitioner (None = `DEFAULT_SEED`)
    pub seed: Option<u64>,
    /// Treatment of the delta of a rejected merge
    pub retraction: RetractionPolicy,
    /// Use rayon for block counting and pairwise distances
    pub parallel: bool,
    /// Width of the acceptance band, in standard deviations
    pub rollback_sigma: f64,
}

impl Default for PacoConfig {
    fn default() -> Self {
        Self {
            row_clusters: 5,
            col_clusters: 5,
            density_low: 0.008,
            seed: None,
            retraction: RetractionPolicy::Keep,
            parallel: true,
            rollback_sigma: 3.0,
        }
    }
}

impl PacoConfig {
    pub fn new(row_clusters: usize, col_clusters: usize, density_low: f64) -> Self {
        Self {
            row_clusters,
            col_clusters,
            density_low,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_retraction(mut self, retraction: RetractionPolicy) -> Self {
        self.retraction = retraction;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Validate cluster counts, threshold range and band width
    pub fn validate(&self) -> Result<(), PacoError> {
        if self.row_clusters == 0 || self.col_clusters == 0 {
            return Err(PacoError::Configuration(format!(
                "cluster counts must be at least 1 (got {} rows, {} cols)",
                self.row_clusters, self.col_clusters
            )));
        }
        if !(0.0..=1.0).contains(&self.density_low) {
            return Err(PacoError::Configuration(format!(
                "density threshold {} is outside [0, 1]",
                self.density_low
            )));
        }
        if !(self.rollback_sigma > 0.0) {
            return Err(PacoError::Configuration(format!(
                "rollback sigma must be positive (got {})",
                self.rollback_sigma
            )));
        }
        Ok(())
    }
}

/// Side of the block grid a merge acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeAxis {
    Rows,
    Columns,
}

impl MergeAxis {
    /// ndarray axis holding the lanes of this side
    pub fn axis(self) -> Axis {
        match self {
            MergeAxis::Rows => Axis(0),
            MergeAxis::Columns => Axis(1),
        }
    }

    /// Axis along which a profile of this side runs
    pub fn other(self) -> MergeAxis {
        match self {
            MergeAxis::Rows => MergeAxis::Columns,
            MergeAxis::Columns => MergeAxis::Rows,
        }
    }
}

impl fmt::Display for MergeAxis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MergeAxis::Rows => write!(f, "rows"),
            MergeAxis::Columns => write!(f, "columns"),
        }
    }
}

/// Closest pair of clusters on one side, `pair.0 > pair.1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeCandidate {
    pub distance: f64,
    pub pair: (usize, usize),
}

impl MergeCandidate {
    pub fn new(distance: f64, i: usize, j: usize) -> Self {
        Self {
            distance,
            pair: (i, j),
        }
    }
}

/// States of the convergence controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    AcceptedStep,
    /// Last merge failed the stopping test and was undone
    RolledBack,
    /// One row cluster and one column cluster remain
    Exhausted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::RolledBack | RunState::Exhausted)
    }
}

/// Trace of one merge attempt
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub iteration: usize,
    pub axis: MergeAxis,
    pub pair: (usize, usize),
    pub distance: f64,
    /// None for the forced final merge, which is not scored
    pub entropy: Option<f64>,
    pub delta: Option<f64>,
    pub accepted: bool,
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised by the PaCo engine and its collaborators
#[derive(Debug)]
pub enum PacoError {
    Configuration(String),
    InvariantViolation(String),
    Partition(String),
}

impl fmt::Display for PacoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PacoError::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            PacoError::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
            PacoError::Partition(msg) => write!(f, "Partitioning error: {}", msg),
        }
    }
}

impl Error for PacoError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paco_config_default() {
        let config = PacoConfig::default();
        assert_eq!(config.row_clusters, 5);
        assert_eq!(config.col_clusters, 5);
        assert_eq!(config.density_low, 0.008);
        assert_eq!(config.retraction, RetractionPolicy::Keep);
        assert_eq!(config.rollback_sigma, 3.0);
        assert_eq!(config.seed_or_default(), DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_clusters() {
        let config = PacoConfig::new(0, 3, 0.1);
        match config.validate() {
            Err(PacoError::Configuration(msg)) => assert!(msg.contains("at least 1")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_rejects_threshold_out_of_range() {
        assert!(PacoConfig::new(2, 2, 1.5).validate().is_err());
        assert!(PacoConfig::new(2, 2, -0.1).validate().is_err());
        assert!(PacoConfig::new(2, 2, f64::NAN).validate().is_err());
        assert!(PacoConfig::new(2, 2, 0.0).validate().is_ok());
        assert!(PacoConfig::new(2, 2, 1.0).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_sigma() {
        let mut config = PacoConfig::new(2, 2, 0.1);
        config.rollback_sigma = 0.0;
        assert!(config.validate().is_err());
        config.rollback_sigma = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_axis_mapping() {
        assert_eq!(MergeAxis::Rows.axis(), Axis(0));
        assert_eq!(MergeAxis::Columns.axis(), Axis(1));
        assert_eq!(MergeAxis::Rows.other(), MergeAxis::Columns);
        assert_eq!(format!("{}", MergeAxis::Columns), "columns");
    }

    #[test]
    fn test_run_state_terminal() {
        assert!(!RunState::Running.is_terminal());
        assert!(!RunState::AcceptedStep.is_terminal());
        assert!(RunState::RolledBack.is_terminal());
        assert!(RunState::Exhausted.is_terminal());
    }

    #[test]
    fn test_paco_error_display() {
        let error = PacoError::InvariantViolation("row 7 out of range".to_string());
        let error_str = format!("{}", error);
        assert!(error_str.contains("Invariant violation"));
        assert!(error_str.contains("row 7"));
    }
}
