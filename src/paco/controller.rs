//! # Convergence Controller
//!
//! Drives the merge loop. Every merge attempt is preceded by a snapshot; the
//! entropy delta of the merge is appended to the history and the merge is kept
//! only while the delta stays inside `mean ± sigma·std` of that history.
//!
//! ```text
//! Running --merge--> AcceptedStep --> Running
//!    |                  (delta inside band)
//!    +--merge--> RolledBack   (delta outside band, snapshot restored)
//!    +--merge--> Exhausted    (1 row cluster x 1 column cluster)
//! ```

/**
 * File: /src/paco/controller.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Entropy-driven merge loop with snapshot rollback
 */

use log::{debug, info};
use statrs::statistics::Statistics;

use crate::paco::entropy::entropy;
use crate::paco::merge::CoclusterState;
use crate::paco::types::*;

/// `mean - sigma·std <= delta <= mean + sigma·std` over `history`
/// (population standard deviation).
///
/// A history holding only `delta` always passes.
pub fn within_band(history: &[f64], delta: f64, sigma: f64) -> bool {
    if history.is_empty() {
        return true;
    }
    let mean = history.iter().mean();
    let std = history.iter().population_std_dev();
    mean - sigma * std <= delta && delta <= mean + sigma * std
}

/// Result of driving a `CoclusterState` to a terminal state
#[derive(Debug, Clone)]
pub struct ControllerOutcome {
    /// Entropy of the state that was kept
    pub entropy: f64,
    pub initial_entropy: f64,
    pub history: Vec<f64>,
    pub steps: Vec<StepRecord>,
    pub state: RunState,
    /// Merges that remain applied to the final state
    pub merges: usize,
}

pub struct ConvergenceController {
    sigma: f64,
    retraction: RetractionPolicy,
    parallel: bool,
    state: RunState,
    history: Vec<f64>,
    steps: Vec<StepRecord>,
    epoch: usize,
}

impl ConvergenceController {
    pub fn new(config: &PacoConfig) -> Self {
        Self {
            sigma: config.rollback_sigma,
            retraction: config.retraction,
            parallel: config.parallel,
            state: RunState::Running,
            history: Vec::new(),
            steps: Vec::new(),
            epoch: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Merge until the stopping test fails or nothing is left to merge.
    ///
    /// Runs at most `(R0 - 1) + (C0 - 1)` merge attempts.
    pub fn run(mut self, st: &mut CoclusterState) -> Result<ControllerOutcome, PacoError> {
        let bound = st.rows().len().saturating_sub(1) + st.cols().len().saturating_sub(1);
        let initial_entropy = entropy(st.density());
        let mut previous = initial_entropy;
        let mut merges = 0;

        self.state = if st.is_exhausted() {
            RunState::Exhausted
        } else {
            RunState::Running
        };

        while !self.state.is_terminal() {
            if self.steps.len() >= bound {
                return Err(PacoError::InvariantViolation(format!(
                    "merge loop exceeded its bound of {} iterations",
                    bound
                )));
            }
            self.state = self.step(st, &mut previous)?;
            match self.state {
                RunState::AcceptedStep => {
                    merges += 1;
                    self.state = RunState::Running;
                }
                RunState::Exhausted => merges += 1,
                _ => {}
            }
        }

        Ok(ControllerOutcome {
            entropy: previous,
            initial_entropy,
            history: self.history,
            steps: self.steps,
            state: self.state,
            merges,
        })
    }

    fn step(&mut self, st: &mut CoclusterState, previous: &mut f64) -> Result<RunState, PacoError> {
        let iteration = self.steps.len();
        let snapshot = st.snapshot();
        let (row, col) = st.select(self.parallel);
        debug!("Closest rows {:?}, closest columns {:?}", row, col);
        let (axis, candidate) = st.merge(row, col)?;

        let mut record = StepRecord {
            iteration,
            axis,
            pair: candidate.pair,
            distance: candidate.distance,
            entropy: None,
            delta: None,
            accepted: true,
        };

        // the last forced merge is never tested
        if st.is_exhausted() {
            self.steps.push(record);
            info!("Single bi-cluster left after {} merges", iteration + 1);
            return Ok(RunState::Exhausted);
        }

        let current = entropy(st.density());
        let delta = current - *previous;
        self.history.push(delta);
        let accepted = within_band(&self.history, delta, self.sigma);

        record.entropy = Some(current);
        record.delta = Some(delta);
        record.accepted = accepted;
        self.steps.push(record);

        if accepted {
            info!("Epoch:: {} | Entropy:: {:.6}", self.epoch, current);
            self.epoch += 1;
            *previous = current;
            Ok(RunState::AcceptedStep)
        } else {
            st.restore(snapshot);
            if self.retraction == RetractionPolicy::Retract {
                self.history.pop();
            }
            info!(
                "Rolled back merge of {} {:?}: entropy delta {:.6} left the {}-sigma band",
                axis, candidate.pair, delta, self.sigma
            );
            Ok(RunState::RolledBack)
        }
    }
}
