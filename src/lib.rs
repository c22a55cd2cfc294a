/**
 * File: /src/lib.rs
 * Created Date: Monday, January 22nd 2024
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026 11:02:41 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Library root for the PaCo co-clustering engine
 */
pub mod config;
pub mod matrix;
pub mod paco;
pub mod util;

use chrono::Local;
use log::LevelFilter;

pub use paco::{
    BiGroupMask, BlockCounts, ClusterArena, CoclusterState, ConvergenceController,
    KMeansPartitioner, MergeAxis, MergeCandidate, PacoCoclusterer, PacoConfig, PacoError,
    PacoResult, Partitioner, RetractionPolicy, RunState, StepRecord,
};

pub(crate) fn timestamp() -> String {
    // Get the current time
    Local::now().format("%H:%M:%S").to_string()
}

/// Install the stdout logger used by the binary.
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    simple_logger::SimpleLogger::new().with_level(level).init()
}
