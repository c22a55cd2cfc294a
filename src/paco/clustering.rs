//! # Cluster Arena
//!
//! One side (rows or columns) of the co-clustering. Index sets live in an
//! append-only arena and are addressed by stable handles; the current
//! clustering is the ordered list of live handles.

/**
 * File: /src/paco/clustering.rs
 * Created Date: Monday, October 19th 2026
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Arena of index sets with handle-based merging
 */

use crate::paco::types::PacoError;
use crate::util::labels_to_groups;

/// Stable handle of an index set inside a `ClusterArena`
pub type ClusterId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterArena {
    /// Append-only storage, `sets[id]` never changes once written
    sets: Vec<Vec<usize>>,
    /// Current clustering, in order
    live: Vec<ClusterId>,
}

/// Restore point for `ClusterArena::restore`
#[derive(Debug, Clone)]
pub struct ArenaMark {
    len: usize,
    live: Vec<ClusterId>,
}

impl ClusterArena {
    pub fn from_groups(groups: Vec<Vec<usize>>) -> Self {
        let live = (0..groups.len()).collect();
        Self { sets: groups, live }
    }

    pub fn from_labels(labels: &[usize], k: usize) -> Result<Self, PacoError> {
        Ok(Self::from_groups(labels_to_groups(labels, k)?))
    }

    /// Number of live clusters
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn handle(&self, position: usize) -> Option<ClusterId> {
        self.live.get(position).copied()
    }

    pub fn members(&self, position: usize) -> Option<&[usize]> {
        self.handle(position).map(|id| self.sets[id].as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.live.iter().map(move |&id| self.sets[id].as_slice())
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.iter().map(|members| members.len()).collect()
    }

    /// Largest original index held by any live cluster
    pub fn max_index(&self) -> Option<usize> {
        self.iter().flat_map(|members| members.iter().copied()).max()
    }

    /// Merge the clusters at positions `i` and `j`.
    ///
    /// The union (members of `i` first) becomes the last cluster; the two
    /// originals leave the live list and the others keep their order.
    pub fn merge(&mut self, i: usize, j: usize) -> Result<ClusterId, PacoError> {
        let n = self.live.len();
        if i >= n || j >= n || i == j {
            return Err(PacoError::InvariantViolation(format!(
                "cannot merge clusters ({}, {}) out of {}",
                i, j, n
            )));
        }

        let (first, second) = (self.live[i], self.live[j]);
        let mut union = Vec::with_capacity(self.sets[first].len() + self.sets[second].len());
        union.extend_from_slice(&self.sets[first]);
        union.extend_from_slice(&self.sets[second]);

        let id = self.sets.len();
        self.sets.push(union);

        let mut position = 0;
        self.live.retain(|_| {
            let keep = position != i && position != j;
            position += 1;
            keep
        });
        self.live.push(id);
        Ok(id)
    }

    pub fn mark(&self) -> ArenaMark {
        ArenaMark {
            len: self.sets.len(),
            live: self.live.clone(),
        }
    }

    /// Roll back every merge made since `mark` was taken
    pub fn restore(&mut self, mark: ArenaMark) {
        self.sets.truncate(mark.len);
        self.live = mark.live;
    }

    pub fn to_groups(&self) -> Vec<Vec<usize>> {
        self.iter().map(|members| members.to_vec()).collect()
    }
}
