/**
 * File: /src/util.rs
 * Created Date: Tuesday, June 18th 2024
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026 10:41:02 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Label/cluster-list conversion for PaCo
**/
use crate::paco::types::PacoError;

/// Group indices by label: `groups[label]` lists every index carrying `label`.
///
/// Labels that never occur give empty groups.
pub fn labels_to_groups(labels: &[usize], k: usize) -> Result<Vec<Vec<usize>>, PacoError> {
    let mut groups = vec![Vec::new(); k];
    for (idx, &label) in labels.iter().enumerate() {
        match groups.get_mut(label) {
            Some(group) => group.push(idx),
            None => {
                return Err(PacoError::InvariantViolation(format!(
                    "label {} of index {} is out of range for {} clusters",
                    label, idx, k
                )))
            }
        }
    }
    Ok(groups)
}

/// Inverse of `labels_to_groups`. None if the groups are not a partition of `0..n`.
pub fn groups_to_labels(groups: &[Vec<usize>], n: usize) -> Option<Vec<usize>> {
    let mut labels = vec![usize::MAX; n];
    for (label, group) in groups.iter().enumerate() {
        for &idx in group {
            match labels.get_mut(idx) {
                Some(slot) if *slot == usize::MAX => *slot = label,
                _ => return None,
            }
        }
    }
    if labels.iter().any(|&l| l == usize::MAX) {
        return None;
    }
    Some(labels)
}

/// Every index of `0..n` appears in exactly one group
pub fn is_partition(groups: &[Vec<usize>], n: usize) -> bool {
    groups_to_labels(groups, n).is_some()
}
