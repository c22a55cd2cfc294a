/*
 * File: /matrix.rs
 * Created Date: Thursday November 23rd 2023
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026 3:12:40 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Grid with lane folding for the PaCo count matrices
 */

use std::ops::{Add, Index, IndexMut};

use ndarray::{concatenate, Array1, Array2, ArrayView2, Axis};

use crate::paco::types::PacoError;

/// Dense 2-D buffer whose lanes can be folded together.
///
/// Folding sums two lanes into a new trailing lane and compacts the rest,
/// so the grid shrinks by exactly one along the folded axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Array2<T>,
}

impl<T> Grid<T> {
    pub fn new(data: Array2<T>) -> Grid<T> {
        Grid { data }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.data.get((row, col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.data.get_mut((row, col))
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<T> {
        self.data
    }
}

impl<T> Grid<T>
where
    T: Clone + Add<Output = T>,
{
    /// Replace lanes `i` and `j` along `axis` by their sum, appended last.
    ///
    /// The remaining lanes keep their relative order.
    pub fn fold(&mut self, axis: Axis, i: usize, j: usize) -> Result<(), PacoError> {
        let n = self.data.len_of(axis);
        if i >= n || j >= n || i == j {
            return Err(PacoError::InvariantViolation(format!(
                "cannot fold lanes ({}, {}) of axis {} with length {}",
                i, j, axis.index(), n
            )));
        }

        let merged: Array1<T> = &self.data.index_axis(axis, i) + &self.data.index_axis(axis, j);
        let keep: Vec<usize> = (0..n).filter(|&k| k != i && k != j).collect();
        let kept = self.data.select(axis, &keep);

        self.data = concatenate(axis, &[kept.view(), merged.view().insert_axis(axis)])
            .map_err(|e| PacoError::InvariantViolation(format!("fold reshaping failed: {}", e)))?;
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.data[index]
    }
}
