// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape plus its derived stride table, and coordinate translation.

use crate::{BoundsPolicy, Shape, TensorError, Window};

/// A root shape together with its row-major strides.
///
/// Strides are derived once from the shape and never mutated. A root tensor
/// wraps its layout in an `Arc` and every view derived from it shares that
/// same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Vec<usize>,
}

impl Layout {
    /// Derives the stride table for `shape`.
    pub fn new(shape: Shape) -> Self {
        let strides = shape.strides();
        Self { shape, strides }
    }

    /// The root shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Row-major strides, one per axis.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Translates view-local `coords` into a flat buffer offset.
    ///
    /// Each coordinate is shifted by the window start on its axis, checked
    /// against the window end under `policy`, then weighted by that axis's
    /// stride. Axes are checked independently.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `coords` is empty or its length
    ///   differs from the rank.
    /// - [`TensorError::IndexOutOfRange`] on the first axis whose shifted
    ///   coordinate exceeds the window end.
    pub fn offset(
        &self,
        window: &Window,
        coords: &[usize],
        policy: BoundsPolicy,
    ) -> Result<usize, TensorError> {
        let rank = self.rank();
        if coords.is_empty() || coords.len() != rank {
            return Err(TensorError::invalid(format!(
                "please provide indices: expected {rank} coordinates, got {}",
                coords.len()
            )));
        }

        let mut offset = 0usize;
        for (axis, &index) in coords.iter().enumerate() {
            let start = window.start()[axis];
            let end = window.end()[axis];
            let out_of_range = TensorError::IndexOutOfRange {
                axis,
                index,
                start,
                end,
            };
            let absolute = index.checked_add(start).ok_or_else(|| out_of_range.clone())?;
            if policy.exceeds(absolute, end) {
                return Err(out_of_range);
            }
            offset += absolute * self.strides[axis];
        }
        Ok(offset)
    }
}
