// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-axis view windows in root coordinate space.

use crate::{Shape, TensorError};

/// The `[start, end)` range of root coordinates a tensor addresses on each
/// axis.
///
/// A root tensor's window spans its whole shape. A view's window is a
/// sub-range of the root's, always expressed against the root's coordinate
/// space rather than against the parent view's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Window {
    start: Vec<usize>,
    end: Vec<usize>,
}

impl Window {
    /// The window covering all of `shape`.
    pub fn full(shape: &Shape) -> Self {
        Self {
            start: vec![0; shape.rank()],
            end: shape.dims().to_vec(),
        }
    }

    /// Builds a window over `shape`, one `start`/`end` pair per axis.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if either bound list does not have
    ///   one entry per axis, or `start > end` on some axis.
    /// - [`TensorError::IndexOutOfRange`] if `end` passes the shape on some axis.
    pub fn new(start: Vec<usize>, end: Vec<usize>, shape: &Shape) -> Result<Self, TensorError> {
        let rank = shape.rank();
        if start.len() != rank || end.len() != rank {
            return Err(TensorError::invalid(format!(
                "view window needs {rank} start and end positions, got {} and {}",
                start.len(),
                end.len()
            )));
        }
        for (axis, ((&s, &e), &dim)) in start.iter().zip(&end).zip(shape.dims()).enumerate() {
            if s > e {
                return Err(TensorError::invalid(format!(
                    "view window on axis {axis} starts at {s} after its end {e}"
                )));
            }
            if e > dim {
                return Err(TensorError::IndexOutOfRange {
                    axis,
                    index: e,
                    start: 0,
                    end: dim,
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Derives a window from positions relative to this one.
    ///
    /// The result spans `self.start + start .. self.start + end` and must lie
    /// inside `self`.
    ///
    /// # Errors
    /// Same rules as [`Window::new`], with this window's extent standing in
    /// for the shape.
    pub fn narrow(&self, start: &[usize], end: &[usize]) -> Result<Self, TensorError> {
        let rank = self.rank();
        if start.len() != rank || end.len() != rank {
            return Err(TensorError::invalid(format!(
                "view window needs {rank} start and end positions, got {} and {}",
                start.len(),
                end.len()
            )));
        }
        let mut abs_start = Vec::with_capacity(rank);
        let mut abs_end = Vec::with_capacity(rank);
        for axis in 0..rank {
            let (s, e) = (start[axis], end[axis]);
            if s > e {
                return Err(TensorError::invalid(format!(
                    "view window on axis {axis} starts at {s} after its end {e}"
                )));
            }
            let extent = self.end[axis] - self.start[axis];
            if e > extent {
                return Err(TensorError::IndexOutOfRange {
                    axis,
                    index: e,
                    start: self.start[axis],
                    end: self.end[axis],
                });
            }
            abs_start.push(self.start[axis] + s);
            abs_end.push(self.start[axis] + e);
        }
        Ok(Self {
            start: abs_start,
            end: abs_end,
        })
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.start.len()
    }

    /// Inclusive lower bounds, one per axis.
    pub fn start(&self) -> &[usize] {
        &self.start
    }

    /// Upper bounds, one per axis.
    pub fn end(&self) -> &[usize] {
        &self.end
    }

    /// Per-axis length of the window (`end - start`).
    pub fn extent(&self) -> Vec<usize> {
        self.start
            .iter()
            .zip(&self.end)
            .map(|(&s, &e)| e - s)
            .collect()
    }

    /// Returns `true` if the window spans the whole of `shape`.
    pub fn is_full(&self, shape: &Shape) -> bool {
        self.start.iter().all(|&s| s == 0) && self.end == shape.dims()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[usize]) -> Shape {
        Shape::new(dims.to_vec()).unwrap()
    }

    #[test]
    fn test_full() {
        let s = shape(&[2, 3]);
        let w = Window::full(&s);
        assert_eq!(w.start(), &[0, 0]);
        assert_eq!(w.end(), &[2, 3]);
        assert_eq!(w.extent(), vec![2, 3]);
        assert!(w.is_full(&s));
    }

    #[test]
    fn test_new_valid() {
        let s = shape(&[4, 4]);
        let w = Window::new(vec![1, 0], vec![3, 2], &s).unwrap();
        assert_eq!(w.extent(), vec![2, 2]);
        assert!(!w.is_full(&s));
    }

    #[test]
    fn test_new_rank_mismatch() {
        let s = shape(&[4, 4]);
        let err = Window::new(vec![0], vec![4], &s).unwrap_err();
        assert!(matches!(err, TensorError::InvalidArgument(_)));
    }

    #[test]
    fn test_new_inverted() {
        let s = shape(&[4]);
        let err = Window::new(vec![3], vec![1], &s).unwrap_err();
        assert!(matches!(err, TensorError::InvalidArgument(_)));
    }

    #[test]
    fn test_new_past_shape() {
        let s = shape(&[4, 4]);
        let err = Window::new(vec![0, 2], vec![4, 5], &s).unwrap_err();
        assert_eq!(
            err,
            TensorError::IndexOutOfRange {
                axis: 1,
                index: 5,
                start: 0,
                end: 4
            }
        );
        assert_eq!(
            err.to_string(),
            "index out of range on axis 1: 5 + 0 exceeds bound 4"
        );
    }

    #[test]
    fn test_empty_window_allowed() {
        let s = shape(&[4]);
        let w = Window::new(vec![2], vec![2], &s).unwrap();
        assert_eq!(w.extent(), vec![0]);
    }

    #[test]
    fn test_narrow_composes() {
        let s = shape(&[10]);
        let outer = Window::new(vec![2], vec![8], &s).unwrap();
        let inner = outer.narrow(&[1], &[3]).unwrap();
        assert_eq!(inner.start(), &[3]);
        assert_eq!(inner.end(), &[5]);
    }

    #[test]
    fn test_narrow_outside_parent() {
        let s = shape(&[10]);
        let outer = Window::new(vec![2], vec![8], &s).unwrap();
        let err = outer.narrow(&[0], &[7]).unwrap_err();
        assert!(matches!(err, TensorError::IndexOutOfRange { axis: 0, start: 2, end: 8, .. }));
    }
}
