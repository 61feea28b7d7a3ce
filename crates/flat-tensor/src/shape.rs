// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors and stride derivation.

use crate::TensorError;
use std::fmt;

/// The geometry of a root tensor's backing buffer.
///
/// A shape always has at least one axis and every axis length is positive.
/// Shapes are immutable once created; views never own a shape of their own,
/// they share their root's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a shape from the given dimension lengths.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidArgument`] if `dims` is empty, any
    /// dimension is zero, or the element count overflows `usize`.
    ///
    /// # Examples
    /// ```
    /// use flat_tensor::Shape;
    /// let s = Shape::new(vec![2, 3, 4]).unwrap();
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Result<Self, TensorError> {
        if dims.is_empty() {
            return Err(TensorError::invalid("please provide dimensions"));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(TensorError::invalid(format!(
                "dimension {axis} has zero length"
            )));
        }
        if dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)).is_none() {
            return Err(TensorError::invalid(format!(
                "dimensions {dims:?} hold more than usize::MAX elements"
            )));
        }
        Ok(Self { dims })
    }

    /// Returns the number of axes.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the length of a specific axis, or `None` if out of bounds.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Computes row-major (C-order) strides for this shape.
    ///
    /// `strides[i]` is the product of every dimension after `i`; the last
    /// axis always has stride 1.
    pub fn strides(&self) -> Vec<usize> {
        let rank = self.dims.len();
        let mut strides = vec![1usize; rank];
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = TensorError;

    fn try_from(dims: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(dims)
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        shape.dims
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = TensorError;

    fn try_from(dims: &[usize]) -> Result<Self, Self::Error> {
        Self::new(dims.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vector_shape() {
        let s = Shape::new(vec![5]).unwrap();
        assert_eq!(s.rank(), 1);
        assert_eq!(s.num_elements(), 5);
        assert_eq!(s.strides(), vec![1]);
    }

    #[test]
    fn test_matrix_shape() {
        let s = Shape::new(vec![3, 4]).unwrap();
        assert_eq!(s.num_elements(), 12);
        assert_eq!(s.strides(), vec![4, 1]);
        assert_eq!(s.dim(0), Some(3));
        assert_eq!(s.dim(2), None);
    }

    #[test]
    fn test_3d_strides() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(s.strides(), vec![12, 4, 1]);
    }

    #[test]
    fn test_empty_dims_rejected() {
        let err = Shape::new(vec![]).unwrap_err();
        assert!(matches!(err, TensorError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_length_axis_rejected() {
        let err = Shape::new(vec![2, 0, 3]).unwrap_err();
        assert!(matches!(err, TensorError::InvalidArgument(ref m) if m.contains("dimension 1")));
    }

    #[test]
    fn test_overflowing_dims_rejected() {
        let err = Shape::new(vec![1 << 40, 1 << 40]).unwrap_err();
        assert!(matches!(err, TensorError::InvalidArgument(ref m) if m.contains("usize::MAX")));
        assert!(Shape::new(vec![usize::MAX, 2]).is_err());
        assert_eq!(Shape::new(vec![usize::MAX, 1]).unwrap().num_elements(), usize::MAX);
    }

    #[test]
    fn test_display() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(format!("{s}"), "[2, 3, 4]");
    }

    #[test]
    fn test_try_from_conversions() {
        let s1: Shape = vec![2usize, 3].try_into().unwrap();
        let s2: Shape = (&[2usize, 3][..]).try_into().unwrap();
        assert_eq!(s1, s2);
        assert!(Shape::try_from(Vec::<usize>::new()).is_err());
    }

    #[test]
    fn test_serde_validates() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Doc {
            shape: Shape,
        }

        let doc = Doc {
            shape: Shape::new(vec![2, 3]).unwrap(),
        };
        let text = toml::to_string(&doc).unwrap();
        assert_eq!(text.trim(), "shape = [2, 3]");
        let back: Doc = toml::from_str(&text).unwrap();
        assert_eq!(back.shape, doc.shape);

        assert!(toml::from_str::<Doc>("shape = []").is_err());
        assert!(toml::from_str::<Doc>("shape = [4, 0]").is_err());
    }

    proptest! {
        #[test]
        fn prop_strides_are_suffix_products(dims in prop::collection::vec(1usize..=6, 1..=5)) {
            let s = Shape::new(dims.clone()).unwrap();
            let strides = s.strides();
            prop_assert_eq!(strides.len(), dims.len());
            prop_assert_eq!(strides.last().copied(), Some(1));
            for i in 0..dims.len() {
                let expected: usize = dims[i + 1..].iter().product();
                prop_assert_eq!(strides[i], expected);
            }
            prop_assert_eq!(strides[0] * dims[0], s.num_elements());
        }
    }
}
