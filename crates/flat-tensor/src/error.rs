// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and element access.

/// Errors that can occur while building tensors or addressing their elements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// Dimensions, coordinates or a view window are missing, empty, or do not
    /// match the tensor's rank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A coordinate, once shifted by the view start, is past the axis bound.
    #[error("index out of range on axis {axis}: {index} + {start} exceeds bound {end}")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        start: usize,
        end: usize,
    },

    /// The supplied buffer does not hold exactly `product(dims)` elements.
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A translated flat offset falls outside the backing buffer.
    #[error("flat offset {offset} is outside a buffer of {len} elements")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// Configuration could not be read, parsed or serialised.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TensorError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
