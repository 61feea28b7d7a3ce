// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared, fixed-length element storage.
//!
//! A root tensor allocates one [`Storage`]; every view derived from it holds
//! a clone of the same handle. Cloning bumps a reference count and never
//! copies elements, so the buffer lives as long as its longest holder.
//!
//! # Thread Safety
//! The buffer sits behind a `parking_lot::RwLock`, so a `Storage` is
//! `Send + Sync`. The lock is not reentrant: holding a guard from
//! [`as_slice`](Storage::as_slice) or [`as_mut_slice`](Storage::as_mut_slice)
//! while reading or writing through another handle on the same thread
//! deadlocks. Ordering of overlapping writes from several threads is the
//! caller's responsibility.

use crate::TensorError;
use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::sync::Arc;

/// Reference-counted handle to a flat `f32` buffer.
#[derive(Clone)]
pub struct Storage {
    data: Arc<RwLock<Vec<f32>>>,
    /// Fixed at creation; the buffer is never resized.
    len: usize,
}

impl Storage {
    /// Allocates a zero-filled buffer of `len` elements.
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![0.0; len])
    }

    /// Adopts an existing buffer without copying it.
    pub fn from_vec(data: Vec<f32>) -> Self {
        let len = data.len();
        Self {
            data: Arc::new(RwLock::new(data)),
            len,
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the element at `offset`.
    ///
    /// # Errors
    /// Returns [`TensorError::OffsetOutOfBounds`] past the end of the buffer.
    pub fn read(&self, offset: usize) -> Result<f32, TensorError> {
        self.data
            .read()
            .get(offset)
            .copied()
            .ok_or(TensorError::OffsetOutOfBounds {
                offset,
                len: self.len,
            })
    }

    /// Writes `value` at `offset`.
    ///
    /// # Errors
    /// Returns [`TensorError::OffsetOutOfBounds`] past the end of the buffer.
    pub fn write(&self, offset: usize, value: f32) -> Result<(), TensorError> {
        let mut data = self.data.write();
        let slot = data.get_mut(offset).ok_or(TensorError::OffsetOutOfBounds {
            offset,
            len: self.len,
        })?;
        *slot = value;
        Ok(())
    }

    /// Locks the buffer for reading and exposes it as a slice.
    pub fn as_slice(&self) -> MappedRwLockReadGuard<'_, [f32]> {
        RwLockReadGuard::map(self.data.read(), |v| v.as_slice())
    }

    /// Locks the buffer for writing and exposes it as a mutable slice.
    ///
    /// The slice cannot grow or shrink, so every view stays valid.
    pub fn as_mut_slice(&self) -> MappedRwLockWriteGuard<'_, [f32]> {
        RwLockWriteGuard::map(self.data.write(), |v| v.as_mut_slice())
    }

    /// Returns `true` if both handles point at the same buffer.
    pub fn ptr_eq(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Number of live handles to this buffer (root plus views).
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.len)
            .field("handles", &self.handle_count())
            .finish()
    }
}
