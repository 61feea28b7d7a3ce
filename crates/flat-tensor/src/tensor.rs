// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type: root tensors and zero-copy sub-tensor views.

use crate::{Layout, Shape, Storage, TensorConfig, TensorError, Window};
use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard};
use std::sync::Arc;

/// An n-dimensional `f32` tensor over a flat, row-major buffer.
///
/// A *root* tensor owns a freshly allocated or adopted buffer. A *view*
/// (see [`Tensor::sub_tensor`]) shares its parent's buffer, shape and stride
/// table and differs only in its [`Window`]. Writes through any tensor are
/// visible through every other tensor over the same buffer.
///
/// # Memory Layout
/// Elements are stored in row-major (C) order. The buffer never changes
/// length after construction, and it is released when the last tensor
/// holding it is dropped.
///
/// # Bounds
/// Coordinates passed to [`get`](Tensor::get) and [`set`](Tensor::set) are
/// local to the window: `0` is the first element of the view on that axis.
/// The upper-bound test is chosen by the tensor's [`TensorConfig`]; with the
/// default [`BoundsPolicy::Exclusive`](crate::BoundsPolicy::Exclusive) the
/// valid range on each axis is `0..view_end - view_start`.
pub struct Tensor {
    storage: Storage,
    layout: Arc<Layout>,
    window: Window,
    config: TensorConfig,
}

impl Tensor {
    /// Creates a zero-filled root tensor with the default configuration.
    ///
    /// # Errors
    /// Returns [`TensorError::InvalidArgument`] if `dims` is empty, contains
    /// a zero, or describes more than `usize::MAX` elements.
    ///
    /// # Examples
    /// ```
    /// use flat_tensor::Tensor;
    /// let t = Tensor::new(&[2, 3]).unwrap();
    /// assert_eq!(t.get(&[1, 2]).unwrap(), 0.0);
    /// assert_eq!(t.strides(), &[3, 1]);
    /// ```
    pub fn new(dims: &[usize]) -> Result<Self, TensorError> {
        Self::with_config(dims, TensorConfig::default())
    }

    /// Creates a zero-filled root tensor with the default configuration.
    ///
    /// Same as [`Tensor::new`].
    ///
    /// # Examples
    /// ```
    /// use flat_tensor::Tensor;
    /// let t = Tensor::zeros(&[3, 2]).unwrap();
    /// assert!(t.elements().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(dims: &[usize]) -> Result<Self, TensorError> {
        Self::with_config(dims, TensorConfig::default())
    }

    /// Creates a zero-filled root tensor with an explicit configuration.
    pub fn with_config(dims: &[usize], config: TensorConfig) -> Result<Self, TensorError> {
        let shape = Shape::new(dims.to_vec())?;
        let storage = Storage::zeros(shape.num_elements());
        tracing::debug!(shape = %shape, len = storage.len(), "allocated tensor");
        Ok(Self::root(storage, shape, config))
    }

    /// Creates a root tensor that adopts `elements` as its buffer.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `dims` is empty or contains a zero.
    /// - [`TensorError::BufferSizeMismatch`] if `elements.len()` differs from
    ///   the product of `dims`.
    ///
    /// # Examples
    /// ```
    /// use flat_tensor::Tensor;
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(t.get(&[1, 0]).unwrap(), 3.0);
    /// ```
    pub fn from_vec(elements: Vec<f32>, dims: &[usize]) -> Result<Self, TensorError> {
        Self::from_vec_with_config(elements, dims, TensorConfig::default())
    }

    /// Creates a root tensor that adopts `elements`, with an explicit
    /// configuration.
    ///
    /// When `config.check_buffer_len` is `false` a mismatched buffer is
    /// accepted and logged. Accesses whose offset lands past the real buffer
    /// then fail with [`TensorError::OffsetOutOfBounds`].
    pub fn from_vec_with_config(
        elements: Vec<f32>,
        dims: &[usize],
        config: TensorConfig,
    ) -> Result<Self, TensorError> {
        let shape = Shape::new(dims.to_vec())?;
        let expected = shape.num_elements();
        if elements.len() != expected {
            if config.check_buffer_len {
                return Err(TensorError::BufferSizeMismatch {
                    expected,
                    actual: elements.len(),
                });
            }
            tracing::warn!(
                shape = %shape,
                expected,
                actual = elements.len(),
                "adopting buffer whose length does not match its shape"
            );
        }
        let storage = Storage::from_vec(elements);
        tracing::debug!(shape = %shape, len = storage.len(), "adopted tensor buffer");
        Ok(Self::root(storage, shape, config))
    }

    fn root(storage: Storage, shape: Shape, config: TensorConfig) -> Self {
        let window = Window::full(&shape);
        Self {
            storage,
            layout: Arc::new(Layout::new(shape)),
            window,
            config,
        }
    }

    /// Creates a view of `parent` addressing root coordinates
    /// `start[i]..end[i]` on each axis.
    ///
    /// The window is always given in the root's coordinate space: deriving a
    /// view from another view replaces the window instead of composing with
    /// it. Use [`narrow`](Tensor::narrow) for windows relative to the parent.
    /// No elements are copied.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `start`/`end` do not have one
    ///   entry per axis or `start > end` on some axis.
    /// - [`TensorError::IndexOutOfRange`] if `end` passes the root shape.
    ///
    /// # Examples
    /// ```
    /// use flat_tensor::Tensor;
    /// let root = Tensor::from_vec(vec![0.0, 1.0, 2.0, 3.0], &[4]).unwrap();
    /// let view = Tensor::sub_tensor(&root, vec![1], vec![3]).unwrap();
    /// assert_eq!(view.get(&[0]).unwrap(), 1.0);
    /// view.set(9.0, &[1]).unwrap();
    /// assert_eq!(root.get(&[2]).unwrap(), 9.0);
    /// ```
    pub fn sub_tensor(
        parent: &Tensor,
        start: Vec<usize>,
        end: Vec<usize>,
    ) -> Result<Tensor, TensorError> {
        let window = Window::new(start, end, parent.layout.shape())?;
        Ok(parent.derive(window))
    }

    /// Creates a view whose window is given relative to this tensor's own
    /// window and must lie inside it.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] on a rank mismatch or `start > end`.
    /// - [`TensorError::IndexOutOfRange`] if `end` passes this tensor's
    ///   logical extent on some axis.
    pub fn narrow(&self, start: &[usize], end: &[usize]) -> Result<Tensor, TensorError> {
        let window = self.window.narrow(start, end)?;
        Ok(self.derive(window))
    }

    fn derive(&self, window: Window) -> Tensor {
        tracing::trace!(start = ?window.start(), end = ?window.end(), "derived tensor view");
        Tensor {
            storage: self.storage.clone(),
            layout: Arc::clone(&self.layout),
            window,
            config: self.config,
        }
    }

    /// Reads the element at view-local `coords`.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `coords` is empty or its length
    ///   differs from the rank.
    /// - [`TensorError::IndexOutOfRange`] if a coordinate fails the bounds
    ///   policy on its axis.
    /// - [`TensorError::OffsetOutOfBounds`] if the translated offset escapes
    ///   the buffer.
    pub fn get(&self, coords: &[usize]) -> Result<f32, TensorError> {
        let offset = self.offset(coords)?;
        self.storage.read(offset)
    }

    /// Writes `value` at view-local `coords`.
    ///
    /// Takes `&self`: the buffer is shared, so the write is visible through
    /// the root and every view over it.
    ///
    /// # Errors
    /// Same as [`get`](Tensor::get).
    pub fn set(&self, value: f32, coords: &[usize]) -> Result<(), TensorError> {
        let offset = self.offset(coords)?;
        self.storage.write(offset, value)
    }

    fn offset(&self, coords: &[usize]) -> Result<usize, TensorError> {
        self.layout.offset(&self.window, coords, self.config.bounds)
    }

    /// Locks and returns the whole backing buffer, ignoring the window.
    ///
    /// Do not call [`get`](Tensor::get) or [`set`](Tensor::set) on any tensor
    /// sharing this buffer while the guard is alive.
    pub fn elements(&self) -> MappedRwLockReadGuard<'_, [f32]> {
        self.storage.as_slice()
    }

    /// Locks and returns the whole backing buffer for writing.
    pub fn elements_mut(&self) -> MappedRwLockWriteGuard<'_, [f32]> {
        self.storage.as_mut_slice()
    }

    /// Returns the root shape.
    ///
    /// Views report their root's full shape, not the extent of their window;
    /// see [`logical_shape`](Tensor::logical_shape) for the latter.
    pub fn shape(&self) -> &Shape {
        self.layout.shape()
    }

    /// Returns the per-axis extent of this tensor's window.
    pub fn logical_shape(&self) -> Vec<usize> {
        self.window.extent()
    }

    /// Returns the row-major strides of the root buffer.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Returns the window's lower bounds in root coordinates.
    pub fn view_start(&self) -> &[usize] {
        self.window.start()
    }

    /// Returns the window's upper bounds in root coordinates.
    pub fn view_end(&self) -> &[usize] {
        self.window.end()
    }

    /// Returns the number of axes.
    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    /// Returns the configuration inherited from the root.
    pub fn config(&self) -> TensorConfig {
        self.config
    }

    /// Returns the shared storage handle.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Returns `true` if the window covers less than the whole root shape.
    ///
    /// This looks at the window only: a [`sub_tensor`](Tensor::sub_tensor)
    /// spanning the whole root reports `false` even though it is a separate
    /// handle. Use [`shares_storage_with`](Tensor::shares_storage_with) to
    /// detect aliasing.
    pub fn is_view(&self) -> bool {
        !self.window.is_full(self.layout.shape())
    }

    /// Returns `true` if both tensors read and write the same buffer.
    pub fn shares_storage_with(&self, other: &Tensor) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// Writes `value` to every element inside the window.
    ///
    /// The window is walked as `start..end` on each axis regardless of the
    /// bounds policy.
    ///
    /// # Errors
    /// Returns [`TensorError::OffsetOutOfBounds`] if the window reaches past
    /// an adopted buffer that is shorter than its shape.
    pub fn fill(&self, value: f32) -> Result<(), TensorError> {
        let offsets = self.window_offsets();
        let len = self.storage.len();
        let mut data = self.storage.as_mut_slice();
        for offset in offsets {
            let slot = data
                .get_mut(offset)
                .ok_or(TensorError::OffsetOutOfBounds { offset, len })?;
            *slot = value;
        }
        Ok(())
    }

    /// Copies the elements inside the window, in row-major order of the
    /// logical shape.
    ///
    /// # Errors
    /// Same as [`fill`](Tensor::fill).
    pub fn to_vec(&self) -> Result<Vec<f32>, TensorError> {
        let offsets = self.window_offsets();
        let len = self.storage.len();
        let data = self.storage.as_slice();
        offsets
            .into_iter()
            .map(|offset| {
                data.get(offset)
                    .copied()
                    .ok_or(TensorError::OffsetOutOfBounds { offset, len })
            })
            .collect()
    }

    /// Copies the window into a new root tensor shaped like
    /// [`logical_shape`](Tensor::logical_shape). The copy does not alias
    /// this tensor's buffer.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if the window is empty on some axis.
    /// - Same as [`to_vec`](Tensor::to_vec).
    pub fn to_contiguous(&self) -> Result<Tensor, TensorError> {
        let shape = Shape::new(self.logical_shape())?;
        let storage = Storage::from_vec(self.to_vec()?);
        Ok(Self::root(storage, shape, self.config))
    }

    /// Flat offsets of every element inside the window, row-major.
    fn window_offsets(&self) -> Vec<usize> {
        let extent = self.window.extent();
        if extent.iter().any(|&e| e == 0) {
            return Vec::new();
        }
        let strides = self.layout.strides();
        let base: usize = self
            .window
            .start()
            .iter()
            .zip(strides)
            .map(|(&s, &stride)| s * stride)
            .sum();

        let mut offsets = Vec::with_capacity(extent.iter().product());
        let mut coords = vec![0usize; extent.len()];
        loop {
            let local: usize = coords
                .iter()
                .zip(strides)
                .map(|(&c, &stride)| c * stride)
                .sum();
            offsets.push(base + local);

            // Odometer increment, last axis fastest.
            let mut axis = extent.len();
            loop {
                if axis == 0 {
                    return offsets;
                }
                axis -= 1;
                coords[axis] += 1;
                if coords[axis] < extent[axis] {
                    break;
                }
                coords[axis] = 0;
            }
        }
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.layout.shape().dims())
            .field("view_start", &self.window.start())
            .field("view_end", &self.window.end())
            .field("is_view", &self.is_view())
            .field("bounds", &self.config.bounds.as_str())
            .finish()
    }
}
