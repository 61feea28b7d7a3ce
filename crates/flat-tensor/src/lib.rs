// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # flat-tensor
//!
//! N-dimensional `f32` tensors over a single flat buffer, with zero-copy
//! sub-tensor views.
//!
//! This crate provides:
//! - [`Tensor`] — a root tensor or a view over a root's buffer.
//! - [`Shape`] and [`Layout`] — root geometry and its row-major stride table.
//! - [`Window`] — the per-axis `[start, end)` range a view addresses.
//! - [`Storage`] — the reference-counted buffer shared by a root and its views.
//! - [`TensorConfig`] / [`BoundsPolicy`] — access checks, loadable from TOML.
//!
//! # Ownership Model
//!
//! ```text
//! Tensor::new(dims) ──► root: Storage ─┐   Arc<Layout> ─┐   Window::full
//!                                      │                │
//! Tensor::sub_tensor(&root, s, e) ──► view: same ───────┴── same ──────┘  Window(s, e)
//! ```
//!
//! Views clone the storage handle and the layout `Arc`; they never copy
//! elements. The buffer is freed when the last root or view holding it is
//! dropped.
//!
//! # Bounds Policies
//! With the default [`BoundsPolicy::Exclusive`], a view over root
//! coordinates `start..end` accepts local coordinates `0..end - start` on
//! each axis. [`BoundsPolicy::Inclusive`] accepts one index more, matching
//! a strict `absolute > end` test; past the last row such an access fails
//! with [`TensorError::OffsetOutOfBounds`] instead of reading foreign memory.
//!
//! # Example
//! ```
//! use flat_tensor::Tensor;
//!
//! let root = Tensor::new(&[2, 3, 4]).unwrap();
//! assert_eq!(root.strides(), &[12, 4, 1]);
//!
//! let view = Tensor::sub_tensor(&root, vec![1, 0, 2], vec![2, 3, 4]).unwrap();
//! view.set(7.0, &[0, 1, 1]).unwrap();
//! assert_eq!(root.get(&[1, 1, 3]).unwrap(), 7.0);
//! assert_eq!(view.logical_shape(), vec![1, 3, 2]);
//! ```

mod config;
mod error;
mod layout;
mod shape;
mod storage;
mod tensor;
mod window;

pub use config::{BoundsPolicy, TensorConfig};
pub use error::TensorError;
pub use layout::Layout;
pub use shape::Shape;
pub use storage::Storage;
pub use tensor::Tensor;
pub use window::Window;
