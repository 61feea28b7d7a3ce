// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Access-checking configuration, loaded from TOML or built programmatically.
//!
//! # TOML Format
//! ```toml
//! bounds = "exclusive"      # or "inclusive"
//! check_buffer_len = true
//! ```
//!
//! A configuration is fixed when a root tensor is constructed and every view
//! derived from that root inherits it.

use crate::TensorError;
use std::path::Path;

/// How a translated coordinate is compared against the view's upper bound.
///
/// Both policies compute `absolute = coord + view_start` per axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsPolicy {
    /// Rejects `absolute >= view_end`. Valid local coordinates on each axis
    /// are `0..view_end - view_start`.
    #[default]
    Exclusive,
    /// Rejects only `absolute > view_end`, so one index past the window is
    /// addressable. On a multi-axis tensor that index silently lands on the
    /// first element of the next row; on the last row it runs off the buffer
    /// and fails with [`TensorError::OffsetOutOfBounds`].
    Inclusive,
}

impl BoundsPolicy {
    /// Returns `true` if `absolute` is past the bound `end` under this policy.
    pub fn exceeds(self, absolute: usize, end: usize) -> bool {
        match self {
            BoundsPolicy::Exclusive => absolute >= end,
            BoundsPolicy::Inclusive => absolute > end,
        }
    }

    /// Returns a human-readable label for this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            BoundsPolicy::Exclusive => "exclusive",
            BoundsPolicy::Inclusive => "inclusive",
        }
    }
}

/// Checks applied by tensors built with this configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TensorConfig {
    /// Upper-bound test used by `get`/`set`.
    #[serde(default)]
    pub bounds: BoundsPolicy,
    /// Whether a supplied buffer must hold exactly `product(dims)` elements.
    #[serde(default = "default_true")]
    pub check_buffer_len: bool,
}

fn default_true() -> bool {
    true
}

impl TensorConfig {
    /// The unhardened behaviour: inclusive upper bound, unchecked buffers.
    pub fn compat() -> Self {
        Self {
            bounds: BoundsPolicy::Inclusive,
            check_buffer_len: false,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TensorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TensorError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, TensorError> {
        toml::from_str(toml_str).map_err(|e| TensorError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TensorError> {
        toml::to_string_pretty(self)
            .map_err(|e| TensorError::Config(format!("TOML serialise error: {e}")))
    }
}

impl Default for TensorConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsPolicy::Exclusive,
            check_buffer_len: true,
        }
    }
}
