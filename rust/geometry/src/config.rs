// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loader configuration, optionally read from environment variables.

use obj_lite_tree::DEFAULT_BALANCE_FACTOR;

/// Default maximum file size accepted by [`crate::load_obj_file`].
pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 512;

/// Loader configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadConfig {
    /// Weight-balance factor of the dedup tree, in (0.5, 1).
    pub balance_factor: f64,
    /// Maximum file size in MB.
    pub max_file_size_mb: usize,
}

impl LoadConfig {
    /// Load configuration from environment variables.
    ///
    /// - `OBJ_LITE_BALANCE_FACTOR` (default 0.7)
    /// - `OBJ_LITE_MAX_FILE_SIZE_MB` (default 512)
    ///
    /// Missing or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            balance_factor: std::env::var("OBJ_LITE_BALANCE_FACTOR")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_BALANCE_FACTOR),
            max_file_size_mb: std::env::var("OBJ_LITE_MAX_FILE_SIZE_MB")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB),
        }
    }

    /// Set the dedup tree balance factor
    pub fn with_balance_factor(mut self, balance_factor: f64) -> Self {
        self.balance_factor = balance_factor;
        self
    }

    /// Set the maximum accepted file size
    pub fn with_max_file_size_mb(mut self, max_file_size_mb: usize) -> Self {
        self.max_file_size_mb = max_file_size_mb;
        self
    }

    /// Maximum file size in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        (self.max_file_size_mb as u64).saturating_mul(1024 * 1024)
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            balance_factor: DEFAULT_BALANCE_FACTOR,
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}
