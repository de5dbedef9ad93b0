// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for tree construction.

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring a tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The weight-balance factor must lie strictly between 0.5 and 1.
    #[error("balance factor must be in the open interval (0.5, 1), got {0}")]
    InvalidBalanceFactor(f64),
}
