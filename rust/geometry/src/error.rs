// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning OBJ text into geometry
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] obj_lite_core::Error),

    #[error("Dedup tree error: {0}")]
    Tree(#[from] obj_lite_tree::Error),

    /// A face corner inserted into the dedup tree could not be found again.
    #[error("internal error: face corner {corner} has no assigned vertex")]
    LookupInconsistency { corner: usize },

    #[error("Failed to allocate output buffers: {0}")]
    AllocationFailure(#[from] TryReserveError),

    #[error("Too many unique vertices for 32-bit indices: {0}")]
    IndexOverflow(usize),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File too large: {size_mb} MB exceeds maximum of {max_mb} MB")]
    FileTooLarge { size_mb: u64, max_mb: usize },
}
