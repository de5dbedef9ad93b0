// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for OBJ parsing.

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Attribute categories tracked by both passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Location,
    Normal,
    TexCoord,
    FaceCorner,
}

impl ElementKind {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Location => "location",
            ElementKind::Normal => "normal",
            ElementKind::TexCoord => "uv coordinate",
            ElementKind::FaceCorner => "face corner",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while parsing OBJ text.
///
/// Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: the obj file contains more than one object")]
    MultipleObjects { line: usize },

    #[error("line {line}: face has {corners} corners, only triangles are supported")]
    NonTriangularFace { line: usize, corners: usize },

    #[error("line {line}: expected {expected} numbers, parsed {found}")]
    MalformedNumber {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: malformed face index group {token:?}")]
    MalformedIndexGroup { line: usize, token: String },

    /// The two passes disagreed about line classification.
    #[error("internal error: expected {expected} {kind}s, read {actual}")]
    InternalCountMismatch {
        kind: ElementKind,
        expected: usize,
        actual: usize,
    },

    #[error("failed to allocate parse buffers: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

impl Error {
    /// Create a malformed index group error from raw token bytes
    pub fn malformed_index_group(line: usize, token: &[u8]) -> Self {
        Error::MalformedIndexGroup {
            line,
            token: String::from_utf8_lossy(token).into_owned(),
        }
    }

    /// Returns `true` for errors caused by the input text rather than by a
    /// scanning defect or resource exhaustion.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MultipleObjects { .. }
                | Error::NonTriangularFace { .. }
                | Error::MalformedNumber { .. }
                | Error::MalformedIndexGroup { .. }
        )
    }
}
