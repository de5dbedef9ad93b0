// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # obj-lite Core Parser
//!
//! Two-pass parser for triangulated, single-object Wavefront OBJ text.
//!
//! ## Overview
//!
//! - **Line Scanning**: Stateless, allocation-free line classification
//! - **Structural Pass**: Exact element counts, rejects non-triangular faces
//!   and multiple objects before anything is allocated
//! - **Extraction Pass**: Fills buffers reserved to the exact counts
//!
//! ## Quick Start
//!
//! ```rust
//! use obj_lite_core::parse_object_data;
//!
//! let content = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
//! let parsed = parse_object_data(content).unwrap();
//!
//! assert_eq!(parsed.attributes.locations.len(), 3);
//! assert_eq!(parsed.triangle_count(), 1);
//! ```
//!
//! ## Supported statements
//!
//! `o`, `v`, `vn`, `vt`, triangular `f` with `a`, `a/b`, `a//c` or `a/b/c`
//! corners, and `#` comments. Every other statement is skipped.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for counts and index triples

pub mod counter;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod types;

pub use counter::{count_elements, CORNERS_PER_FACE};
pub use error::{ElementKind, Error, Result};
pub use extractor::{extract_attributes, parse_corner, parse_face, parse_floats, parse_object_data};
pub use scanner::{
    classify_line, count_corner_tokens, skip_horizontal_whitespace, skip_line, starts_with, Line,
    LineKind, Lines,
};
pub use types::{AttributeArrays, ElementCounts, IndexTriple, ParsedObject};
