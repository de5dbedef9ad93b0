// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # obj-lite Geometry
//!
//! Turns triangulated OBJ text into compact vertex and index buffers ready
//! for upload. Face corners with identical `(location, uv, normal)` index
//! triples share one output vertex.
//!
//! ```rust
//! use obj_lite_geometry::parse_obj;
//!
//! let content = "\
//! v 0 0 0
//! v 1 0 0
//! v 1 1 0
//! v 0 1 0
//! f 1 2 3
//! f 1 3 4
//! ";
//! let geometry = parse_obj(content).unwrap();
//!
//! assert_eq!(geometry.vertex_count(), 4);
//! assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3]);
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod loader;
pub mod mesh;

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;

pub use assembler::{assemble, assemble_parsed, materialize, DedupTree};
pub use config::{LoadConfig, DEFAULT_MAX_FILE_SIZE_MB};
pub use error::{Error, Result};
pub use loader::{load_obj_file, parse_obj, parse_obj_bytes, parse_obj_with_config};
pub use mesh::{FinalVertex, ObjectGeometry};
