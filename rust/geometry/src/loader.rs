// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parse entry points: text, bytes and files.

use std::path::Path;

use obj_lite_core::parse_object_data;

use crate::assembler::assemble_parsed;
use crate::config::LoadConfig;
use crate::error::{Error, Result};
use crate::mesh::ObjectGeometry;

/// Parse OBJ text into deduplicated geometry with the default configuration.
///
/// ```rust
/// let geometry = obj_lite_geometry::parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
/// assert_eq!(geometry.indices, vec![0, 1, 2]);
/// ```
pub fn parse_obj(content: &str) -> Result<ObjectGeometry> {
    parse_obj_bytes(content.as_bytes())
}

/// Parse OBJ bytes into deduplicated geometry. Input ends at the first NUL
/// byte, if any.
pub fn parse_obj_bytes(content: &[u8]) -> Result<ObjectGeometry> {
    parse_obj_with_config(content, &LoadConfig::default())
}

/// Parse OBJ bytes with an explicit configuration.
pub fn parse_obj_with_config(content: &[u8], config: &LoadConfig) -> Result<ObjectGeometry> {
    let parsed = parse_object_data(content)?;
    assemble_parsed(&parsed, config.balance_factor)
}

/// Read and parse an OBJ file.
///
/// Files larger than [`LoadConfig::max_file_size_mb`] are rejected before
/// they are read.
pub fn load_obj_file(path: impl AsRef<Path>, config: &LoadConfig) -> Result<ObjectGeometry> {
    let path = path.as_ref();
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_error)?.len();
    if size > config.max_file_size_bytes() {
        return Err(Error::FileTooLarge {
            size_mb: size / (1024 * 1024),
            max_mb: config.max_file_size_mb,
        });
    }

    let content = std::fs::read(path).map_err(io_error)?;
    let geometry = parse_obj_with_config(&content, config)?;

    tracing::info!(
        path = %path.display(),
        vertices = geometry.vertex_count(),
        triangles = geometry.triangle_count(),
        "loaded obj file"
    );

    Ok(geometry)
}
