// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural pass
//!
//! Counts every attribute category in one linear scan and rejects inputs
//! with more than one object or with non-triangular faces. Nothing is
//! allocated here; the counts size every buffer of the extraction pass.

use crate::error::{Error, Result};
use crate::scanner::{count_corner_tokens, LineKind, Lines};
use crate::types::ElementCounts;

/// Corners per face. Only triangles are accepted.
pub const CORNERS_PER_FACE: usize = 3;

/// Count locations, normals, UV coordinates and face corners in `input`.
pub fn count_elements(input: &[u8]) -> Result<ElementCounts> {
    let mut counts = ElementCounts::default();

    for line in Lines::new(input) {
        match line.kind {
            LineKind::Object => {
                if counts.has_object {
                    return Err(Error::MultipleObjects { line: line.number });
                }
                counts.has_object = true;
            }
            LineKind::Location => counts.locations += 1,
            LineKind::Normal => counts.normals += 1,
            LineKind::TexCoord => counts.uvs += 1,
            LineKind::Face => {
                let corners = count_corner_tokens(line.body);
                if corners != CORNERS_PER_FACE {
                    return Err(Error::NonTriangularFace {
                        line: line.number,
                        corners,
                    });
                }
                counts.face_corners += CORNERS_PER_FACE;
            }
            LineKind::Comment | LineKind::Blank | LineKind::Other => {}
        }
    }

    tracing::debug!(
        locations = counts.locations,
        normals = counts.normals,
        uvs = counts.uvs,
        face_corners = counts.face_corners,
        "counted obj elements"
    );

    Ok(counts)
}
