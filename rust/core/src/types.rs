// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intermediate data produced by the two parsing passes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exact per-category counts computed by the structural pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementCounts {
    /// Number of `v` lines
    pub locations: usize,
    /// Number of `vn` lines
    pub normals: usize,
    /// Number of `vt` lines
    pub uvs: usize,
    /// Number of face corners (3 per `f` line)
    pub face_corners: usize,
    /// Whether an `o` line was present
    pub has_object: bool,
}

impl ElementCounts {
    /// Number of triangles
    #[inline]
    pub fn triangles(&self) -> usize {
        self.face_corners / 3
    }
}

/// Zero-based references into the location, UV and normal arrays for one
/// face corner. `None` means the component was omitted in the source.
///
/// Ordering is lexicographic over `(location, uv, normal)`, with an omitted
/// component ordered before any present one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexTriple {
    pub location: Option<u32>,
    pub uv: Option<u32>,
    pub normal: Option<u32>,
}

impl IndexTriple {
    /// Create a triple with every component present
    #[inline]
    pub fn new(location: u32, uv: u32, normal: u32) -> Self {
        Self {
            location: Some(location),
            uv: Some(uv),
            normal: Some(normal),
        }
    }

    /// Build a triple from 1-based file indices, where 0 marks an omitted
    /// component.
    #[inline]
    pub fn from_file_indices(location: u32, uv: u32, normal: u32) -> Self {
        Self {
            location: location.checked_sub(1),
            uv: uv.checked_sub(1),
            normal: normal.checked_sub(1),
        }
    }
}

/// Vertex attribute arrays filled by the extraction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeArrays {
    pub locations: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
}

impl AttributeArrays {
    /// Location at `index`, or the zero vector if omitted or out of range
    #[inline]
    pub fn location_or_zero(&self, index: Option<u32>) -> [f32; 3] {
        lookup_or_zero(&self.locations, index)
    }

    /// Normal at `index`, or the zero vector if omitted or out of range
    #[inline]
    pub fn normal_or_zero(&self, index: Option<u32>) -> [f32; 3] {
        lookup_or_zero(&self.normals, index)
    }

    /// UV at `index`, or the zero vector if omitted or out of range
    #[inline]
    pub fn uv_or_zero(&self, index: Option<u32>) -> [f32; 2] {
        lookup_or_zero(&self.uvs, index)
    }
}

#[inline]
fn lookup_or_zero<const N: usize>(values: &[[f32; N]], index: Option<u32>) -> [f32; N] {
    index
        .and_then(|i| values.get(i as usize))
        .copied()
        .unwrap_or([0.0; N])
}

/// Everything the two passes extract from one input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedObject {
    pub counts: ElementCounts,
    pub attributes: AttributeArrays,
    /// Face corners in file order, 3 per triangle
    pub corners: Vec<IndexTriple>,
}

impl ParsedObject {
    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.corners.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_indices_rebases() {
        let t = IndexTriple::from_file_indices(5, 0, 2);
        assert_eq!(t.location, Some(4));
        assert_eq!(t.uv, None);
        assert_eq!(t.normal, Some(1));
    }

    #[test]
    fn test_omitted_orders_before_first_element() {
        let omitted = IndexTriple::from_file_indices(1, 0, 1);
        let first = IndexTriple::new(0, 0, 0);
        assert!(omitted < first);
        assert_ne!(omitted, first);
        assert!(IndexTriple::new(0, 5, 5) < IndexTriple::new(1, 0, 0));
        assert!(IndexTriple::new(1, 0, 9) < IndexTriple::new(1, 1, 0));
    }

    #[test]
    fn test_lookup_or_zero() {
        let attrs = AttributeArrays {
            locations: vec![[1.0, 2.0, 3.0]],
            normals: vec![],
            uvs: vec![[0.5, 0.25]],
        };
        assert_eq!(attrs.location_or_zero(Some(0)), [1.0, 2.0, 3.0]);
        assert_eq!(attrs.location_or_zero(Some(1)), [0.0; 3]);
        assert_eq!(attrs.normal_or_zero(Some(0)), [0.0; 3]);
        assert_eq!(attrs.uv_or_zero(None), [0.0; 2]);
        assert_eq!(attrs.uv_or_zero(Some(0)), [0.5, 0.25]);
    }
}
