// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One deduplicated vertex, laid out for direct GPU upload.
///
/// Exactly 8 floats: location, normal, uv.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FinalVertex {
    pub location: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<FinalVertex>() == 8 * std::mem::size_of::<f32>());

impl FinalVertex {
    /// Floats per vertex record
    pub const FLOATS: usize = 8;
    /// Bytes per vertex record
    pub const STRIDE: usize = std::mem::size_of::<FinalVertex>();
    /// Byte offset of the location attribute
    pub const LOCATION_OFFSET: usize = std::mem::offset_of!(FinalVertex, location);
    /// Byte offset of the normal attribute
    pub const NORMAL_OFFSET: usize = std::mem::offset_of!(FinalVertex, normal);
    /// Byte offset of the uv attribute
    pub const UV_OFFSET: usize = std::mem::offset_of!(FinalVertex, uv);

    /// Create a new vertex
    #[inline]
    pub fn new(location: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            location,
            normal,
            uv,
        }
    }

    /// View the vertex as its 8 raw floats
    #[inline]
    pub fn as_floats(&self) -> &[f32; 8] {
        bytemuck::cast_ref(self)
    }
}

/// Deduplicated geometry of one object: a vertex buffer and a triangle
/// index buffer referring into it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectGeometry {
    /// Unique vertices, ordered by their index triple
    pub vertices: Vec<FinalVertex>,
    /// Triangle indices (i0, i1, i2) in source winding order
    pub indices: Vec<u32>,
}

impl ObjectGeometry {
    /// Create a new empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get index count
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if geometry has no triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex buffer as raw bytes
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Vertex buffer as a flat float array, 8 floats per vertex
    #[inline]
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Iterate over triangles as the three vertices of each face.
    ///
    /// Indices must refer into `vertices`, which holds for any geometry
    /// produced by the assembler.
    pub fn triangles(&self) -> impl Iterator<Item = [&FinalVertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Calculate location bounds (min, max)
    #[inline]
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.vertices.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.vertices.iter().for_each(|vertex| {
            let [x, y, z] = vertex.location;
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }
}
