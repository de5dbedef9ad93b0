// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex assembly
//!
//! Collapses face corners that share an identical index triple into one
//! output vertex. Every corner goes into a [`ScapegoatSet`]; the in-order
//! walk of that set hands out indices `0..N`, so the result depends only on
//! the set of distinct triples and never on insertion order. A second walk
//! over the corners, in file order, resolves each to its assigned index.

use obj_lite_core::{AttributeArrays, IndexTriple, ParsedObject};
use obj_lite_tree::{NodeKey, ScapegoatSet};
use slotmap::SecondaryMap;

use crate::error::{Error, Result};
use crate::mesh::{FinalVertex, ObjectGeometry};

/// Ordered set of the distinct triples seen across all face corners
pub type DedupTree = ScapegoatSet<IndexTriple>;

/// Resolve a triple against the attribute arrays.
///
/// Omitted components and indices past the end of their array resolve to
/// the zero vector.
#[inline]
pub fn materialize(attributes: &AttributeArrays, triple: &IndexTriple) -> FinalVertex {
    FinalVertex {
        location: attributes.location_or_zero(triple.location),
        normal: attributes.normal_or_zero(triple.normal),
        uv: attributes.uv_or_zero(triple.uv),
    }
}

/// Build deduplicated vertex and index buffers from parsed attributes and
/// face corners.
pub fn assemble(
    attributes: &AttributeArrays,
    corners: &[IndexTriple],
    balance_factor: f64,
) -> Result<ObjectGeometry> {
    let mut unique = DedupTree::with_capacity_and_balance_factor(corners.len(), balance_factor)?;
    for corner in corners {
        unique.insert(*corner);
    }

    // Phase A: number unique triples in ascending order and materialize them
    let mut vertices = Vec::new();
    vertices.try_reserve_exact(unique.len())?;
    let mut assigned: SecondaryMap<NodeKey, u32> = SecondaryMap::with_capacity(unique.len());

    for (handle, triple) in unique.iter() {
        let index = u32::try_from(vertices.len()).map_err(|_| Error::IndexOverflow(unique.len()))?;
        assigned.insert(handle, index);
        vertices.push(materialize(attributes, triple));
    }

    // Phase B: remap corners in file order
    let mut indices = Vec::new();
    indices.try_reserve_exact(corners.len())?;

    for (position, corner) in corners.iter().enumerate() {
        let index = unique
            .find(corner)
            .and_then(|handle| assigned.get(handle).copied())
            .ok_or(Error::LookupInconsistency { corner: position })?;
        indices.push(index);
    }

    tracing::debug!(
        corners = corners.len(),
        unique_vertices = vertices.len(),
        rebuilds = unique.rebuild_count(),
        "assembled deduplicated geometry"
    );

    Ok(ObjectGeometry { vertices, indices })
}

/// [`assemble`] over the output of both parsing passes
pub fn assemble_parsed(parsed: &ParsedObject, balance_factor: f64) -> Result<ObjectGeometry> {
    assemble(&parsed.attributes, &parsed.corners, balance_factor)
}
