//! Path reconstruction by walking the spanning forest
//!
//! Pure functions of the engine's parent field: restartable and idempotent
//! between reinitializations. The walk starts at the target pixel and
//! follows parents to the forest root, so the first output element is the
//! target itself and the last is a seed.

use crate::spatial::{GridGeometry, GridPoint};

/// Reconstruct the path from `target` back to its forest root
///
/// Returns an empty vector when `target` lies outside the grid.
pub fn trace(parent: &[Option<u32>], geometry: GridGeometry, target: GridPoint) -> Vec<GridPoint> {
    let mut points = Vec::new();
    if geometry.contains(target) {
        append(parent, geometry, target, &mut points);
    }
    points
}

/// Append the path from `target` back to its root without clearing `points`
///
/// Used to splice two half-paths (the live segment plus the closing segment
/// back to the start point) into one preview polyline.
pub fn append(
    parent: &[Option<u32>],
    geometry: GridGeometry,
    target: GridPoint,
    points: &mut Vec<GridPoint>,
) {
    let mut position = geometry.index_of(target);
    points.push(geometry.point_of(position));
    while let Some(Some(next)) = parent.get(position).copied() {
        position = next as usize;
        points.push(geometry.point_of(position));
    }
}

/// Reconstruct the path to `target` as linear indices
pub fn trace_indices(parent: &[Option<u32>], target: usize) -> Vec<u32> {
    let mut indices = Vec::new();
    append_indices(parent, target, &mut indices);
    indices
}

/// Append the index path to `target` without clearing `indices`
pub fn append_indices(parent: &[Option<u32>], target: usize, indices: &mut Vec<u32>) {
    let mut position = target;
    indices.push(position as u32);
    while let Some(Some(next)) = parent.get(position).copied() {
        indices.push(next);
        position = next as usize;
    }
}
