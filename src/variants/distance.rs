//! Euclidean distance mapping from a label boundary
//!
//! Propagates the coordinate of the nearest boundary pixel through the
//! forest; the cost of stepping to a pixel is its true Euclidean distance
//! to the origin carried by its parent, yielding a non-chessboard distance
//! transform. Boundary seeds come from a discontinuity scan of a scalar
//! label map against a target value.

use crate::forest::engine::{CostRule, FieldView, PropagationEngine};
use crate::forest::label::BoundaryOrigin;
use crate::forest::pool::BufferPool;
use crate::spatial::{Connectivity, GridGeometry};

/// Distance-to-carried-origin cost rule
#[derive(Debug, Default, Clone, Copy)]
pub struct DistanceRule;

impl CostRule for DistanceRule {
    type Label = BoundaryOrigin;

    fn edge_cost(
        &self,
        fields: &FieldView<'_>,
        labels: &mut [BoundaryOrigin],
        p: usize,
        q: usize,
        _direction: f32,
    ) -> f32 {
        let target = fields.geometry.point_of(q);
        let Some(origin) = labels.get(p) else {
            return 0.0;
        };
        let dx = target.x as f32 - origin.x;
        let dy = target.y as f32 - origin.y;
        dx.hypot(dy)
    }

    fn adopt_label(&self, labels: &mut [BoundaryOrigin], p: usize, q: usize) {
        // Only the origin coordinate propagates; the boundary flag stays.
        let Some(&origin) = labels.get(p) else {
            return;
        };
        if let Some(payload) = labels.get_mut(q) {
            payload.x = origin.x;
            payload.y = origin.y;
        }
    }
}

/// Mark boundary pixels of the region `labels == target` in `payloads`
///
/// Scans vertical and horizontal pixel pairs; whichever side of a
/// membership change belongs to the region is marked. Matches the original
/// tool's discontinuity scan, so region pixels adjacent to the outside are
/// the distance-zero set.
fn mark_boundary(
    geometry: GridGeometry,
    labels: &[f32],
    target: f32,
    payloads: &mut [BoundaryOrigin],
) {
    let width = geometry.width();
    let height = geometry.height();

    let member = |index: usize| labels.get(index).copied() == Some(target);
    let mut mark = |index: usize| {
        if let Some(payload) = payloads.get_mut(index) {
            payload.on_boundary = true;
        }
    };

    for y in 0..height.saturating_sub(1) {
        for x in 0..width {
            let upper = y * width + x;
            let lower = upper + width;
            if member(upper) && !member(lower) {
                mark(upper);
            } else if member(lower) && !member(upper) {
                mark(lower);
            }
        }
    }

    for y in 0..height {
        for x in 0..width.saturating_sub(1) {
            let left = y * width + x;
            let right = left + 1;
            if member(left) && !member(right) {
                mark(left);
            } else if member(right) && !member(left) {
                mark(right);
            }
        }
    }
}

/// Build a Euclidean distance-map engine from a scalar label map
///
/// Every pixel's cost becomes its Euclidean distance to the boundary of the
/// region `labels == target`, on both sides of the boundary.
pub fn distance_map<'p>(
    pool: &'p BufferPool,
    width: usize,
    height: usize,
    labels: &[f32],
    target: f32,
) -> PropagationEngine<'p, DistanceRule> {
    let geometry = GridGeometry::new(width, height);
    let mut payloads: Vec<BoundaryOrigin> = (0..geometry.area())
        .map(|index| {
            let point = geometry.point_of(index);
            BoundaryOrigin {
                on_boundary: false,
                x: point.x as f32,
                y: point.y as f32,
            }
        })
        .collect();
    mark_boundary(geometry, labels, target, &mut payloads);

    PropagationEngine::new(
        pool,
        width,
        height,
        labels,
        labels,
        &payloads,
        Connectivity::Four,
        DistanceRule,
    )
}

#[cfg(test)]
mod tests {
    use super::mark_boundary;
    use crate::forest::label::BoundaryOrigin;
    use crate::spatial::GridGeometry;

    #[test]
    fn boundary_scan_marks_region_rim() {
        // 4x4, rows 0-1 background, rows 2-3 the target region
        let geometry = GridGeometry::new(4, 4);
        let labels = [
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 0.0, //
            2.0, 2.0, 2.0, 2.0, //
            2.0, 2.0, 2.0, 2.0, //
        ];
        let mut payloads = vec![BoundaryOrigin::default(); 16];
        mark_boundary(geometry, &labels, 2.0, &mut payloads);

        let marked: Vec<usize> = payloads
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.on_boundary.then_some(i))
            .collect();
        assert_eq!(marked, vec![8, 9, 10, 11]);
    }
}
