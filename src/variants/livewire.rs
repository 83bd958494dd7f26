//! Livewire / intelligent-scissors contouring
//!
//! Single-anchor, eight-connected propagation whose cost favors straight
//! paths along strong image boundaries. On every mouse move the surrounding
//! tool reconstructs the minimum-cost path from the cursor back to the
//! anchor; moving the anchor re-runs propagation, optionally only far enough
//! to cover the previously displayed path.

use crate::forest::engine::{CostRule, FieldView, PropagationEngine};
use crate::forest::pool::BufferPool;
use crate::spatial::{Connectivity, GridGeometry, GridPoint};

/// Empirical scale of the bending penalty, preserved from the original tool
pub const TURN_PENALTY_SCALE: f32 = 0.14 / 270.0;

/// Angular deviation of a gradient direction from the travel direction
///
/// Folds `travel + gradient` into [0, 180) and measures distance from 90°,
/// so a gradient perpendicular to the travel direction (a boundary running
/// along the path) contributes nothing.
fn angular_deviation(travel: f32, gradient: f32) -> f32 {
    let sum = travel + gradient;
    (sum - (sum / 180.0).floor() * 180.0 - 90.0).abs()
}

/// Boundary-strength plus bending-penalty cost rule
#[derive(Debug, Default, Clone, Copy)]
pub struct LivewireRule;

impl LivewireRule {
    /// Penalty for the turn implied by stepping along `travel` between two
    /// pixels with the given gradient directions
    pub fn turn_penalty(direction_p: f32, direction_q: f32, travel: f32) -> f32 {
        (angular_deviation(travel, direction_p) + angular_deviation(travel, direction_q))
            * TURN_PENALTY_SCALE
    }
}

impl CostRule for LivewireRule {
    type Label = u16;

    fn edge_cost(
        &self,
        fields: &FieldView<'_>,
        _labels: &mut [u16],
        p: usize,
        q: usize,
        direction: f32,
    ) -> f32 {
        fields.edge_at(q)
            + fields.cost_at(p)
            + Self::turn_penalty(fields.direction_at(p), fields.direction_at(q), direction)
    }
}

/// Interactive livewire session owning its single-seed label field
pub struct Livewire<'p> {
    engine: PropagationEngine<'p, LivewireRule>,
    labels: Vec<u16>,
    anchor: usize,
}

impl<'p> Livewire<'p> {
    /// Build a livewire session anchored at `anchor`
    ///
    /// `edge` should be low on object boundaries (inverted gradient
    /// magnitude); `direction` holds gradient directions in degrees.
    pub fn new(
        pool: &'p BufferPool,
        width: usize,
        height: usize,
        edge: &[f32],
        direction: &[f32],
        anchor: GridPoint,
    ) -> Self {
        let geometry = GridGeometry::new(width, height);
        let mut labels = vec![0u16; geometry.area()];
        let anchor = geometry.index_of(anchor);
        if let Some(seed) = labels.get_mut(anchor) {
            *seed = 1;
        }
        let engine = PropagationEngine::new(
            pool,
            width,
            height,
            edge,
            direction,
            &labels,
            Connectivity::Eight,
            LivewireRule,
        );
        Self {
            engine,
            labels,
            anchor,
        }
    }

    /// Re-anchor the wire and recompute the whole forest
    pub fn move_anchor(&mut self, anchor: GridPoint) {
        self.replant(anchor);
        self.engine.reinit(&self.labels, Connectivity::Eight);
    }

    /// Re-anchor and recompute only far enough to cover `checklist`
    ///
    /// The checklist is typically the previously displayed path in reverse
    /// pop order; see [`PropagationEngine::reinit_partial`].
    pub fn move_anchor_partial(&mut self, anchor: GridPoint, checklist: &[u32]) {
        self.replant(anchor);
        self.engine
            .reinit_partial(&self.labels, Connectivity::Eight, checklist);
    }

    /// Minimum-cost contour from `target` back to the anchor
    pub fn path_to(&self, target: GridPoint) -> Vec<GridPoint> {
        self.engine.path_to(target)
    }

    /// Append the contour from `target` to an existing preview polyline
    pub fn append_path_to(&self, target: GridPoint, points: &mut Vec<GridPoint>) {
        self.engine.append_path_to(target, points);
    }

    /// Current anchor position
    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    /// The underlying propagation engine
    pub const fn engine(&self) -> &PropagationEngine<'p, LivewireRule> {
        &self.engine
    }

    fn replant(&mut self, anchor: GridPoint) {
        if let Some(old) = self.labels.get_mut(self.anchor) {
            *old = 0;
        }
        self.anchor = self.engine.geometry().index_of(anchor);
        if let Some(new) = self.labels.get_mut(self.anchor) {
            *new = 1;
        }
    }
}
