//! Fast-marching wavefront propagation
//!
//! Approximates the Eikonal equation on the grid: each pixel accumulates
//! the count, sum and sum of squares of its neighbors' arrival costs and
//! solves a quadratic for its own arrival, upwind finite-difference style.
//! Unlike the other rules the resulting costs are not strictly
//! non-decreasing in pop order; that is a documented, accepted
//! approximation of the scheme.

use crate::forest::engine::{COST_INFINITY, CostRule, FieldView, PropagationEngine};
use crate::forest::label::UpwindStats;
use crate::forest::pool::BufferPool;
use crate::spatial::Connectivity;

/// Quadratic upwind arrival-cost rule over an inverse-speed field
#[derive(Debug, Default, Clone, Copy)]
pub struct FastMarchingRule;

impl CostRule for FastMarchingRule {
    type Label = UpwindStats;

    fn edge_cost(
        &self,
        fields: &FieldView<'_>,
        labels: &mut [UpwindStats],
        p: usize,
        q: usize,
        _direction: f32,
    ) -> f32 {
        let arrival = fields.cost_at(p);
        let Some(stats) = labels.get_mut(q) else {
            return COST_INFINITY;
        };
        stats.arrivals += 1;
        stats.sum += arrival;
        stats.sum_sq += arrival * arrival;

        let count = f32::from(stats.arrivals);
        let sum = stats.sum;
        // Larger root of count*t^2 - 2*sum*t + (sum_sq - inverse_speed) = 0.
        // A negative discriminant (possible for some neighbor
        // configurations) is clamped to zero, degenerating to the mean of
        // the contributing arrivals instead of producing NaN.
        let discriminant = sum * sum + fields.edge_at(q) - count * stats.sum_sq;
        (sum + discriminant.max(0.0).sqrt()) / count
    }

    fn adopt_label(&self, _labels: &mut [UpwindStats], _p: usize, _q: usize) {
        // Statistics accumulate inside edge_cost; nothing is inherited.
    }
}

/// Convert a speed field into the inverse-speed field the rule expects
///
/// Zero-speed pixels become effectively impassable via the infinity
/// sentinel.
pub fn inverse_speed(speed: &[f32]) -> Vec<f32> {
    speed
        .iter()
        .map(|&s| if s == 0.0 { COST_INFINITY } else { 1.0 / (s * s) })
        .collect()
}

/// Build a fast-marching engine from a speed field and scalar seed labels
///
/// `seeds` marks wavefront sources with nonzero values; four-connected.
pub fn fast_marching<'p>(
    pool: &'p BufferPool,
    width: usize,
    height: usize,
    speed: &[f32],
    seeds: &[f32],
) -> PropagationEngine<'p, FastMarchingRule> {
    let field = inverse_speed(speed);
    let payloads: Vec<UpwindStats> = seeds
        .iter()
        .map(|&s| {
            if s == 0.0 {
                UpwindStats::default()
            } else {
                UpwindStats::seed()
            }
        })
        .collect();
    PropagationEngine::new(
        pool,
        width,
        height,
        &field,
        &field,
        &payloads,
        Connectivity::Four,
        FastMarchingRule,
    )
}
