//! Competitive multi-seed region growing
//!
//! The cost of a path is the largest gradient jump along it, so regions
//! flood outward from every seed simultaneously and meet where the edge
//! field changes fastest. Ties are broken by queue insertion order: the
//! earliest-queued label keeps a pixel, which makes boundaries between
//! differently labeled seed curves deterministic and reproducible.

use crate::forest::engine::{CostRule, FieldView, PropagationEngine};
use crate::forest::pool::BufferPool;
use crate::spatial::Connectivity;

/// Max-of-gradient-jumps cost rule
#[derive(Debug, Default, Clone, Copy)]
pub struct RegionGrowingRule;

impl CostRule for RegionGrowingRule {
    type Label = f32;

    fn edge_cost(
        &self,
        fields: &FieldView<'_>,
        _labels: &mut [f32],
        p: usize,
        q: usize,
        _direction: f32,
    ) -> f32 {
        let jump = (fields.edge_at(p) - fields.edge_at(q)).abs();
        fields.cost_at(p).max(jump)
    }
}

/// Build a region-growing engine over a gradient field
///
/// `labels` assigns nonzero class ids to seed pixels; four-connected, with
/// the gradient field doubling as the (unused) direction field.
pub fn region_growing<'p>(
    pool: &'p BufferPool,
    width: usize,
    height: usize,
    gradient: &[f32],
    labels: &[f32],
) -> PropagationEngine<'p, RegionGrowingRule> {
    PropagationEngine::new(
        pool,
        width,
        height,
        gradient,
        gradient,
        labels,
        Connectivity::Four,
        RegionGrowingRule,
    )
}
