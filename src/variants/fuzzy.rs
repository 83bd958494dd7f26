//! Adaptive fuzzy connectedness
//!
//! Affinity between neighboring pixels combines two Gaussian terms: one on
//! the pair's mean intensity against a target object intensity, one on the
//! intensity difference. The path cost is the worst (lowest-affinity) link
//! along the path, so the cost field is a per-pixel "how weakly is this
//! connected to the seed" score. Parameters can be re-tuned between runs
//! without rebuilding the feature fields.

use crate::forest::engine::{CostRule, FieldView, PropagationEngine};
use crate::forest::pool::BufferPool;
use crate::spatial::{Connectivity, GridGeometry, GridPoint};

/// Two-Gaussian affinity cost rule with precomputed coefficients
#[derive(Debug, Clone, Copy)]
pub struct FuzzyRule {
    mean2: f32,
    spread_mean: f32,
    spread_diff: f32,
}

impl FuzzyRule {
    /// Derive coefficients from a target mean intensity and two spreads
    pub fn new(mean: f32, sigma_mean: f32, sigma_diff: f32) -> Self {
        Self {
            mean2: 2.0 * mean,
            spread_mean: -1.0 / (sigma_mean * sigma_mean * 8.0),
            spread_diff: -1.0 / (sigma_diff * 2.0),
        }
    }

    /// Affinity of the link between two intensities, in [0, 1]
    fn affinity(&self, intensity_p: f32, intensity_q: f32) -> f32 {
        let sum = intensity_p + intensity_q - self.mean2;
        let diff = intensity_p - intensity_q;
        let object = (sum * sum * self.spread_mean).exp();
        let homogeneity = (diff * diff * self.spread_diff).exp();
        (object * object + homogeneity * homogeneity) / (object + homogeneity)
    }
}

impl CostRule for FuzzyRule {
    type Label = f32;

    fn edge_cost(
        &self,
        fields: &FieldView<'_>,
        _labels: &mut [f32],
        p: usize,
        q: usize,
        _direction: f32,
    ) -> f32 {
        let affinity = self.affinity(fields.edge_at(p), fields.edge_at(q));
        fields.cost_at(p).max(1.0 - affinity)
    }
}

/// Interactive fuzzy-connectedness session with a movable single seed
pub struct AdaptiveFuzzy<'p> {
    engine: PropagationEngine<'p, FuzzyRule>,
    labels: Vec<f32>,
    seed: usize,
}

impl<'p> AdaptiveFuzzy<'p> {
    /// Build a session over an intensity field, seeded at `seed`
    pub fn new(
        pool: &'p BufferPool,
        width: usize,
        height: usize,
        intensity: &[f32],
        seed: GridPoint,
        mean: f32,
        sigma_mean: f32,
        sigma_diff: f32,
    ) -> Self {
        let geometry = GridGeometry::new(width, height);
        let mut labels = vec![0.0f32; geometry.area()];
        let seed = geometry.index_of(seed);
        if let Some(root) = labels.get_mut(seed) {
            *root = 1.0;
        }
        let engine = PropagationEngine::new(
            pool,
            width,
            height,
            intensity,
            intensity,
            &labels,
            Connectivity::Four,
            FuzzyRule::new(mean, sigma_mean, sigma_diff),
        );
        Self {
            engine,
            labels,
            seed,
        }
    }

    /// Move the seed and recompute connectedness
    pub fn move_seed(&mut self, seed: GridPoint) {
        if let Some(old) = self.labels.get_mut(self.seed) {
            *old = 0.0;
        }
        self.seed = self.engine.geometry().index_of(seed);
        if let Some(new) = self.labels.get_mut(self.seed) {
            *new = 1.0;
        }
        self.engine.reinit(&self.labels, Connectivity::Four);
    }

    /// Re-tune affinity parameters without touching feature fields
    ///
    /// Takes effect on the next [`Self::move_seed`] or [`Self::regrow`].
    pub fn set_params(&mut self, mean: f32, sigma_mean: f32, sigma_diff: f32) {
        *self.engine.rule_mut() = FuzzyRule::new(mean, sigma_mean, sigma_diff);
    }

    /// Recompute with the current seed and parameters
    pub fn regrow(&mut self) {
        self.engine.reinit(&self.labels, Connectivity::Four);
    }

    /// The underlying propagation engine
    pub const fn engine(&self) -> &PropagationEngine<'p, FuzzyRule> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::FuzzyRule;

    #[test]
    fn affinity_peaks_at_target_intensity() {
        let rule = FuzzyRule::new(100.0, 10.0, 5.0);
        let at_target = rule.affinity(100.0, 100.0);
        let far_away = rule.affinity(160.0, 160.0);
        assert!(at_target > far_away);
        assert!((0.0..=1.0).contains(&at_target));
    }

    #[test]
    fn homogeneous_pairs_beat_contrasting_pairs() {
        let rule = FuzzyRule::new(100.0, 20.0, 5.0);
        assert!(rule.affinity(100.0, 100.0) > rule.affinity(80.0, 120.0));
    }
}
