//! Generic shortest-path-forest propagation over a pixel grid
//!
//! Computes a minimum-cost spanning forest from labeled seeds, where the
//! cost of extending a path from pixel `p` to neighbor `q` comes from an
//! injected cost rule that may read the cost already accumulated at `p`.
//! That path-dependence is what separates this from plain Dijkstra, and it
//! is why every rule must keep its costs finite and non-negative.
//!
//! The hot path is deliberately thin: dimension mismatches are debug
//! assertions, not validated errors, and the only defensive mechanism is the
//! finite infinity sentinel that keeps comparisons away from NaN.

use bitvec::vec::BitVec;

use crate::forest::label::LabelPayload;
use crate::forest::pool::{BufferPool, PoolHandle};
use crate::forest::queue::IndexPriorityQueue;
use crate::forest::path;
use crate::spatial::{Connectivity, GridGeometry, GridPoint};

/// Path cost assigned to unreached pixels
///
/// A large finite value rather than `f32::INFINITY` or NaN, so every
/// comparison in the relaxation loop stays well defined.
pub const COST_INFINITY: f32 = 1e10;

/// Read-only view of the per-pixel fields available to a cost rule
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    /// Grid dimensions, for rules that need pixel coordinates
    pub geometry: GridGeometry,
    /// Static edge-strength feature field
    pub edge: &'a [f32],
    /// Static gradient-direction feature field, in degrees
    pub direction: &'a [f32],
    /// Accumulated path costs, `COST_INFINITY` where unreached
    pub cost: &'a [f32],
}

impl FieldView<'_> {
    /// Edge-strength value at a pixel
    pub fn edge_at(&self, index: usize) -> f32 {
        self.edge.get(index).copied().unwrap_or(0.0)
    }

    /// Gradient direction at a pixel, in degrees
    pub fn direction_at(&self, index: usize) -> f32 {
        self.direction.get(index).copied().unwrap_or(0.0)
    }

    /// Accumulated path cost at a pixel
    pub fn cost_at(&self, index: usize) -> f32 {
        self.cost.get(index).copied().unwrap_or(COST_INFINITY)
    }
}

/// Strategy computing the cost of extending a path by one grid edge
///
/// `edge_cost` runs before the improvement test and may mutate label
/// payloads (the fast-marching rule accumulates arrival statistics there).
/// The label hooks run only when the extension improves on the previous
/// best path to `q`.
pub trait CostRule {
    /// Per-pixel payload this rule propagates
    type Label: LabelPayload;

    /// Cost of the path reaching `q` through `p` along `direction`
    fn edge_cost(
        &self,
        fields: &FieldView<'_>,
        labels: &mut [Self::Label],
        p: usize,
        q: usize,
        direction: f32,
    ) -> f32;

    /// Assign `q` its label when first queued through `p`
    fn adopt_label(&self, labels: &mut [Self::Label], p: usize, q: usize) {
        if let Some(&payload) = labels.get(p) {
            if let Some(target) = labels.get_mut(q) {
                *target = payload;
            }
        }
    }

    /// Re-assign `q`'s label when a cheaper path through `p` is found
    fn readopt_label(&self, labels: &mut [Self::Label], p: usize, q: usize) {
        self.adopt_label(labels, p, q);
    }
}

/// Shortest-path-forest engine with pluggable cost rule
///
/// One instance is constructed per image size and lives for a tool session;
/// `reinit` and `reinit_partial` reuse every buffer as seeds move. Float
/// buffers come from the session's [`BufferPool`] and return on drop.
pub struct PropagationEngine<'p, R: CostRule> {
    rule: R,
    geometry: GridGeometry,
    connectivity: Connectivity,
    edge: PoolHandle<'p>,
    direction: PoolHandle<'p>,
    cost: PoolHandle<'p>,
    labels: Vec<R::Label>,
    parent: Vec<Option<u32>>,
    processed: BitVec,
    queue: IndexPriorityQueue,
}

impl<'p, R: CostRule> PropagationEngine<'p, R> {
    /// Build an engine and run a full propagation from the given seeds
    ///
    /// `edge` and `direction` are copied into pooled buffers; `labels` marks
    /// seeds with payloads whose `is_seed` is true. All slices must cover
    /// `width * height` pixels.
    pub fn new(
        pool: &'p BufferPool,
        width: usize,
        height: usize,
        edge: &[f32],
        direction: &[f32],
        labels: &[R::Label],
        connectivity: Connectivity,
        rule: R,
    ) -> Self {
        let geometry = GridGeometry::new(width, height);
        let area = geometry.area();
        debug_assert_eq!(edge.len(), area);
        debug_assert_eq!(direction.len(), area);

        let mut engine = Self {
            rule,
            geometry,
            connectivity,
            edge: pool.acquire_from(edge),
            direction: pool.acquire_from(direction),
            cost: pool.acquire(area),
            labels: Vec::with_capacity(area),
            parent: vec![None; area],
            processed: BitVec::repeat(false, area),
            queue: IndexPriorityQueue::new(area),
        };
        engine.reinit(labels, connectivity);
        engine
    }

    /// Recompute the whole forest from a fresh seed labeling
    ///
    /// Terminates when the queue empties: every pixel reachable from a seed
    /// is then processed and final. An empty seed set degrades to "every
    /// pixel stays at the infinity sentinel" rather than failing.
    pub fn reinit(&mut self, labels: &[R::Label], connectivity: Connectivity) {
        self.connectivity = connectivity;
        self.seed(labels);
        self.propagate(None);
    }

    /// Recompute only far enough to finalize every pixel in `checklist`
    ///
    /// The checklist must be ordered by the previous run's pop order (a
    /// reconstructed path, reversed, satisfies this). The loop stops as soon
    /// as the last checklist pixel has been popped, which is what keeps
    /// livewire preview updates at interactive rate; the queue is cleared
    /// afterwards, leaving un-popped pixels unfinalized.
    pub fn reinit_partial(
        &mut self,
        labels: &[R::Label],
        connectivity: Connectivity,
        checklist: &[u32],
    ) {
        self.connectivity = connectivity;
        self.seed(labels);
        self.propagate(Some(checklist));
        self.queue.clear();
    }

    /// Full reinitialization with a re-supplied edge-strength field
    pub fn reinit_with_edge(
        &mut self,
        labels: &[R::Label],
        edge: &[f32],
        connectivity: Connectivity,
    ) {
        self.edge.copy_from(edge);
        self.reinit(labels, connectivity);
    }

    /// Partial reinitialization with a re-supplied edge-strength field
    pub fn reinit_partial_with_edge(
        &mut self,
        labels: &[R::Label],
        edge: &[f32],
        connectivity: Connectivity,
        checklist: &[u32],
    ) {
        self.edge.copy_from(edge);
        self.reinit_partial(labels, connectivity, checklist);
    }

    /// Finalized path-cost field; do not cache across reinitializations
    pub fn costs(&self) -> &[f32] {
        &self.cost
    }

    /// Finalized label field; do not cache across reinitializations
    pub fn labels(&self) -> &[R::Label] {
        &self.labels
    }

    /// Spanning-forest parent field (`None` marks roots and unreached pixels)
    pub fn parents(&self) -> &[Option<u32>] {
        &self.parent
    }

    /// Grid dimensions this engine was built for
    pub const fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Connectivity mode of the most recent propagation
    pub const fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Whether a pixel's cost and label are final for the current run
    pub fn is_processed(&self, index: usize) -> bool {
        self.processed.get(index).is_some_and(|bit| *bit)
    }

    /// Borrow the cost rule
    pub const fn rule(&self) -> &R {
        &self.rule
    }

    /// Mutably borrow the cost rule (for parameter updates between runs)
    pub const fn rule_mut(&mut self) -> &mut R {
        &mut self.rule
    }

    /// Reconstruct the minimum-cost path from `target` back to its seed
    pub fn path_to(&self, target: GridPoint) -> Vec<GridPoint> {
        path::trace(&self.parent, self.geometry, target)
    }

    /// Append the path from `target` to an existing polyline
    pub fn append_path_to(&self, target: GridPoint, points: &mut Vec<GridPoint>) {
        if self.geometry.contains(target) {
            path::append(&self.parent, self.geometry, target, points);
        }
    }

    /// Reconstruct the path to `target` as linear indices
    pub fn path_indices_to(&self, target: usize) -> Vec<u32> {
        path::trace_indices(&self.parent, target)
    }

    /// Reset all per-pixel state and queue the seeds at cost zero
    fn seed(&mut self, labels: &[R::Label]) {
        let area = self.geometry.area();
        debug_assert_eq!(labels.len(), area);

        self.queue.clear();
        self.labels.clear();
        self.labels.extend_from_slice(labels);
        self.processed.fill(false);

        for index in 0..area {
            if let Some(slot) = self.parent.get_mut(index) {
                *slot = None;
            }
            let seeded = labels.get(index).is_some_and(LabelPayload::is_seed);
            let initial = if seeded { 0.0 } else { COST_INFINITY };
            if let Some(cost) = self.cost.get_mut(index) {
                *cost = initial;
            }
            if seeded {
                self.queue.insert(index, 0.0);
            }
        }
    }

    /// Main pop-relax loop; `checklist` enables early exit
    fn propagate(&mut self, checklist: Option<&[u32]>) {
        let mut cursor = 0usize;
        while let Some(position) = self.queue.pop() {
            let position = position as usize;
            self.processed.set(position, true);

            if let Some(list) = checklist {
                if list.get(cursor).copied() == Some(position as u32) {
                    cursor += 1;
                    while list
                        .get(cursor)
                        .is_some_and(|&next| self.is_processed(next as usize))
                    {
                        cursor += 1;
                    }
                }
            }

            let neighbors = self.geometry.neighbors(position, self.connectivity);
            for &(neighbor, direction) in neighbors.as_slice() {
                self.relax(position, neighbor, direction);
            }

            if checklist.is_some_and(|list| cursor >= list.len()) {
                break;
            }
        }
    }

    /// Attempt to improve the path to `q` through processed pixel `p`
    fn relax(&mut self, p: usize, q: usize, direction: f32) {
        if self.is_processed(q) {
            return;
        }

        let fields = FieldView {
            geometry: self.geometry,
            edge: &self.edge,
            direction: &self.direction,
            cost: &self.cost,
        };
        let candidate = self.rule.edge_cost(&fields, &mut self.labels, p, q, direction);
        debug_assert!(candidate >= 0.0, "cost rules must stay non-negative");

        let current = self.cost.get(q).copied().unwrap_or(COST_INFINITY);
        if candidate < current {
            if let Some(slot) = self.parent.get_mut(q) {
                *slot = Some(p as u32);
            }
            if self.queue.in_queue(q) {
                self.rule.readopt_label(&mut self.labels, p, q);
                self.queue.decrease_key(q, candidate);
            } else {
                self.rule.adopt_label(&mut self.labels, p, q);
                self.queue.insert(q, candidate);
            }
            if let Some(cost) = self.cost.get_mut(q) {
                *cost = candidate;
            }
        }
    }
}
