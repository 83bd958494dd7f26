//! Core shortest-path-forest machinery
//!
//! The propagation engine, its index priority queue, label payloads, path
//! reconstruction and the session buffer pool. Cost rules live in
//! [`crate::variants`].

/// Generic propagation engine and the cost-rule strategy trait
pub mod engine;
/// Label payload trait and payload types
pub mod label;
/// Path reconstruction over the parent field
pub mod path;
/// Session-scoped float buffer pool
pub mod pool;
/// Indexed minimum-priority queue
pub mod queue;

pub use engine::{COST_INFINITY, CostRule, FieldView, PropagationEngine};
pub use label::{BoundaryOrigin, LabelPayload, UpwindStats};
pub use pool::{BufferPool, PoolHandle};
pub use queue::IndexPriorityQueue;
