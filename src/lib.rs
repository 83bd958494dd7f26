//! Seeded shortest-path forest engine for interactive 2D image segmentation
//!
//! One propagation core — an image foresting transform with a pluggable,
//! path-dependent edge-cost rule — specialized into five interactive
//! techniques: competitive region growing, livewire contouring, adaptive
//! fuzzy connectedness, fast-marching distance propagation and Euclidean
//! distance mapping.

#![forbid(unsafe_code)]

/// Feature-field preparation from intensity images
pub mod analysis;
/// Core propagation engine, priority queue, path reconstruction and pool
pub mod forest;
/// Input/output operations and error handling
pub mod io;
/// Grid geometry and neighbor enumeration
pub mod spatial;
/// The five segmentation cost rules and their session wrappers
pub mod variants;

pub use forest::{BufferPool, COST_INFINITY, CostRule, PropagationEngine};
pub use io::error::{Result, SegmentationError};
pub use spatial::{Connectivity, GridGeometry, GridPoint};
