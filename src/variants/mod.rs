//! Segmentation techniques as cost-rule specializations of the engine
//!
//! Each variant swaps only the edge-cost rule and the per-pixel label
//! payload; the propagation loop, queue and path reconstruction are shared.

/// Euclidean distance mapping from a label boundary
pub mod distance;
/// Fast-marching Eikonal approximation
pub mod fast_marching;
/// Adaptive fuzzy connectedness
pub mod fuzzy;
/// Livewire / intelligent-scissors contouring
pub mod livewire;
/// Competitive multi-seed region growing
pub mod region_growing;

pub use distance::{DistanceRule, distance_map};
pub use fast_marching::{FastMarchingRule, fast_marching};
pub use fuzzy::{AdaptiveFuzzy, FuzzyRule};
pub use livewire::{Livewire, LivewireRule};
pub use region_growing::{RegionGrowingRule, region_growing};
