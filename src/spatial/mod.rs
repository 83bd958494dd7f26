//! Spatial primitives for the pixel lattice
//!
//! The engine never materializes the grid as an explicit graph; everything
//! here works on linear indices into a `width * height` domain.

/// Grid geometry, connectivity modes and neighbor enumeration
pub mod grid;

pub use grid::{Connectivity, GridGeometry, GridPoint};
