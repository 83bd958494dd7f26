//! Feature-field preparation for the segmentation variants

/// Gradient-based per-pixel feature maps
pub mod features;

pub use features::{FeatureMaps, gradient_features, linear};
