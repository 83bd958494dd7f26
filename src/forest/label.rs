//! Label payloads propagated alongside path costs
//!
//! Each cost rule chooses what it stores per pixel: a scalar class id, a
//! boundary-origin coordinate, or running upwind statistics. The engine only
//! needs to know whether a payload marks its pixel as a seed.

/// Per-pixel payload carried by the spanning forest
///
/// A payload whose `is_seed` is true queues its pixel as a forest root at
/// cost zero during reinitialization; everything else starts unreached.
pub trait LabelPayload: Copy {
    /// Test whether this payload marks a propagation root
    fn is_seed(&self) -> bool;
}

impl LabelPayload for f32 {
    fn is_seed(&self) -> bool {
        *self != 0.0
    }
}

impl LabelPayload for u8 {
    fn is_seed(&self) -> bool {
        *self != 0
    }
}

impl LabelPayload for u16 {
    fn is_seed(&self) -> bool {
        *self != 0
    }
}

impl LabelPayload for u32 {
    fn is_seed(&self) -> bool {
        *self != 0
    }
}

/// Running statistics of neighbor arrival costs for the fast-marching rule
///
/// Every relaxation of a pixel contributes one sample; the quadratic upwind
/// update is solved from the count, sum and sum of squares.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpwindStats {
    /// Number of contributing neighbor arrivals (1 marks a seed)
    pub arrivals: u16,
    /// Sum of contributing arrival costs
    pub sum: f32,
    /// Sum of squared contributing arrival costs
    pub sum_sq: f32,
}

impl UpwindStats {
    /// Payload for a seed pixel
    pub const fn seed() -> Self {
        Self {
            arrivals: 1,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }
}

impl LabelPayload for UpwindStats {
    fn is_seed(&self) -> bool {
        self.arrivals != 0
    }
}

/// Boundary-origin coordinate for the Euclidean distance rule
///
/// Every pixel starts holding its own coordinate; propagation overwrites it
/// with the coordinate of the nearest boundary pixel. Only `on_boundary`
/// decides seeding, so interior pixels with nonzero coordinates stay
/// unseeded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryOrigin {
    /// Whether this pixel lies on the scanned label discontinuity
    pub on_boundary: bool,
    /// Column of the origin pixel
    pub x: f32,
    /// Row of the origin pixel
    pub y: f32,
}

impl LabelPayload for BoundaryOrigin {
    fn is_seed(&self) -> bool {
        self.on_boundary
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundaryOrigin, LabelPayload, UpwindStats};

    #[test]
    fn scalar_zero_is_unseeded() {
        assert!(!0.0f32.is_seed());
        assert!(2.5f32.is_seed());
        assert!(!0u16.is_seed());
        assert!(7u16.is_seed());
    }

    #[test]
    fn coordinate_payload_seeds_only_on_boundary() {
        let interior = BoundaryOrigin {
            on_boundary: false,
            x: 3.0,
            y: 4.0,
        };
        assert!(!interior.is_seed());
        let boundary = BoundaryOrigin {
            on_boundary: true,
            ..interior
        };
        assert!(boundary.is_seed());
    }

    #[test]
    fn upwind_seed_has_one_arrival() {
        assert!(UpwindStats::seed().is_seed());
        assert!(!UpwindStats::default().is_seed());
    }
}
