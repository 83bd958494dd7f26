//! Gradient feature maps from an intensity image
//!
//! Produces the static per-pixel fields the cost rules read: Sobel gradient
//! magnitude, an inverted edge-strength map (low on strong boundaries, the
//! form livewire expects) and the gradient direction in degrees. Border
//! pixels replicate their nearest interior neighbor.

use ndarray::Array2;
use num_traits::ToPrimitive;

const SOBEL_HORIZONTAL: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_VERTICAL: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel feature fields derived from one intensity image
#[derive(Debug, Clone)]
pub struct FeatureMaps {
    /// Sobel gradient magnitude
    pub magnitude: Array2<f32>,
    /// Inverted, max-normalized magnitude: low on boundaries, in [0, 1]
    pub edge_strength: Array2<f32>,
    /// Gradient direction in degrees, in [-180, 180]
    pub direction: Array2<f32>,
}

/// Compute gradient feature maps from an intensity image
///
/// Accepts any numeric element type; values that cannot convert to `f32`
/// are treated as zero intensity.
pub fn gradient_features<T>(image: &Array2<T>) -> FeatureMaps
where
    T: ToPrimitive + Copy,
{
    let (height, width) = image.dim();
    let mut magnitude = Array2::<f32>::zeros((height, width));
    let mut direction = Array2::<f32>::zeros((height, width));

    let intensity =
        |y: usize, x: usize| image.get((y, x)).and_then(ToPrimitive::to_f32).unwrap_or(0.0);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for (ky, (row_h, row_v)) in SOBEL_HORIZONTAL.iter().zip(&SOBEL_VERTICAL).enumerate() {
                for (kx, (wh, wv)) in row_h.iter().zip(row_v).enumerate() {
                    let value = intensity(y + ky - 1, x + kx - 1);
                    gx += value * wh;
                    gy += value * wv;
                }
            }
            if let Some(cell) = magnitude.get_mut((y, x)) {
                *cell = gx.hypot(gy);
            }
            if let Some(cell) = direction.get_mut((y, x)) {
                *cell = gy.atan2(gx).to_degrees();
            }
        }
    }

    replicate_border(&mut magnitude);
    replicate_border(&mut direction);

    let peak = magnitude.iter().copied().fold(0.0f32, f32::max);
    let edge_strength = if peak > 0.0 {
        magnitude.mapv(|m| 1.0 - m / peak)
    } else {
        Array2::ones((height, width))
    };

    FeatureMaps {
        magnitude,
        edge_strength,
        direction,
    }
}

/// Flatten a 2D field into the linear-index layout the engine consumes
pub fn linear(field: &Array2<f32>) -> Vec<f32> {
    field.iter().copied().collect()
}

/// Copy the nearest interior value into each border pixel
fn replicate_border(field: &mut Array2<f32>) {
    let (height, width) = field.dim();
    if height < 3 || width < 3 {
        return;
    }
    for x in 0..width {
        let inner_x = x.clamp(1, width - 2);
        let top = field.get((1, inner_x)).copied().unwrap_or(0.0);
        if let Some(cell) = field.get_mut((0, x)) {
            *cell = top;
        }
        let bottom = field.get((height - 2, inner_x)).copied().unwrap_or(0.0);
        if let Some(cell) = field.get_mut((height - 1, x)) {
            *cell = bottom;
        }
    }
    for y in 0..height {
        let inner_y = y.clamp(1, height - 2);
        let left = field.get((inner_y, 1)).copied().unwrap_or(0.0);
        if let Some(cell) = field.get_mut((y, 0)) {
            *cell = left;
        }
        let right = field.get((inner_y, width - 2)).copied().unwrap_or(0.0);
        if let Some(cell) = field.get_mut((y, width - 1)) {
            *cell = right;
        }
    }
}
