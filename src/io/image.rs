//! Grayscale PNG import and result-map export
//!
//! The engine consumes normalized `f32` intensity fields; exports rescale
//! cost and label fields into 8-bit grayscale, ignoring the infinity
//! sentinel so unreachable pixels render black.

use crate::forest::engine::COST_INFINITY;
use crate::io::error::{Result, SegmentationError};
use crate::spatial::GridPoint;
use image::{GrayImage, ImageBuffer, Luma};
use ndarray::Array2;
use std::path::Path;

/// Load an image as a normalized grayscale intensity field in [0, 1]
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_intensity(path: &Path) -> Result<Array2<f32>> {
    let gray = image::open(path)
        .map_err(|e| SegmentationError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_luma8();
    let (width, height) = gray.dimensions();
    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(y, x)| {
            let value = gray.get_pixel(x as u32, y as u32).0;
            f32::from(value.first().copied().unwrap_or(0)) / 255.0
        },
    ))
}

/// Export a cost field as a normalized grayscale PNG
///
/// Costs at or above the infinity sentinel render black; everything else is
/// rescaled so the largest finite cost is white.
///
/// # Errors
///
/// Returns an error if the image cannot be written.
pub fn export_cost_map(costs: &[f32], width: usize, height: usize, path: &Path) -> Result<()> {
    let peak = costs
        .iter()
        .copied()
        .filter(|&c| c < COST_INFINITY)
        .fold(0.0f32, f32::max);
    let scale = if peak > 0.0 { 255.0 / peak } else { 0.0 };

    let img = build_gray(width, height, |index| {
        let cost = costs.get(index).copied().unwrap_or(COST_INFINITY);
        if cost >= COST_INFINITY {
            0
        } else {
            (cost * scale) as u8
        }
    });
    save(img, path)
}

/// Export a scalar label field as a grayscale PNG
///
/// Each distinct label value maps to an evenly spaced gray level, with
/// label zero (unseeded) black.
///
/// # Errors
///
/// Returns an error if the image cannot be written.
pub fn export_label_map(labels: &[f32], width: usize, height: usize, path: &Path) -> Result<()> {
    let peak = labels.iter().copied().fold(0.0f32, f32::max);
    let scale = if peak > 0.0 { 255.0 / peak } else { 0.0 };

    let img = build_gray(width, height, |index| {
        let label = labels.get(index).copied().unwrap_or(0.0);
        (label * scale) as u8
    });
    save(img, path)
}

/// Export a reconstructed path as a white-on-black overlay PNG
///
/// # Errors
///
/// Returns an error if the image cannot be written.
pub fn export_path_overlay(
    points: &[GridPoint],
    width: usize,
    height: usize,
    path: &Path,
) -> Result<()> {
    let mut img: GrayImage = ImageBuffer::new(width as u32, height as u32);
    for point in points {
        if (point.x as usize) < width && (point.y as usize) < height {
            img.put_pixel(point.x, point.y, Luma([255]));
        }
    }
    save(img, path)
}

fn build_gray(width: usize, height: usize, value: impl Fn(usize) -> u8) -> GrayImage {
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        Luma([value(y as usize * width + x as usize)])
    })
}

fn save(img: GrayImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SegmentationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }
    img.save(path).map_err(|e| SegmentationError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
