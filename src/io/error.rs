//! Error types for the CLI and image-processing boundary
//!
//! The propagation engine itself is infallible by contract; errors arise
//! only at the edges where files, images and user parameters enter.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all segmentation-tool operations
#[derive(Debug)]
pub enum SegmentationError {
    /// Failed to load an input image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a result map to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A seed position lies outside the image
    InvalidSeed {
        /// Seed column
        x: u32,
        /// Seed row
        y: u32,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidSeed {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Seed ({x}, {y}) lies outside the {width}x{height} image"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for SegmentationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SegmentationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for segmentation-tool results
pub type Result<T> = std::result::Result<T, SegmentationError>;

/// Create an invalid parameter error
pub fn invalid_parameter<V, R>(parameter: &'static str, value: &V, reason: &R) -> SegmentationError
where
    V: fmt::Display + ?Sized,
    R: fmt::Display + ?Sized,
{
    SegmentationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{SegmentationError, invalid_parameter};

    #[test]
    fn seed_error_names_bounds() {
        let err = SegmentationError::InvalidSeed {
            x: 9,
            y: 2,
            width: 8,
            height: 8,
        };
        let message = err.to_string();
        assert!(message.contains("(9, 2)"));
        assert!(message.contains("8x8"));
    }

    #[test]
    fn parameter_error_carries_reason() {
        let err = invalid_parameter("connectivity", &16, &"must be 4 or 8");
        assert!(err.to_string().contains("must be 4 or 8"));
    }
}
