//! Error types for pfx-core operations.
//!
//! # Usage
//!
//! ```rust
//! use pfx_core::{Error, Result};
//!
//! fn check_pixel(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::OutOfBounds { x, y, width, height });
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::image::PixelBuffer`] - Construction and bounds checking
//! - `pfx-ops` - Wrapped into `OpsError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by pixel buffer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside buffer bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pfx_core::Error;
    ///
    /// let err = Error::OutOfBounds { x: 100, y: 50, width: 80, height: 60 };
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Supplied pixel data does not match the requested dimensions.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// What was wrong
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::OutOfBounds { x: 3, y: 4, width: 2, height: 2 };
        assert_eq!(err.to_string(), "pixel (3, 4) out of bounds for buffer 2x2");
    }

    #[test]
    fn test_invalid_dimensions_helper() {
        let err = Error::invalid_dimensions(4, 4, "expected 16 pixels, got 3");
        assert!(matches!(err, Error::InvalidDimensions { width: 4, height: 4, .. }));
        assert!(err.to_string().contains("got 3"));
    }
}
