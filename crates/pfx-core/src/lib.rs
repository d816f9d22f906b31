//! # pfx-core
//!
//! Core types for raster pixel filtering.
//!
//! - [`Color`] - 8-bit RGB pixel with clamped channel construction
//! - [`PixelBuffer`] - Fixed-size grid of colors with clamp-to-edge sampling
//! - [`Error`] - Buffer construction and bounds errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The filter engine builds on it:
//!
//! ```text
//! pfx-core (this crate)
//!    ^
//!    |
//!    +-- pfx-ops (kernels, filters, driving loop, background job)
//!    +-- pfx-cli (command line host)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::PixelBuffer;
pub use pixel::{clamp, Color, LUMA_B, LUMA_G, LUMA_R};

/// Prelude module for convenient imports.
///
/// ```
/// use pfx_core::prelude::*;
///
/// let buf = PixelBuffer::filled(2, 2, Color::WHITE);
/// assert_eq!(buf.pixel(1, 1), Color::WHITE);
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::PixelBuffer;
    pub use crate::pixel::{clamp, Color};
}
