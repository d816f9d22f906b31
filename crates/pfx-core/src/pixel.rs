//! 8-bit RGB pixel type and channel helpers.
//!
//! # Types
//!
//! - [`Color`] - RGB pixel with three `u8` channels
//!
//! # Channel Contract
//!
//! Every channel is in `[0, 255]`. Filters compute intermediate values in
//! `i32` or `f32` and go through [`Color::from_clamped`] or
//! [`Color::from_f32_truncated`] before building a pixel, so nothing outside
//! that range ever reaches a buffer.
//!
//! ```
//! use pfx_core::Color;
//!
//! let c = Color::from_clamped(300, -20, 128);
//! assert_eq!(c, Color::new(255, 0, 128));
//! ```

use std::fmt;

// ============================================================================
// Intensity Weights
// ============================================================================

/// Intensity weight for the red channel.
pub const LUMA_R: f32 = 0.36;

/// Intensity weight for the green channel.
pub const LUMA_G: f32 = 0.53;

/// Intensity weight for the blue channel.
pub const LUMA_B: f32 = 0.11;

/// Clamps `value` into `[min, max]`.
///
/// # Example
/// ```
/// use pfx_core::pixel::clamp;
/// assert_eq!(clamp(275, 0, 255), 255);
/// assert_eq!(clamp(-3, 0, 255), 0);
/// assert_eq!(clamp(42, 0, 255), 42);
/// ```
#[inline]
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Truncates a float toward zero, then clamps to a channel value.
///
/// NaN becomes 0. Out-of-range values saturate before clamping.
#[inline]
fn truncate_channel(v: f32) -> u8 {
    clamp(v as i32, 0, 255) as u8
}

/// RGB pixel with 8-bit channels.
///
/// `#[repr(C)]` keeps the `[r, g, b]` layout so a buffer of colors can be
/// viewed as interleaved RGB bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure black `(0, 0, 0)`.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white `(255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a gray color with all channels equal to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Creates a color from integer channels, clamping each to `[0, 255]`.
    #[inline]
    pub fn from_clamped(r: i32, g: i32, b: i32) -> Self {
        Self::new(
            clamp(r, 0, 255) as u8,
            clamp(g, 0, 255) as u8,
            clamp(b, 0, 255) as u8,
        )
    }

    /// Creates a color from float channels.
    ///
    /// Each channel is truncated toward zero (not rounded), then clamped.
    /// Truncation is what every filter in `pfx-ops` relies on for output
    /// parity, so `254.9` becomes `254`.
    ///
    /// ```
    /// use pfx_core::Color;
    ///
    /// assert_eq!(Color::from_f32_truncated(254.9, -0.5, 300.0), Color::new(254, 0, 255));
    /// ```
    #[inline]
    pub fn from_f32_truncated(r: f32, g: f32, b: f32) -> Self {
        Self::new(truncate_channel(r), truncate_channel(g), truncate_channel(b))
    }

    /// Returns the channels as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Creates a color from `[r, g, b]`.
    #[inline]
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Weighted intensity `0.36*R + 0.53*G + 0.11*B`.
    ///
    /// Computed in `f32` in that exact order. The weights sum to slightly
    /// less than one in `f32`, so some gray inputs land just below their
    /// integer value.
    #[inline]
    pub fn intensity(self) -> f32 {
        LUMA_R * self.r as f32 + LUMA_G * self.g as f32 + LUMA_B * self.b as f32
    }
}

impl From<[u8; 3]> for Color {
    fn from(arr: [u8; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
