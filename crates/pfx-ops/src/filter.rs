//! Pixel filters and the shared driving loop.
//!
//! Every filter answers one question: what is the output color at `(x, y)`
//! given the source buffer? [`Filter::compute_pixel`] is that answer, and
//! [`Filter::apply`] is the single loop that asks it for every pixel.
//!
//! # Filters
//!
//! | Filter | Kind | Output |
//! |--------|------|--------|
//! | [`Filter::Invert`] | per-pixel | `255 - c` |
//! | [`Filter::Brightness`] | per-pixel | `c + offset`, clamped |
//! | [`Filter::Grayscale`] | per-pixel | intensity on all channels |
//! | [`Filter::Sepia`] | per-pixel | intensity `+2k, +k/2, -k` |
//! | [`Filter::Matrix`] | neighborhood | kernel-weighted sum, clamp-to-edge |
//!
//! Blur, Sobel, Sharpness and Gaussian are [`Filter::Matrix`] with a preset
//! [`Kernel`]; [`FilterKind`] names all of them.
//!
//! # Driving Loop
//!
//! `apply` walks columns left to right and rows top to bottom within each
//! column. Before each column it reports `x * 100 / width` to the progress
//! sink and polls the cancellation predicate. A cancelled pass returns
//! `None` and the partial buffer is dropped.
//!
//! # Example
//!
//! ```rust
//! use pfx_core::{Color, PixelBuffer};
//! use pfx_ops::filter::Filter;
//!
//! let src = PixelBuffer::filled(3, 3, Color::BLACK);
//! let out = Filter::brightness().apply(&src, |_| {}, || false).unwrap();
//! assert_eq!(out.pixel(1, 1), Color::gray(20));
//! ```

use std::fmt;
use std::str::FromStr;

use pfx_core::{Color, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::kernel::Kernel;
use crate::{OpsError, OpsResult};

/// Brightness offset added to every channel.
pub const BRIGHTNESS_OFFSET: i32 = 20;

/// Sepia toning depth `k`: offsets are `+2k`, `+k/2`, `-k`.
pub const SEPIA_DEPTH: f32 = 40.0;

/// A filter that computes each output pixel from the source buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Channel-wise `255 - c`.
    Invert,
    /// Adds `offset` to each channel, then clamps.
    Brightness {
        /// Per-channel offset
        offset: i32,
    },
    /// Intensity on all three channels.
    Grayscale,
    /// Intensity toned by `depth`.
    Sepia {
        /// Toning depth
        depth: f32,
    },
    /// Convolution with a kernel.
    Matrix(Kernel),
}

impl Filter {
    /// Invert filter.
    pub fn invert() -> Self {
        Self::Invert
    }

    /// Brightness filter with offset 20.
    pub fn brightness() -> Self {
        Self::Brightness { offset: BRIGHTNESS_OFFSET }
    }

    /// Grayscale filter.
    pub fn grayscale() -> Self {
        Self::Grayscale
    }

    /// Sepia filter with depth 40.
    pub fn sepia() -> Self {
        Self::Sepia { depth: SEPIA_DEPTH }
    }

    /// Generic convolution with an explicit kernel.
    pub fn matrix(kernel: Kernel) -> Self {
        Self::Matrix(kernel)
    }

    /// 3x3 box blur.
    pub fn blur() -> Self {
        Self::Matrix(Kernel::box_blur())
    }

    /// 3x3 Sobel edge filter.
    pub fn sobel() -> Self {
        Self::Matrix(Kernel::sobel())
    }

    /// 3x3 sharpening filter.
    pub fn sharpness() -> Self {
        Self::Matrix(Kernel::sharpness())
    }

    /// Gaussian blur with radius 3 and sigma 2.
    pub fn gaussian() -> Self {
        Self::Matrix(Kernel::gaussian_default())
    }

    /// Gaussian blur with explicit parameters.
    ///
    /// # Errors
    ///
    /// See [`Kernel::gaussian`].
    pub fn gaussian_with(radius: usize, sigma: f32) -> OpsResult<Self> {
        Ok(Self::Matrix(Kernel::gaussian(radius, sigma)?))
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::Brightness { .. } => "brightness",
            Self::Grayscale => "grayscale",
            Self::Sepia { .. } => "sepia",
            Self::Matrix(_) => "matrix",
        }
    }

    /// Returns the kernel of a convolution filter.
    pub fn kernel(&self) -> Option<&Kernel> {
        match self {
            Self::Matrix(k) => Some(k),
            _ => None,
        }
    }

    /// Computes the output color at `(x, y)`.
    ///
    /// Pure: reads only `source`, writes nothing. `(x, y)` must be inside
    /// the buffer.
    ///
    /// ```rust
    /// use pfx_core::{Color, PixelBuffer};
    /// use pfx_ops::filter::Filter;
    ///
    /// let src = PixelBuffer::filled(1, 1, Color::new(10, 20, 30));
    /// assert_eq!(Filter::invert().compute_pixel(&src, 0, 0), Color::new(245, 235, 225));
    /// ```
    pub fn compute_pixel(&self, source: &PixelBuffer, x: u32, y: u32) -> Color {
        match self {
            Self::Invert => {
                let c = source.pixel(x, y);
                Color::new(255 - c.r, 255 - c.g, 255 - c.b)
            }
            Self::Brightness { offset } => {
                let c = source.pixel(x, y);
                Color::from_clamped(
                    (c.r as i32).saturating_add(*offset),
                    (c.g as i32).saturating_add(*offset),
                    (c.b as i32).saturating_add(*offset),
                )
            }
            Self::Grayscale => {
                let i = source.pixel(x, y).intensity();
                Color::from_f32_truncated(i, i, i)
            }
            Self::Sepia { depth } => {
                let i = source.pixel(x, y).intensity();
                Color::from_f32_truncated(i + 2.0 * depth, i + 0.5 * depth, i - depth)
            }
            Self::Matrix(kernel) => convolve_pixel(source, kernel, x, y),
        }
    }

    /// Runs the filter over every pixel of `source`.
    ///
    /// `on_progress` receives `floor(x / width * 100)` before column `x`;
    /// `is_cancelled` is polled right after. Returns `None` if cancelled,
    /// otherwise a buffer with the same dimensions as `source`.
    ///
    /// ```rust
    /// use pfx_core::PixelBuffer;
    /// use pfx_ops::filter::Filter;
    ///
    /// let src = PixelBuffer::new(4, 4);
    /// let mut seen = Vec::new();
    /// let out = Filter::invert().apply(&src, |p| seen.push(p), || false);
    /// assert!(out.is_some());
    /// assert_eq!(seen, vec![0, 25, 50, 75]);
    ///
    /// assert!(Filter::invert().apply(&src, |_| {}, || true).is_none());
    /// ```
    pub fn apply<P, C>(
        &self,
        source: &PixelBuffer,
        mut on_progress: P,
        is_cancelled: C,
    ) -> Option<PixelBuffer>
    where
        P: FnMut(u8),
        C: Fn() -> bool,
    {
        let (width, height) = source.dimensions();
        trace!(filter = self.name(), width, height, "Filter::apply");

        let mut result = PixelBuffer::new(width, height);
        for x in 0..width {
            on_progress(progress_percent(x, width));
            if is_cancelled() {
                debug!(filter = self.name(), column = x, "filter pass cancelled");
                return None;
            }
            for y in 0..height {
                result.set_pixel(x, y, self.compute_pixel(source, x, y));
            }
        }

        debug!(filter = self.name(), width, height, "filter pass complete");
        Some(result)
    }
}

/// Progress before column `x`: `x * 100 / width`, rounded down.
///
/// Exact integer math. Computing `x / width * 100` in `f32` instead gives
/// one less at a few columns (52 rather than 53 for column 53 of 100).
#[inline]
pub(crate) fn progress_percent(x: u32, width: u32) -> u8 {
    (x as u64 * 100 / width.max(1) as u64) as u8
}

/// Kernel-weighted sum around `(x, y)` with clamp-to-edge sampling.
///
/// Each channel is accumulated in `f32`, vertical offset outer and
/// horizontal offset inner, then truncated and clamped to `[0, 255]`.
/// Neighbors outside the buffer take the value of the nearest edge pixel.
///
/// ```rust
/// use pfx_core::{Color, PixelBuffer};
/// use pfx_ops::filter::convolve_pixel;
/// use pfx_ops::kernel::Kernel;
///
/// let src = PixelBuffer::filled(1, 1, Color::gray(90));
/// assert_eq!(convolve_pixel(&src, &Kernel::box_blur(), 0, 0), Color::gray(90));
/// ```
pub fn convolve_pixel(source: &PixelBuffer, kernel: &Kernel, x: u32, y: u32) -> Color {
    let (rx, ry) = kernel.radius();
    let (rx, ry) = (rx as isize, ry as isize);
    let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);

    for l in -ry..=ry {
        for k in -rx..=rx {
            let n = source.pixel_clamped(x as i64 + k as i64, y as i64 + l as i64);
            let w = kernel.weight(k, l);
            r += n.r as f32 * w;
            g += n.g as f32 * w;
            b += n.b as f32 * w;
        }
    }

    Color::from_f32_truncated(r, g, b)
}

/// Names of the built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// [`Filter::invert`]
    Invert,
    /// [`Filter::brightness`]
    Brightness,
    /// [`Filter::grayscale`]
    Grayscale,
    /// [`Filter::sepia`]
    Sepia,
    /// [`Filter::blur`]
    Blur,
    /// [`Filter::sobel`]
    Sobel,
    /// [`Filter::sharpness`]
    Sharpness,
    /// [`Filter::gaussian`]
    Gaussian,
}

impl FilterKind {
    /// Every built-in filter, in menu order.
    pub const ALL: [FilterKind; 8] = [
        Self::Invert,
        Self::Brightness,
        Self::Grayscale,
        Self::Sepia,
        Self::Blur,
        Self::Sobel,
        Self::Sharpness,
        Self::Gaussian,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::Brightness => "brightness",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Blur => "blur",
            Self::Sobel => "sobel",
            Self::Sharpness => "sharpness",
            Self::Gaussian => "gaussian",
        }
    }

    /// Returns true for kernel-driven filters.
    pub fn is_convolution(self) -> bool {
        matches!(self, Self::Blur | Self::Sobel | Self::Sharpness | Self::Gaussian)
    }

    /// Builds the filter with its default parameters.
    pub fn build(self) -> Filter {
        match self {
            Self::Invert => Filter::invert(),
            Self::Brightness => Filter::brightness(),
            Self::Grayscale => Filter::grayscale(),
            Self::Sepia => Filter::sepia(),
            Self::Blur => Filter::blur(),
            Self::Sobel => Filter::sobel(),
            Self::Sharpness => Filter::sharpness(),
            Self::Gaussian => Filter::gaussian(),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "invert" | "negative" => Ok(Self::Invert),
            "brightness" | "bright" => Ok(Self::Brightness),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::Grayscale),
            "sepia" | "sepya" => Ok(Self::Sepia),
            "blur" | "box" => Ok(Self::Blur),
            "sobel" | "edges" => Ok(Self::Sobel),
            "sharpness" | "sharpen" => Ok(Self::Sharpness),
            "gaussian" | "gauss" => Ok(Self::Gaussian),
            other => Err(OpsError::InvalidParameter(format!("unknown filter '{}'", other))),
        }
    }
}

impl From<FilterKind> for Filter {
    fn from(kind: FilterKind) -> Self {
        kind.build()
    }
}
