//! Pixel buffer for filter input and output.
//!
//! [`PixelBuffer`] is a fixed-size grid of [`Color`] values. A filter pass
//! reads one buffer and writes a freshly allocated one of the same size.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom:
//!
//! ```text
//! [P(0,0) P(1,0) P(2,0) ...]  <- Row 0
//! [P(0,1) P(1,1) P(2,1) ...]  <- Row 1
//! ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pfx_core::{Color, PixelBuffer};
//!
//! let mut buf = PixelBuffer::new(4, 3);
//! buf.set_pixel(1, 2, Color::new(255, 128, 0));
//! assert_eq!(buf.pixel(1, 2), Color::new(255, 128, 0));
//!
//! // Out-of-range neighbors snap to the nearest edge pixel
//! assert_eq!(buf.pixel_clamped(7, 9), buf.pixel(3, 2));
//! ```
//!
//! # Used By
//!
//! - `pfx-ops` - every filter reads and writes these buffers

use crate::{Color, Error, Result};

/// Owned RGB8 pixel grid with fixed dimensions.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixel data, row-major
    data: Vec<Color>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl PixelBuffer {
    /// Creates a new buffer filled with black.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pfx_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(1920, 1080);
    /// assert_eq!(buf.dimensions(), (1920, 1080));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    /// Creates a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let count = width as usize * height as usize;
        Self {
            data: vec![color; count],
            width,
            height,
        }
    }

    /// Creates a buffer from existing row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            data: pixels,
            width,
            height,
        })
    }

    /// Creates a buffer from interleaved `[R G B R G B ...]` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the byte count does not match
    /// `width * height * 3`, or if that product overflows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pfx_core::{Color, PixelBuffer};
    ///
    /// let buf = PixelBuffer::from_rgb8(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
    /// assert_eq!(buf.pixel(1, 0), Color::new(0, 0, 255));
    /// ```
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))?;
        if bytes.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, bytes.len()),
            ));
        }
        let data = bytes
            .chunks_exact(3)
            .map(|px| Color::new(px[0], px[1], px[2]))
            .collect();
        Ok(Self { data, width, height })
    }

    /// Returns the pixels as interleaved `[R G B ...]` bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the row-major pixel slice.
    #[inline]
    pub fn as_slice(&self) -> &[Color] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[self.offset(x, y)]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Returns the pixel at (x, y), or [`Error::OutOfBounds`].
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<Color> {
        self.get_pixel(x, y).ok_or(Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Returns the pixel nearest to the signed coordinate (x, y).
    ///
    /// Coordinates outside the buffer are clamped to the closest edge,
    /// so a neighbor at `(-1, 0)` samples `(0, 0)`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Color {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixel(cx, cy)
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        self.data[offset] = color;
    }

    /// Fills the entire buffer with `color`.
    pub fn fill(&mut self, color: Color) {
        self.data.fill(color);
    }

    /// Iterates over all pixels with their coordinates, row by row.
    ///
    /// ```rust
    /// use pfx_core::{Color, PixelBuffer};
    ///
    /// let buf = PixelBuffer::filled(3, 2, Color::WHITE);
    /// assert!(buf.pixels().all(|(_, _, c)| c == Color::WHITE));
    /// assert_eq!(buf.pixels().count(), 6);
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i as u32) % width, (i as u32) / width, c))
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
