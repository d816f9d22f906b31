//! Convolution kernels.
//!
//! A [`Kernel`] is an immutable grid of `f32` weights with odd width and
//! height, so a unique center cell exists. It is validated once at
//! construction and never changes afterwards.
//!
//! # Presets
//!
//! - [`Kernel::box_blur`] - 3x3 uniform average
//! - [`Kernel::sobel`] - 3x3 gradient, unnormalized
//! - [`Kernel::sharpness`] - 3x3 cross sharpen, weights sum to 1
//! - [`Kernel::gaussian`] - `(2r+1)x(2r+1)` Gaussian, weights sum to 1
//!
//! # Layout
//!
//! Weights are stored row-major by vertical offset: cell `(kx, ky)` is
//! `data[ky * width + kx]`, with `kx` the horizontal index. Use
//! [`Kernel::from_columns`] to write a kernel as `[x][y]` nested arrays.
//!
//! # Example
//!
//! ```rust
//! use pfx_ops::kernel::Kernel;
//!
//! let k = Kernel::gaussian(3, 2.0).unwrap();
//! assert_eq!(k.radius(), (3, 3));
//! assert!((k.sum() - 1.0).abs() < 1e-5);
//! ```

use crate::{OpsError, OpsResult};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Default Gaussian radius.
pub const GAUSSIAN_RADIUS: usize = 3;

/// Default Gaussian sigma.
pub const GAUSSIAN_SIGMA: f32 = 2.0;


/// Convolution kernel for neighborhood filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidKernel`] if either dimension is zero or
    /// even, if `data.len() != width * height`, or if any weight is not finite.
    ///
    /// ```rust
    /// use pfx_ops::kernel::Kernel;
    ///
    /// assert!(Kernel::new(vec![1.0; 9], 3, 3).is_ok());
    /// assert!(Kernel::new(vec![1.0; 4], 2, 2).is_err());
    /// ```
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidKernel("kernel must not be empty".into()));
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidKernel(format!(
                "kernel dimensions must be odd, got {}x{}",
                width, height
            )));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidKernel(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        if let Some(pos) = data.iter().position(|w| !w.is_finite()) {
            return Err(OpsError::InvalidKernel(format!(
                "weight at index {} is not finite",
                pos
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Creates a kernel from columns: `columns[x][y]`.
    ///
    /// The outer index is the horizontal offset, matching how the Sobel
    /// weights below are usually written down.
    ///
    /// ```rust
    /// use pfx_ops::kernel::Kernel;
    ///
    /// let k = Kernel::from_columns(&[
    ///     &[-1.0, 0.0, 1.0],
    ///     &[-2.0, 0.0, 2.0],
    ///     &[-1.0, 0.0, 1.0],
    /// ]).unwrap();
    /// assert_eq!(k, Kernel::sobel());
    /// ```
    pub fn from_columns(columns: &[&[f32]]) -> OpsResult<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, |c| c.len());
        if columns.iter().any(|c| c.len() != height) {
            return Err(OpsError::InvalidKernel("columns have different lengths".into()));
        }
        let mut data = vec![0.0f32; width * height];
        for (kx, column) in columns.iter().enumerate() {
            for (ky, &w) in column.iter().enumerate() {
                data[ky * width + kx] = w;
            }
        }
        Self::new(data, width, height)
    }

    /// 3x3 box blur, every weight `1/9`.
    pub fn box_blur() -> Self {
        let count = 3 * 3;
        Self {
            data: vec![1.0 / count as f32; count],
            width: 3,
            height: 3,
        }
    }

    /// 3x3 Sobel gradient kernel.
    ///
    /// Columns `[-1, 0, 1]`, `[-2, 0, 2]`, `[-1, 0, 1]` (outer index
    /// horizontal). Not normalized: strong edges saturate once the result
    /// is clamped, and flat regions go to zero.
    pub fn sobel() -> Self {
        Self {
            // rows are vertical offsets -1, 0, +1
            data: vec![
                -1.0, -2.0, -1.0,
                0.0, 0.0, 0.0,
                1.0, 2.0, 1.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// 3x3 sharpening kernel.
    ///
    /// Corners are 0, edge neighbors -1, center 5. Weights sum to 1, so flat
    /// regions keep their value.
    pub fn sharpness() -> Self {
        let size = 3;
        let mut data = vec![0.0f32; size * size];
        for j in 0..size {
            for i in 0..size {
                data[j * size + i] = if (i + j) % 2 == 0 { 0.0 } else { -1.0 };
            }
        }
        data[size + 1] = 5.0;
        Self { data, width: size, height: size }
    }

    /// Creates a normalized Gaussian kernel of size `2 * radius + 1`.
    ///
    /// The weight at offset `(i, j)` is `exp(-(i² + j²) / sigma²)`; all
    /// weights are then divided by their total so they sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] if `sigma` is not a positive
    /// finite number, or if a `(2 * radius + 1)²` grid of `f32` cannot be
    /// addressed.
    ///
    /// ```rust
    /// use pfx_ops::kernel::Kernel;
    ///
    /// let k = Kernel::gaussian(2, 1.5).unwrap();
    /// assert_eq!(k.width(), 5);
    /// assert!(Kernel::gaussian(2, 0.0).is_err());
    /// ```
    pub fn gaussian(radius: usize, sigma: f32) -> OpsResult<Self> {
        // sigma² can underflow to zero for tiny positive sigma
        if !(sigma.is_finite() && sigma > 0.0 && sigma * sigma > 0.0) {
            return Err(OpsError::InvalidParameter(format!(
                "gaussian sigma must be positive, got {}",
                sigma
            )));
        }
        if gaussian_cells(radius).is_none() {
            return Err(OpsError::InvalidParameter(format!(
                "gaussian radius {} is too large",
                radius
            )));
        }
        trace!(radius, sigma, "Kernel::gaussian");
        Ok(Self::gaussian_unchecked(radius, sigma))
    }

    /// Gaussian with radius 3 and sigma 2.
    pub fn gaussian_default() -> Self {
        Self::gaussian_unchecked(GAUSSIAN_RADIUS, GAUSSIAN_SIGMA)
    }

    /// Two-pass Gaussian build: raw weights with a running total, then
    /// division by that total. Callers validate the parameters.
    fn gaussian_unchecked(radius: usize, sigma: f32) -> Self {
        let size = 2 * radius + 1;
        let r = radius as i64;
        let sigma2 = sigma * sigma;
        let mut data = vec![0.0f32; size * size];
        let mut norm = 0.0f32;

        for i in -r..=r {
            for j in -r..=r {
                let exponent = -((i * i + j * j) as f32) / sigma2;
                let w = (exponent as f64).exp() as f32;
                data[(j + r) as usize * size + (i + r) as usize] = w;
                norm += w;
            }
        }

        for w in &mut data {
            *w /= norm;
        }

        Self { data, width: size, height: size }
    }

    /// Kernel width (odd).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Kernel height (odd).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major weights.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the kernel radius `(width / 2, height / 2)`.
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Weight at cell `(kx, ky)`, both zero-based from the top-left.
    #[inline]
    pub fn at(&self, kx: usize, ky: usize) -> f32 {
        self.data[ky * self.width + kx]
    }

    /// Weight at signed offset `(dx, dy)` from the center.
    ///
    /// Offsets must lie within `[-radius, +radius]` on each axis.
    #[inline]
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        let (rx, ry) = self.radius();
        self.at((dx + rx as isize) as usize, (dy + ry as isize) as usize)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// Cell count of a Gaussian grid, if its `f32` storage fits in `isize::MAX` bytes.
fn gaussian_cells(radius: usize) -> Option<usize> {
    let size = radius.checked_mul(2)?.checked_add(1)?;
    let cells = size.checked_mul(size)?;
    let bytes = cells.checked_mul(std::mem::size_of::<f32>())?;
    (bytes <= isize::MAX as usize).then_some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rejects_even() {
        let err = Kernel::new(vec![0.0; 6], 3, 2).unwrap_err();
        assert!(matches!(err, OpsError::InvalidKernel(_)));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Kernel::new(Vec::new(), 0, 0).is_err());
        assert!(Kernel::from_columns(&[]).is_err());
    }

    #[test]
    fn test_rejects_size_mismatch() {
        assert!(Kernel::new(vec![0.0; 8], 3, 3).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut data = vec![0.0; 9];
        data[4] = f32::NAN;
        assert!(Kernel::new(data, 3, 3).is_err());
    }

    #[test]
    fn test_rectangular() {
        let k = Kernel::new((0..15).map(|v| v as f32).collect(), 5, 3).unwrap();
        assert_eq!(k.radius(), (2, 1));
        assert_eq!(k.weight(0, 0), 7.0);
        assert_eq!(k.weight(-2, -1), 0.0);
        assert_eq!(k.weight(2, 1), 14.0);
    }

    #[test]
    fn test_from_columns_ragged() {
        assert!(Kernel::from_columns(&[&[1.0, 2.0, 3.0], &[1.0]]).is_err());
    }

    #[test]
    fn test_box_blur() {
        let k = Kernel::box_blur();
        assert_eq!(k.data().len(), 9);
        for v in k.data() {
            assert_abs_diff_eq!(*v, 1.0 / 9.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sobel_layout() {
        let k = Kernel::sobel();
        assert_eq!(k.weight(-1, -1), -1.0);
        assert_eq!(k.weight(0, -1), -2.0);
        assert_eq!(k.weight(1, 1), 1.0);
        assert_eq!(k.weight(0, 0), 0.0);
        assert_eq!(k.sum(), 0.0);
    }

    #[test]
    fn test_sharpness() {
        let k = Kernel::sharpness();
        assert_eq!(k.data(), &[0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0]);
        assert_eq!(k.sum(), 1.0);
    }

    #[test]
    fn test_gaussian_normalized() {
        for (radius, sigma) in [(0, 1.0), (1, 0.5), (3, 2.0), (5, 3.5), (8, 0.1)] {
            let k = Kernel::gaussian(radius, sigma).unwrap();
            assert_eq!(k.width(), 2 * radius + 1);
            assert_abs_diff_eq!(k.sum(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_gaussian_center_peak() {
        let k = Kernel::gaussian_default();
        assert_eq!(k.width(), 7);
        let center = k.weight(0, 0);
        assert!(k.data().iter().all(|&w| w <= center));
        assert!(center > k.weight(3, 3));
        assert_eq!(k.weight(1, 2), k.weight(-2, 1));
    }

    #[test]
    fn test_gaussian_bad_params() {
        assert!(Kernel::gaussian(3, 0.0).is_err());
        assert!(Kernel::gaussian(3, -1.0).is_err());
        assert!(Kernel::gaussian(3, f32::NAN).is_err());
        assert!(Kernel::gaussian(3, 1e-30).is_err());
        assert!(Kernel::gaussian(3, -2.0).is_err());
        assert!(Kernel::gaussian(3, f32::NEG_INFINITY).is_err());
        assert!(Kernel::gaussian(usize::MAX, 1.0).is_err());
        assert!(Kernel::gaussian(usize::MAX / 2, 1.0).is_err());
    }

    #[test]
    fn test_gaussian_large_radius() {
        let k = Kernel::gaussian(300, 2.0).unwrap();
        assert_eq!(k.width(), 601);
        assert_eq!(k.radius(), (300, 300));
        assert_abs_diff_eq!(k.sum(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_gaussian_cells() {
        assert_eq!(gaussian_cells(0), Some(1));
        assert_eq!(gaussian_cells(300), Some(601 * 601));
        assert_eq!(gaussian_cells(usize::MAX), None);
    }
}
