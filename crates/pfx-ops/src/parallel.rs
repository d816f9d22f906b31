//! Parallel filter pass using Rayon.
//!
//! Every output pixel depends only on the source buffer, so columns can be
//! computed independently. [`apply_par`] keeps the sequential contract of
//! [`Filter::apply`]: progress is reported and cancellation polled on the
//! calling thread, in column order, once per batch of columns. The result
//! is identical to the sequential pass.
//!
//! # Example
//!
//! ```rust
//! use pfx_core::PixelBuffer;
//! use pfx_ops::{parallel, Filter};
//!
//! let src = PixelBuffer::new(64, 48);
//! let out = parallel::apply_par(&Filter::gaussian(), &src, |_| {}, || false).unwrap();
//! assert_eq!(out.dimensions(), (64, 48));
//! ```

use pfx_core::{Color, PixelBuffer};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::filter::{progress_percent, Filter};

/// Parallel version of [`Filter::apply`].
///
/// Columns are processed in batches of [`rayon::current_num_threads`].
/// Before each batch `on_progress` receives the percentage for the batch's
/// first column and `is_cancelled` is polled; a cancelled pass returns
/// `None`.
pub fn apply_par<P, C>(
    filter: &Filter,
    source: &PixelBuffer,
    mut on_progress: P,
    is_cancelled: C,
) -> Option<PixelBuffer>
where
    P: FnMut(u8),
    C: Fn() -> bool,
{
    let (width, height) = source.dimensions();
    let batch = rayon::current_num_threads().max(1) as u32;
    trace!(filter = filter.name(), width, height, batch, "parallel::apply_par");

    let mut result = PixelBuffer::new(width, height);
    let mut x0 = 0u32;
    while x0 < width {
        on_progress(progress_percent(x0, width));
        if is_cancelled() {
            debug!(filter = filter.name(), column = x0, "parallel filter pass cancelled");
            return None;
        }

        let x1 = x0.saturating_add(batch).min(width);
        let columns: Vec<Vec<Color>> = (x0..x1)
            .into_par_iter()
            .map(|x| (0..height).map(|y| filter.compute_pixel(source, x, y)).collect())
            .collect();

        for (x, column) in (x0..x1).zip(columns) {
            for (y, color) in column.into_iter().enumerate() {
                result.set_pixel(x, y as u32, color);
            }
        }
        x0 = x1;
    }

    debug!(filter = filter.name(), width, height, "parallel filter pass complete");
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterKind;

    fn noise(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        let mut state = 0x2545_f491u32;
        for y in 0..height {
            for x in 0..width {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                let [r, g, b, _] = state.to_le_bytes();
                buf.set_pixel(x, y, Color::new(r, g, b));
            }
        }
        buf
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let src = noise(37, 23);
        for kind in FilterKind::ALL {
            let filter = kind.build();
            let seq = filter.apply(&src, |_| {}, || false).unwrap();
            let par = apply_par(&filter, &src, |_| {}, || false).unwrap();
            assert_eq!(seq, par, "{}", kind);
        }
    }

    #[test]
    fn test_parallel_progress_monotonic() {
        let src = noise(50, 4);
        let mut seen = Vec::new();
        apply_par(&Filter::blur(), &src, |p| seen.push(p), || false).unwrap();
        assert_eq!(seen.first(), Some(&0));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert!(seen.iter().all(|&p| p < 100));
    }

    #[test]
    fn test_parallel_cancel() {
        let src = noise(8, 8);
        assert!(apply_par(&Filter::sobel(), &src, |_| {}, || true).is_none());
    }
}
