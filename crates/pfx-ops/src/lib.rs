//! # pfx-ops
//!
//! Pixel filters for 8-bit RGB buffers.
//!
//! A filter computes one output pixel from the source buffer; a single
//! driving loop applies it to every pixel with progress reporting and
//! cooperative cancellation.
//!
//! # Modules
//!
//! - [`kernel`] - Convolution kernels and presets
//! - [`filter`] - Filter variants, `compute_pixel`, the `apply` loop
//! - [`parallel`] - Rayon version of the loop (feature `parallel`)
//! - [`job`] - Running a pass on a worker thread
//!
//! # Example
//!
//! ```rust
//! use pfx_core::{Color, PixelBuffer};
//! use pfx_ops::{Filter, FilterKind};
//!
//! let src = PixelBuffer::filled(3, 3, Color::BLACK);
//!
//! let sharp = FilterKind::Sharpness.build().apply(&src, |_| {}, || false).unwrap();
//! assert!(sharp.as_slice().iter().all(|&c| c == Color::BLACK));
//!
//! let cancelled = Filter::sobel().apply(&src, |_| {}, || true);
//! assert!(cancelled.is_none());
//! ```
//!
//! ## Background Job
//!
//! ```rust
//! use pfx_core::PixelBuffer;
//! use pfx_ops::{Filter, FilterJob};
//!
//! let job = FilterJob::spawn(Filter::blur(), PixelBuffer::new(8, 8)).unwrap();
//! let result = job.wait_with(|percent| println!("{}%", percent)).unwrap();
//! assert!(result.is_some());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod job;
pub mod kernel;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use filter::{convolve_pixel, Filter, FilterKind};
pub use job::{CancelToken, FilterJob, JobEvent};
pub use kernel::Kernel;
