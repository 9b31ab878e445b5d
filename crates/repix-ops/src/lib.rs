//! # repix-ops
//!
//! Fixed-point raster resampling for interleaved 8-bit RGBA buffers.
//!
//! The engine resizes an image with band-limited reconstruction filters and
//! can then sharpen the result with an unsharp mask applied to a derived
//! brightness channel. All convolution arithmetic runs in Q14 fixed point so
//! results are deterministic across platforms.
//!
//! # Modules
//!
//! - [`filter`] - The reconstruction filter catalog (Box .. Lanczos4)
//! - [`kernel`] - Per-output-sample fixed-point kernel tables
//! - [`convolve`] - The separable two-pass convolver
//! - [`resize`] - Resize entry points and options
//! - [`unsharp`] - Unsharp-mask post-processing
//! - [`blur`] - Low-pass blur over a single 16-bit channel
//!
//! # Example
//!
//! ```rust
//! use repix_core::RgbaBuffer;
//! use repix_ops::{resize, unsharp_mask, Filter, ResizeOptions};
//!
//! let src = RgbaBuffer::filled(64, 64, [200, 40, 40, 255]).unwrap();
//!
//! let opts = ResizeOptions {
//!     filter: Filter::Lanczos3,
//!     opaque: true,
//!     ..ResizeOptions::new(32, 32)
//! };
//! let mut thumb = resize(&src, &opts).unwrap();
//!
//! unsharp_mask(&mut thumb, 80.0, 0.6, 2);
//! assert_eq!(thumb.dimensions(), (32, 32));
//! ```
//!
//! # Concurrency
//!
//! Every operation is a synchronous, bounded numeric pass on the invoking
//! thread. Calls borrow their buffers exclusively and retain nothing, so
//! independent buffers can be processed from any number of threads.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blur;
pub mod convolve;
pub mod filter;
pub mod kernel;
pub mod resize;
pub mod unsharp;

pub use error::{OpsError, OpsResult};
pub use filter::Filter;
pub use resize::{resize, resize_into, ResizeOptions};
pub use unsharp::unsharp_mask;
