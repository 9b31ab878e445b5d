//! # repix-core
//!
//! Core types for the repix raster resampling engine.
//!
//! This crate provides the foundational buffer types used throughout repix:
//!
//! - [`RgbaBuffer`] - Owned interleaved 8-bit RGBA pixel buffer
//! - [`Plane16`] - Single-channel 16-bit sample plane
//! - [`CoreError`] - Validation errors for buffer construction
//!
//! ## Design Philosophy
//!
//! Buffers validate their geometry at construction time: once a
//! [`RgbaBuffer`] or [`Plane16`] exists, its data length is guaranteed to
//! match its declared width and height. Processing code can therefore index
//! by geometry without re-checking lengths.
//!
//! Buffers are plain owned values. Operations that mutate them borrow them
//! exclusively for the duration of the call and retain nothing, so the same
//! buffer can be processed from multiple threads as long as each call owns
//! its own buffers.
//!
//! ## Memory Layout
//!
//! [`RgbaBuffer`] stores pixels in row-major order, top-to-bottom, with
//! channels interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod plane;

pub use buffer::{RgbaBuffer, RGBA_CHANNELS};
pub use error::{CoreError, CoreResult};
pub use plane::Plane16;
