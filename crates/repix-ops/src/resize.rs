//! Resize entry points.
//!
//! A resize builds one kernel table per axis, runs the separable convolver
//! twice (the transposed intermediate lets both passes share one routine),
//! then applies the alpha policy.

use crate::convolve::convolve_transposed;
use crate::filter::Filter;
use crate::kernel::KernelTable;
use crate::{OpsError, OpsResult};
use repix_core::{RgbaBuffer, RGBA_CHANNELS};
use tracing::debug;

/// Options for a resize operation.
///
/// Scales default to `target / source` per axis; setting them explicitly
/// resamples a sub-region or super-region of the source instead. Offsets
/// shift the sampling grid in source pixels.
///
/// # Example
///
/// ```rust
/// use repix_ops::{Filter, ResizeOptions};
///
/// let opts = ResizeOptions {
///     filter: Filter::Lanczos2,
///     opaque: true,
///     ..ResizeOptions::new(320, 200)
/// };
/// assert_eq!(opts.target_width, 320);
/// assert_eq!(opts.scale_x, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOptions {
    /// Output width in pixels.
    pub target_width: u32,
    /// Output height in pixels.
    pub target_height: u32,
    /// Reconstruction filter (defaults to [`Filter::Lanczos3`]).
    pub filter: Filter,
    /// Horizontal scale; `None` means `target_width / source_width`.
    pub scale_x: Option<f32>,
    /// Vertical scale; `None` means `target_height / source_height`.
    pub scale_y: Option<f32>,
    /// Horizontal sampling offset in source pixels.
    pub offset_x: f32,
    /// Vertical sampling offset in source pixels.
    pub offset_y: f32,
    /// Declare the image fully opaque: every output alpha sample is forced
    /// to 255 after convolution. When `false` the computed
    /// (non-premultiplied) alpha is kept.
    pub opaque: bool,
}

impl ResizeOptions {
    /// Creates options for the given output size with default filter,
    /// scales and offsets.
    pub fn new(target_width: u32, target_height: u32) -> Self {
        Self {
            target_width,
            target_height,
            filter: Filter::default(),
            scale_x: None,
            scale_y: None,
            offset_x: 0.0,
            offset_y: 0.0,
            opaque: false,
        }
    }
}

/// Resizes `src` into a newly allocated buffer.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] for a zero target size and
/// [`OpsError::InvalidParameter`] for a non-positive or non-finite explicit
/// scale.
///
/// # Example
///
/// ```rust
/// use repix_core::RgbaBuffer;
/// use repix_ops::{resize, ResizeOptions};
///
/// let src = RgbaBuffer::filled(8, 8, [0, 255, 0, 255]).unwrap();
/// let dst = resize(&src, &ResizeOptions::new(4, 2)).unwrap();
/// assert_eq!(dst.dimensions(), (4, 2));
/// ```
pub fn resize(src: &RgbaBuffer, opts: &ResizeOptions) -> OpsResult<RgbaBuffer> {
    let mut dst = RgbaBuffer::new(opts.target_width, opts.target_height)?;
    resize_into(src, &mut dst, opts)?;
    Ok(dst)
}

/// Resizes `src` into the caller-supplied `dst` buffer.
///
/// `dst` is borrowed exclusively for the duration of the call and fully
/// overwritten; nothing is retained afterwards.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] if `dst`'s dimensions disagree with
/// the options, and the same validation errors as [`resize`].
pub fn resize_into(src: &RgbaBuffer, dst: &mut RgbaBuffer, opts: &ResizeOptions) -> OpsResult<()> {
    if dst.dimensions() != (opts.target_width, opts.target_height) {
        return Err(OpsError::SizeMismatch(format!(
            "destination is {}x{}, options want {}x{}",
            dst.width(),
            dst.height(),
            opts.target_width,
            opts.target_height
        )));
    }

    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let (dst_w, dst_h) = (dst.width() as usize, dst.height() as usize);

    let scale_x = effective_scale(opts.scale_x, dst_w, src_w, "scale_x")?;
    let scale_y = effective_scale(opts.scale_y, dst_h, src_h, "scale_y")?;

    debug!(
        src_w,
        src_h,
        dst_w,
        dst_h,
        filter = opts.filter.quality(),
        opaque = opts.opaque,
        "resize"
    );

    let kernels_x = KernelTable::build(opts.filter, src_w, dst_w, scale_x, opts.offset_x);
    let kernels_y = KernelTable::build(opts.filter, src_h, dst_h, scale_y, opts.offset_y);

    // Pass 1 leaves the intermediate transposed (src_h x dst_w); pass 2
    // transposes back while resampling the other axis.
    let mut intermediate = vec![0u8; dst_w * src_h * RGBA_CHANNELS];
    convolve_transposed(src.data(), &mut intermediate, src_w, src_h, dst_w, &kernels_x);
    convolve_transposed(&intermediate, dst.data_mut(), src_h, dst_w, dst_h, &kernels_y);

    if opts.opaque {
        reset_alpha(dst.data_mut());
    }
    Ok(())
}

/// Resolves an explicit scale against the `target / source` default.
fn effective_scale(
    explicit: Option<f32>,
    dst_size: usize,
    src_size: usize,
    name: &str,
) -> OpsResult<f32> {
    let scale = explicit.unwrap_or(dst_size as f32 / src_size as f32);
    if !scale.is_finite() || scale <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "{name} must be positive and finite, got {scale}"
        )));
    }
    Ok(scale)
}

/// Alpha policy for images declared opaque: force every alpha sample to
/// fully opaque.
fn reset_alpha(data: &mut [u8]) {
    for px in data.chunks_exact_mut(RGBA_CHANNELS) {
        px[3] = 0xff;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_downscale_uniform_red() {
        // 4x4 uniform red to 2x2: four pixels of the same red.
        let src = RgbaBuffer::filled(4, 4, [255, 0, 0, 255]).unwrap();
        let opts = ResizeOptions {
            filter: Filter::Box,
            opaque: true,
            ..ResizeOptions::new(2, 2)
        };
        let dst = resize(&src, &opts).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(dst.pixel(x, y), [255, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_identity_box_preserves_pixels() {
        let data: Vec<u8> = (0..6 * 5 * 4).map(|i| (i * 11 % 256) as u8).collect();
        let src = RgbaBuffer::from_data(6, 5, data).unwrap();
        let opts = ResizeOptions {
            filter: Filter::Box,
            ..ResizeOptions::new(6, 5)
        };
        let dst = resize(&src, &opts).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_lanczos_upscale_constant_gray() {
        for filter in [Filter::Lanczos2, Filter::Lanczos3, Filter::Lanczos4] {
            let src = RgbaBuffer::filled(2, 2, [120, 120, 120, 255]).unwrap();
            let opts = ResizeOptions {
                filter,
                ..ResizeOptions::new(8, 8)
            };
            let dst = resize(&src, &opts).unwrap();
            for y in 0..8 {
                for x in 0..8 {
                    assert_eq!(dst.pixel(x, y), [120, 120, 120, 255], "{filter:?}");
                }
            }
        }
    }

    #[test]
    fn test_opaque_forces_alpha() {
        let mut src = RgbaBuffer::new(5, 5).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                src.set_pixel(x, y, [10, 20, 30, (x * 40) as u8]);
            }
        }
        let opts = ResizeOptions {
            opaque: true,
            ..ResizeOptions::new(3, 3)
        };
        let dst = resize(&src, &opts).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(dst.pixel(x, y)[3], 255);
            }
        }
    }

    #[test]
    fn test_varied_alpha_kept_without_opaque() {
        let src = RgbaBuffer::filled(4, 4, [10, 20, 30, 128]).unwrap();
        let dst = resize(&src, &ResizeOptions::new(2, 2)).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(dst.pixel(x, y)[3], 128);
            }
        }
    }

    #[test]
    fn test_resize_into_checks_destination_size() {
        let src = RgbaBuffer::new(4, 4).unwrap();
        let mut dst = RgbaBuffer::new(3, 3).unwrap();
        let err = resize_into(&src, &mut dst, &ResizeOptions::new(2, 2)).unwrap_err();
        assert!(matches!(err, OpsError::SizeMismatch(_)));
    }

    #[test]
    fn test_zero_target_rejected() {
        let src = RgbaBuffer::new(4, 4).unwrap();
        assert!(resize(&src, &ResizeOptions::new(0, 2)).is_err());
        assert!(resize(&src, &ResizeOptions::new(2, 0)).is_err());
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        let src = RgbaBuffer::new(4, 4).unwrap();
        let opts = ResizeOptions {
            scale_x: Some(0.0),
            ..ResizeOptions::new(2, 2)
        };
        assert!(matches!(
            resize(&src, &opts).unwrap_err(),
            OpsError::InvalidParameter(_)
        ));

        let opts = ResizeOptions {
            scale_y: Some(-1.0),
            ..ResizeOptions::new(2, 2)
        };
        assert!(resize(&src, &opts).is_err());
    }

    #[test]
    fn test_explicit_scale_matches_default() {
        let data: Vec<u8> = (0..8 * 8 * 4).map(|i| (i % 256) as u8).collect();
        let src = RgbaBuffer::from_data(8, 8, data).unwrap();

        let implicit = resize(&src, &ResizeOptions::new(4, 4)).unwrap();
        let explicit = resize(
            &src,
            &ResizeOptions {
                scale_x: Some(0.5),
                scale_y: Some(0.5),
                ..ResizeOptions::new(4, 4)
            },
        )
        .unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_downscale_averages_checkerboard() {
        // 2x2 black/white blocks down to 1x1 per block pair: box averaging
        // lands mid-gray.
        let mut src = RgbaBuffer::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                src.set_pixel(x, y, [v, v, v, 255]);
            }
        }
        let opts = ResizeOptions {
            filter: Filter::Box,
            opaque: true,
            ..ResizeOptions::new(2, 2)
        };
        let dst = resize(&src, &opts).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                let px = dst.pixel(x, y);
                assert!((127..=128).contains(&px[0]), "got {}", px[0]);
                assert_eq!(px[3], 255);
            }
        }
    }
}
