//! Unsharp-mask post-processing.
//!
//! Sharpening happens on a derived brightness channel (per-pixel max of
//! R,G,B, widened to 16 bits): the channel is blurred, the amplified
//! difference between original and blur is added back, and each pixel's
//! R,G,B are scaled by the resulting brightness ratio. Scaling the HSV value
//! channel by a constant is equivalent to scaling each RGB component by the
//! same constant, so hue and saturation are preserved. Alpha is untouched.

use crate::blur::blur_mono16;
use repix_core::{Plane16, RgbaBuffer, RGBA_CHANNELS};
use tracing::debug;

/// Fractional bits of the Q12 amount and ratio values.
const RATIO_FRAC_BITS: u32 = 12;

/// Half a Q12 unit, for round-to-nearest.
const RATIO_ROUND: i32 = 1 << (RATIO_FRAC_BITS - 1);

/// Brightness ceiling: 255 << 8.
const BRIGHTNESS_MAX: i32 = 0xff00;

/// Extracts the brightness channel: `max(R, G, B) << 8` per pixel.
///
/// # Example
///
/// ```rust
/// use repix_core::RgbaBuffer;
/// use repix_ops::unsharp::brightness_plane;
///
/// let img = RgbaBuffer::filled(1, 1, [10, 200, 50, 255]).unwrap();
/// assert_eq!(brightness_plane(&img).data(), &[51200]);
/// ```
pub fn brightness_plane(image: &RgbaBuffer) -> Plane16 {
    let samples = image
        .data()
        .chunks_exact(RGBA_CHANNELS)
        .map(|px| (px[0].max(px[1]).max(px[2]) as u16) << 8)
        .collect();
    // Geometry comes from a validated buffer, so this cannot fail.
    Plane16::from_data(image.width(), image.height(), samples)
        .expect("brightness plane geometry matches source image")
}

/// Applies an unsharp mask to `image` in place.
///
/// `amount_percent` scales the sharpening correction (0 disables it),
/// `radius` is the blur radius in pixels (values below 0.5 disable the
/// operation, values above 2.0 are clamped), and `threshold` is the minimum
/// brightness difference (in 8-bit levels) a pixel must have from its
/// blurred surroundings before it is touched.
///
/// Purely numeric: no error outcomes, no allocation survives the call.
pub fn unsharp_mask(image: &mut RgbaBuffer, amount_percent: f32, radius: f32, threshold: u8) {
    unsharp_mask_with(image, amount_percent, radius, threshold, blur_mono16)
}

/// [`unsharp_mask`] with a caller-supplied blur operator.
///
/// The operator must smooth a `width x height` plane of 16-bit samples in
/// place, approximately Gaussian, monotonically stronger with `radius`. The
/// engine only depends on that contract, not on a concrete algorithm.
pub fn unsharp_mask_with<F>(
    image: &mut RgbaBuffer,
    amount_percent: f32,
    radius: f32,
    threshold: u8,
    mut blur: F,
) where
    F: FnMut(&mut [u16], usize, usize, f32),
{
    if amount_percent == 0.0 || radius < 0.5 {
        return;
    }
    let radius = radius.min(2.0);

    debug!(amount_percent, radius, threshold, "unsharp");

    let (width, height) = (image.width() as usize, image.height() as usize);
    let brightness = brightness_plane(image);
    let mut blurred = brightness.clone();
    blur(blurred.data_mut(), width, height, radius);

    let amount_fx = (amount_percent / 100.0 * (1 << RATIO_FRAC_BITS) as f32).round() as i32;
    let threshold_fx = (threshold as i32) << 8;

    let data = image.data_mut();
    for (i, (&value, &smoothed)) in brightness
        .data()
        .iter()
        .zip(blurred.data().iter())
        .enumerate()
    {
        let value = value as i32;
        let diff = 2 * (value - smoothed as i32);
        if diff.abs() < threshold_fx {
            continue;
        }

        // The boost product is widened to i64: the amount is unbounded
        // upward and diff spans +-2*0xff00.
        let boost = (amount_fx as i64 * diff as i64 + RATIO_ROUND as i64) >> RATIO_FRAC_BITS;
        let enhanced = (value as i64 + boost).clamp(0, BRIGHTNESS_MAX as i64) as i32;

        // A zero-brightness pixel is rgb(0,0,0); scaling zero leaves it
        // zero, so substituting 1 only avoids the division.
        let divisor = if value != 0 { value } else { 1 };
        let ratio_fx = (enhanced << RATIO_FRAC_BITS) / divisor;

        // Each channel is at most value >> 8, so channel * ratio tops out at
        // enhanced << 4 <= 0xff00 << 4 and the rounded shift stays <= 255.
        let px = &mut data[i * RGBA_CHANNELS..i * RGBA_CHANNELS + 3];
        for channel in px.iter_mut() {
            *channel = ((*channel as i32 * ratio_fx + RATIO_ROUND) >> RATIO_FRAC_BITS) as u8;
        }
    }
}
