//! Separable convolution over interleaved RGBA rows.
//!
//! One routine serves both passes of a 2-D resize: it convolves every row of
//! the input with a kernel table and writes the output transposed, so running
//! it twice (X kernels, then Y kernels over the intermediate) yields the
//! final image in its original orientation.

use crate::kernel::{KernelTable, FIXED_FRAC_BITS};
use repix_core::RGBA_CHANNELS;

/// Half a fixed-point unit, added before the final shift for
/// round-to-nearest.
const FIXED_ROUND: i32 = 1 << (FIXED_FRAC_BITS - 1);

/// Convolves every row of `src` with `kernels` and stores the result
/// transposed in `dst`.
///
/// `src` is `src_w x src_h` interleaved RGBA; `dst` receives `dst_w x src_h`
/// output pixels addressed as `src_h x dst_w` (rows become columns). The
/// kernel table must have one row per destination sample (`dst_w`).
///
/// Channels accumulate independently in `i32`, wide enough for any clamped
/// tap count at 255 * 2^14 per tap. Output values saturate into `[0, 255]`.
pub fn convolve_transposed(
    src: &[u8],
    dst: &mut [u8],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    kernels: &KernelTable,
) {
    debug_assert_eq!(kernels.len(), dst_w);
    debug_assert_eq!(src.len(), src_w * src_h * RGBA_CHANNELS);
    debug_assert_eq!(dst.len(), dst_w * src_h * RGBA_CHANNELS);

    for src_y in 0..src_h {
        let row = &src[src_y * src_w * RGBA_CHANNELS..][..src_w * RGBA_CHANNELS];

        for (dst_x, (shift, taps)) in kernels.rows().enumerate() {
            let mut acc = [0i32; RGBA_CHANNELS];
            let mut offset = shift * RGBA_CHANNELS;
            for &tap in taps {
                let tap = tap as i32;
                acc[0] += tap * row[offset] as i32;
                acc[1] += tap * row[offset + 1] as i32;
                acc[2] += tap * row[offset + 2] as i32;
                acc[3] += tap * row[offset + 3] as i32;
                offset += RGBA_CHANNELS;
            }

            // Transposed store: pixel (dst_x, src_y) lands at (src_y, dst_x)
            // so the second pass can run this same routine.
            let out = (dst_x * src_h + src_y) * RGBA_CHANNELS;
            for (slot, &value) in dst[out..out + RGBA_CHANNELS].iter_mut().zip(acc.iter()) {
                *slot = clamp_channel((value + FIXED_ROUND) >> FIXED_FRAC_BITS);
            }
        }
    }
}

/// Saturates an accumulated channel value into the 8-bit range.
#[inline]
fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
