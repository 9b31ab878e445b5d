//! Fixed-point convolution kernel tables.
//!
//! For one axis of a resize, [`KernelTable::build`] turns (filter, source
//! extent, destination extent, scale, sub-pixel offset) into one compact
//! kernel per destination sample: Q14 integer taps trimmed to their nonzero
//! support, plus the source index the support starts at.

use crate::filter::Filter;

/// Number of fractional bits in kernel fixed-point values.
pub const FIXED_FRAC_BITS: u32 = 14;

/// Unity gain in Q14: the value a corrected kernel row sums to.
pub const FIXED_ONE: i32 = 1 << FIXED_FRAC_BITS;

/// Converts a real weight to Q14 with round-to-nearest.
#[inline]
fn to_fixed(value: f32) -> i32 {
    (value * FIXED_ONE as f32).round() as i32
}

/// One destination sample's kernel: where its support starts in the source
/// row and which slice of the shared tap storage belongs to it.
#[derive(Debug, Clone, Copy)]
struct KernelSpan {
    /// First source index covered by the taps
    shift: u32,
    /// Offset into the shared tap vector
    start: u32,
    /// Number of taps
    len: u32,
}

impl KernelSpan {
    const EMPTY: Self = Self {
        shift: 0,
        start: 0,
        len: 0,
    };
}

/// Per-destination-sample convolution kernels for one axis.
///
/// Rows are packed: all taps live in one shared vector, each row records its
/// source shift and its slice of that storage. Rows with no nonzero taps have
/// length zero and convolve to zero.
///
/// Invariants, for every row: `shift >= 0` and
/// `shift + len - 1 < source size`; the taps of a nonzero row sum to exactly
/// [`FIXED_ONE`] whenever the drift correction landed in the row (see
/// [`build`](Self::build)).
#[derive(Debug, Clone)]
pub struct KernelTable {
    spans: Vec<KernelSpan>,
    taps: Vec<i16>,
}

impl KernelTable {
    /// Builds the kernel table for one axis.
    ///
    /// `scale` is destination/source (< 1 downscales). The filter window is
    /// widened by `1/min(1, scale)` when downscaling so the kernel keeps
    /// covering one destination pixel's worth of source samples; upscaling
    /// leaves it unchanged. `offset` shifts the sampling grid in source
    /// pixels.
    ///
    /// Purely numeric: source indices are clamped into range, degenerate
    /// rows come out empty, there are no error outcomes. Callers validate
    /// `src_size > 0`, `dst_size > 0` and `scale > 0` up front.
    pub fn build(filter: Filter, src_size: usize, dst_size: usize, scale: f32, offset: f32) -> Self {
        debug_assert!(src_size > 0 && dst_size > 0);
        debug_assert!(scale > 0.0);

        let scale_inv = 1.0 / scale;
        let scale_clamped = scale.min(1.0);
        let window = filter.support() / scale_clamped;

        let mut spans = Vec::with_capacity(dst_size);
        let mut taps: Vec<i16> = Vec::new();
        let mut float_taps: Vec<f32> = Vec::new();
        let mut fixed_taps: Vec<i32> = Vec::new();

        for dst_px in 0..dst_size {
            // Sampling is relative to the destination pixel's center point.
            let src_center = (dst_px as f32 + 0.5) * scale_inv + offset;

            let src_first = ((src_center - window).floor() as isize).max(0);
            let src_last = ((src_center + window).ceil() as isize).min(src_size as isize - 1);
            if src_last < src_first {
                spans.push(KernelSpan::EMPTY);
                continue;
            }
            let (src_first, src_last) = (src_first as usize, src_last as usize);

            float_taps.clear();
            let mut total = 0.0f32;
            for s in src_first..=src_last {
                let weight = filter.weight((s as f32 + 0.5 - src_center) * scale_clamped);
                total += weight;
                float_taps.push(weight);
            }
            if total == 0.0 {
                spans.push(KernelSpan::EMPTY);
                continue;
            }

            // Normalize to unity gain, quantize to Q14, and track the
            // quantized total so the drift correction can restore exactness.
            fixed_taps.clear();
            let mut fixed_total: i32 = 0;
            for &weight in &float_taps {
                let fx = to_fixed(weight / total);
                fixed_total += fx;
                fixed_taps.push(fx);
            }

            // Quantization drift lands on the tap at the destination array's
            // midpoint index - not this row's own center - and rows shorter
            // than that index stay uncorrected. Output compatibility depends
            // on this exact placement.
            if let Some(tap) = fixed_taps.get_mut(dst_size >> 1) {
                *tap += FIXED_ONE - fixed_total;
            }

            let lead = fixed_taps.iter().take_while(|&&t| t == 0).count();
            if lead == fixed_taps.len() {
                spans.push(KernelSpan::EMPTY);
                continue;
            }
            let trail = fixed_taps.iter().rev().take_while(|&&t| t == 0).count();
            let trimmed = &fixed_taps[lead..fixed_taps.len() - trail];

            let start = taps.len() as u32;
            taps.extend(trimmed.iter().map(|&t| {
                debug_assert!(i16::try_from(t).is_ok(), "tap {t} exceeds i16");
                t as i16
            }));
            spans.push(KernelSpan {
                shift: (src_first + lead) as u32,
                start,
                len: trimmed.len() as u32,
            });
        }

        Self { spans, taps }
    }

    /// Number of rows (= destination size the table was built for).
    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns row `index` as `(shift, taps)`. Empty rows yield an empty
    /// tap slice.
    #[inline]
    pub fn row(&self, index: usize) -> (usize, &[i16]) {
        let span = &self.spans[index];
        (
            span.shift as usize,
            &self.taps[span.start as usize..(span.start + span.len) as usize],
        )
    }

    /// Iterates over all rows as `(shift, taps)`.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[i16])> {
        (0..self.spans.len()).map(move |i| self.row(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FILTERS: [Filter; 5] = [
        Filter::Box,
        Filter::Hamming,
        Filter::Lanczos2,
        Filter::Lanczos3,
        Filter::Lanczos4,
    ];

    fn row_sum(taps: &[i16]) -> i32 {
        taps.iter().map(|&t| t as i32).sum()
    }

    #[test]
    fn test_identity_box_is_unit_tap() {
        let table = KernelTable::build(Filter::Box, 8, 8, 1.0, 0.0);
        assert_eq!(table.len(), 8);
        for (i, (shift, taps)) in table.rows().enumerate() {
            assert_eq!(shift, i);
            assert_eq!(taps, &[FIXED_ONE as i16]);
        }
    }

    #[test]
    fn test_downscale_rows_sum_to_unity() {
        // Strong downscales keep the drift index inside every row's working
        // array, so corrected rows must hit 2^14 exactly.
        for filter in ALL_FILTERS {
            for (src, dst) in [(64, 4), (100, 5), (37, 3)] {
                let scale = dst as f32 / src as f32;
                let table = KernelTable::build(filter, src, dst, scale, 0.0);
                for (_, taps) in table.rows() {
                    assert!(!taps.is_empty());
                    assert_eq!(
                        row_sum(taps),
                        FIXED_ONE,
                        "{filter:?} {src}->{dst} row drifted"
                    );
                }
            }
        }
    }

    #[test]
    fn test_shift_and_length_stay_in_source() {
        let cases = [
            (100usize, 31usize, 0.0f32),
            (31, 100, 0.0),
            (64, 64, 0.25),
            (7, 5, -0.75),
            (1, 3, 0.0),
            (3, 1, 0.0),
        ];
        for filter in ALL_FILTERS {
            for &(src, dst, offset) in &cases {
                let scale = dst as f32 / src as f32;
                let table = KernelTable::build(filter, src, dst, scale, offset);
                assert_eq!(table.len(), dst);
                for (shift, taps) in table.rows() {
                    if taps.is_empty() {
                        continue;
                    }
                    assert!(shift + taps.len() - 1 < src, "{filter:?} {src}->{dst}");
                }
            }
        }
    }

    #[test]
    fn test_uncorrected_rows_drift_is_bounded() {
        // Upscale: rows are short, the midpoint index misses them, and each
        // tap contributes at most half a fixed-point unit of rounding error.
        for filter in ALL_FILTERS {
            let table = KernelTable::build(filter, 16, 64, 4.0, 0.0);
            for (_, taps) in table.rows() {
                assert!(!taps.is_empty());
                let drift = (row_sum(taps) - FIXED_ONE).abs();
                assert!(drift as usize <= taps.len().div_ceil(2) + 1);
            }
        }
    }

    #[test]
    fn test_offset_far_outside_source_gives_empty_rows() {
        let table = KernelTable::build(Filter::Box, 4, 4, 1.0, 100.0);
        for (shift, taps) in table.rows() {
            assert_eq!(shift, 0);
            assert!(taps.is_empty());
        }
    }

    #[test]
    fn test_negative_lobes_survive_quantization() {
        // Lanczos3 at moderate downscale keeps negative side lobes in Q14.
        let table = KernelTable::build(Filter::Lanczos3, 64, 32, 0.5, 0.0);
        let has_negative = table.rows().any(|(_, taps)| taps.iter().any(|&t| t < 0));
        assert!(has_negative);
    }

    #[test]
    fn test_rows_trimmed_to_nonzero_support() {
        for filter in ALL_FILTERS {
            let table = KernelTable::build(filter, 50, 20, 0.4, 0.0);
            for (_, taps) in table.rows() {
                if let (Some(&first), Some(&last)) = (taps.first(), taps.last()) {
                    assert_ne!(first, 0);
                    assert_ne!(last, 0);
                }
            }
        }
    }
}
