//! Low-pass blur over a single 16-bit channel.
//!
//! This is the smoothing primitive behind the unsharp mask. The contract is
//! deliberately loose: an approximately Gaussian low-pass whose smoothing
//! grows monotonically with `radius`. The provided implementation is a
//! separable Gaussian (sigma = radius, kernel truncated at three sigma,
//! edges clamped) run as two transposed passes, the same shape the resize
//! convolver uses.

/// Blurs a `width x height` plane of 16-bit samples in place.
///
/// `radius` acts as the Gaussian sigma in pixels; values <= 0 leave the
/// plane untouched. Sample count must match `width * height`.
pub fn blur_mono16(data: &mut [u16], width: usize, height: usize, radius: f32) {
    debug_assert_eq!(data.len(), width * height);
    if radius <= 0.0 || data.is_empty() {
        return;
    }

    let kernel = gaussian_kernel(radius);
    let mut scratch = vec![0u16; data.len()];

    // Two transposed passes return the plane to its original orientation.
    blur_pass(data, &mut scratch, width, height, &kernel);
    blur_pass(&scratch, data, height, width, &kernel);
}

/// Normalized 1-D Gaussian weights, truncated at three sigma.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil().max(1.0) as usize;
    let sigma2 = 2.0 * sigma * sigma;

    let mut weights = Vec::with_capacity(2 * radius + 1);
    let mut sum = 0.0f32;
    for i in 0..=2 * radius {
        let d = i as f32 - radius as f32;
        let w = (-d * d / sigma2).exp();
        sum += w;
        weights.push(w);
    }
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Convolves every row with `kernel` (edges clamped) and stores the result
/// transposed.
fn blur_pass(src: &[u16], dst: &mut [u16], width: usize, height: usize, kernel: &[f32]) {
    let radius = kernel.len() / 2;
    for y in 0..height {
        let row = &src[y * width..][..width];
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = (x + k).saturating_sub(radius).min(width - 1);
                acc += w * row[sx] as f32;
            }
            dst[x * height + y] = (acc + 0.5) as u16;
        }
    }
}
