use maskblur_image::Image;
use rayon::prelude::*;

use super::weights;

/// Trait for floating point casting
pub trait FloatConversion {
    /// Convert the type to f32
    fn to_f32(&self) -> f32;
    /// Convert the type from f32
    fn from_f32(val: f32) -> Self;
}

impl FloatConversion for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(val: f32) -> Self {
        val
    }
}

impl FloatConversion for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(val: f32) -> Self {
        val as f64
    }
}

impl FloatConversion for u8 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(val: f32) -> Self {
        val.round().clamp(0.0, 255.0) as u8
    }
}

/// The axis along which a blur pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurAxis {
    /// Sample neighbors along the image rows.
    Horizontal,
    /// Sample neighbors along the image columns.
    Vertical,
}

/// Channel of the mask image that drives the blur strength.
const MASK_ALPHA_CHANNEL: usize = 3;

/// Effective radii at or below this many pixels leave the pixel untouched.
const MIN_EFFECTIVE_RADIUS: f32 = 1e-3;

/// Scale the configured radius by the mask alpha at a pixel.
///
/// The mask only ever shrinks the radius; alpha values outside [0, 1]
/// are clamped on read.
pub(crate) fn effective_radius(radius: f32, mask_alpha: f32) -> f32 {
    radius * mask_alpha.clamp(0.0, 1.0)
}

/// Number of taps per direction for an effective radius.
///
/// Capped by `max_sample_count` so the per-pixel cost stays bounded no
/// matter how large the configured radius is.
pub(crate) fn sample_count_for(effective_radius: f32, max_sample_count: usize) -> usize {
    (effective_radius.ceil() as usize).clamp(1, max_sample_count)
}

/// A single-axis, mask-modulated blur pass.
///
/// Caches the falloff kernels for every admissible sample count so the
/// per-pixel loop only indexes into a precomputed table.
pub(crate) struct BlurPass {
    radius: f32,
    /// Falloff kernels indexed by sample count; entry `n` has `2n + 1` taps.
    kernels: Vec<Vec<f32>>,
}

impl BlurPass {
    /// Create a new blur pass for the given radius and sample budget.
    pub(crate) fn new(radius: f32, max_sample_count: usize) -> Self {
        let kernels = (0..=max_sample_count)
            .map(weights::falloff_weights_1d)
            .collect();

        Self { radius, kernels }
    }

    fn max_sample_count(&self) -> usize {
        self.kernels.len() - 1
    }

    /// Apply the pass along one axis with execution strategy control.
    ///
    /// Every output row is independent, so the parallel path hands each
    /// row to the global Rayon pool; inputs are immutable for the pass.
    pub(crate) fn apply<T, const C: usize>(
        &self,
        src: &Image<T, C>,
        mask: &Image<f32, 4>,
        dst: &mut Image<T, C>,
        axis: BlurAxis,
        strategy: crate::parallel::ExecutionStrategy,
    ) where
        T: FloatConversion + Copy + Send + Sync,
    {
        let rows = src.rows();
        let cols = src.cols();
        let num_pixels = rows * cols;

        let src_data = src.as_slice();
        let mask_data = mask.as_slice();

        if strategy.is_parallel(num_pixels) {
            dst.as_slice_mut()
                .par_chunks_mut(cols * C)
                .enumerate()
                .for_each(|(r, dst_row)| {
                    self.blur_row::<T, C>(src_data, mask_data, rows, cols, r, axis, dst_row);
                });
        } else {
            dst.as_slice_mut()
                .chunks_mut(cols * C)
                .enumerate()
                .for_each(|(r, dst_row)| {
                    self.blur_row::<T, C>(src_data, mask_data, rows, cols, r, axis, dst_row);
                });
        }
    }

    /// Compute one output row.
    #[allow(clippy::too_many_arguments)]
    fn blur_row<T, const C: usize>(
        &self,
        src_data: &[T],
        mask_data: &[f32],
        rows: usize,
        cols: usize,
        r: usize,
        axis: BlurAxis,
        dst_row: &mut [T],
    ) where
        T: FloatConversion + Copy,
    {
        let row_offset = r * cols * C;

        for c in 0..cols {
            let pix_idx = r * cols + c;
            let mask_alpha = mask_data[pix_idx * 4 + MASK_ALPHA_CHANNEL];
            let r_eff = effective_radius(self.radius, mask_alpha);

            let out_idx = c * C;

            // negligible radius: the source pixel passes through untouched,
            // alpha channel included, so no energy is lost
            if r_eff <= MIN_EFFECTIVE_RADIUS {
                let src_idx = row_offset + c * C;
                for ch in 0..C {
                    dst_row[out_idx + ch] = src_data[src_idx + ch];
                }
                continue;
            }

            let sample_count = sample_count_for(r_eff, self.max_sample_count());
            let step = r_eff / sample_count as f32;
            let kernel = &self.kernels[sample_count];

            let mut acc = [0.0f32; C];
            let mut weight_sum = 0.0f32;

            for (i, &weight) in kernel.iter().enumerate() {
                let offset = (i as isize - sample_count as isize) as f32 * step;
                let pixel = match axis {
                    BlurAxis::Horizontal => {
                        sample_row_clamped::<T, C>(src_data, cols, row_offset, c as f32 + offset)
                    }
                    BlurAxis::Vertical => {
                        sample_col_clamped::<T, C>(src_data, rows, cols, c, r as f32 + offset)
                    }
                };

                for ch in 0..C {
                    acc[ch] += weight * pixel[ch];
                }
                weight_sum += weight;
            }

            for ch in 0..C {
                dst_row[out_idx + ch] = T::from_f32(acc[ch] / weight_sum);
            }
        }
    }
}

/// Sample a row at a fractional column with clamp-to-edge addressing.
///
/// Fractional positions are resolved by linear interpolation between the
/// two nearest columns; coordinates outside the image repeat the edge
/// pixel instead of wrapping or reading zeros.
fn sample_row_clamped<T, const C: usize>(
    src_data: &[T],
    cols: usize,
    row_offset: usize,
    u: f32,
) -> [f32; C]
where
    T: FloatConversion + Copy,
{
    let u = u.clamp(0.0, (cols - 1) as f32);

    let iu0 = u.trunc() as usize;
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let frac = u.fract();

    let base0 = row_offset + iu0 * C;
    let base1 = row_offset + iu1 * C;

    let mut pixel = [0.0; C];
    for ch in 0..C {
        let p0 = src_data[base0 + ch].to_f32();
        let p1 = src_data[base1 + ch].to_f32();
        pixel[ch] = p0 * (1.0 - frac) + p1 * frac;
    }

    pixel
}

/// Sample a column at a fractional row with clamp-to-edge addressing.
fn sample_col_clamped<T, const C: usize>(
    src_data: &[T],
    rows: usize,
    cols: usize,
    c: usize,
    v: f32,
) -> [f32; C]
where
    T: FloatConversion + Copy,
{
    let v = v.clamp(0.0, (rows - 1) as f32);

    let iv0 = v.trunc() as usize;
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };
    let frac = v.fract();

    let base0 = (iv0 * cols + c) * C;
    let base1 = (iv1 * cols + c) * C;

    let mut pixel = [0.0; C];
    for ch in 0..C {
        let p0 = src_data[base0 + ch].to_f32();
        let p1 = src_data[base1 + ch].to_f32();
        pixel[ch] = p0 * (1.0 - frac) + p1 * frac;
    }

    pixel
}
