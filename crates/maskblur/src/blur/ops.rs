use maskblur_image::{Image, ImageError};
use num_traits::Zero;

use super::pass::{BlurPass, FloatConversion};
use super::BlurAxis;
use crate::parallel::ExecutionStrategy;

/// Errors that can occur during a variable blur.
#[derive(thiserror::Error, Debug)]
pub enum VariableBlurError {
    /// The configured radius is not a positive finite number.
    #[error("blur radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// The configured sample budget is zero.
    #[error("max sample count must be > 0")]
    InvalidSampleCount,

    /// An image-level error such as mismatched sizes.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Parameters for a variable blur invocation.
///
/// The parameters are immutable for the duration of a render; construct a
/// new value to change them between invocations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBlurParams {
    /// Maximum blur extent in pixels, reached where the mask is fully opaque.
    pub radius: f32,

    /// Hard cap on the number of samples taken per direction per pixel.
    ///
    /// Radii larger than the cap spread the samples out instead of adding
    /// more, so very large radii with a small budget trade smoothness for
    /// bounded cost and can show visible banding. This is the intended
    /// cost contract, not a defect.
    pub max_sample_count: usize,

    /// Run the vertical pass before the horizontal pass.
    ///
    /// The separable approximation smears directionally near sharp mask or
    /// content edges; swapping the pass order changes which axis smears,
    /// letting callers pick the less objectionable one for their content.
    pub vertical_pass_first: bool,
}

impl VariableBlurParams {
    /// Create parameters with the default sample budget and pass order.
    ///
    /// # Arguments
    ///
    /// * `radius` - The maximum blur extent in pixels.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            max_sample_count: 15,
            vertical_pass_first: false,
        }
    }
}

fn validate<T, const C: usize>(
    src: &Image<T, C>,
    mask: &Image<f32, 4>,
    dst: &Image<T, C>,
    params: &VariableBlurParams,
) -> Result<(), VariableBlurError> {
    if !params.radius.is_finite() || params.radius <= 0.0 {
        return Err(VariableBlurError::InvalidRadius(params.radius));
    }

    if params.max_sample_count == 0 {
        return Err(VariableBlurError::InvalidSampleCount);
    }

    if src.size() != mask.size() {
        return Err(ImageError::InvalidImageSize(
            mask.cols(),
            mask.rows(),
            src.cols(),
            src.rows(),
        )
        .into());
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        )
        .into());
    }

    Ok(())
}

/// Apply a single mask-modulated blur pass along one axis.
///
/// The blur extent at each pixel is `params.radius` scaled by the mask
/// alpha at that pixel, sampled with clamp-to-edge addressing.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `mask` - The mask image with shape (H, W, 4); only the alpha channel is consulted.
/// * `dst` - The destination image with shape (H, W, C).
/// * `axis` - The axis along which neighbors are sampled.
/// * `params` - The blur parameters; `vertical_pass_first` is ignored here.
/// * `strategy` - Execution strategy: `Auto`, `Serial`, or `Parallel`.
pub fn variable_blur_pass<T, const C: usize>(
    src: &Image<T, C>,
    mask: &Image<f32, 4>,
    dst: &mut Image<T, C>,
    axis: BlurAxis,
    params: &VariableBlurParams,
    strategy: ExecutionStrategy,
) -> Result<(), VariableBlurError>
where
    T: FloatConversion + Copy + Send + Sync,
{
    validate(src, mask, dst, params)?;

    let pass = BlurPass::new(params.radius, params.max_sample_count);
    pass.apply(src, mask, dst, axis, strategy);

    Ok(())
}

/// Apply a mask-modulated variable-radius blur with execution strategy control.
///
/// Runs one blur pass per axis in the order selected by
/// `params.vertical_pass_first`, feeding the first pass's output into the
/// second. The mask is sampled unscaled by both passes and is never
/// re-blurred in between. The two sequential 1D passes approximate a 2D
/// variable-radius blur at O(n) cost per pixel per axis.
///
/// All parameters are validated before the first pass runs; on error no
/// partial result is written.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `mask` - The mask image with shape (H, W, 4); only the alpha channel is consulted.
/// * `dst` - The destination image with shape (H, W, C).
/// * `params` - The blur parameters.
/// * `strategy` - Execution strategy: `Auto`, `Serial`, or `Parallel`.
pub fn variable_blur_with_strategy<T, const C: usize>(
    src: &Image<T, C>,
    mask: &Image<f32, 4>,
    dst: &mut Image<T, C>,
    params: &VariableBlurParams,
    strategy: ExecutionStrategy,
) -> Result<(), VariableBlurError>
where
    T: FloatConversion + Copy + Zero + Send + Sync,
{
    validate(src, mask, dst, params)?;

    let (first, second) = if params.vertical_pass_first {
        (BlurAxis::Vertical, BlurAxis::Horizontal)
    } else {
        (BlurAxis::Horizontal, BlurAxis::Vertical)
    };

    let pass = BlurPass::new(params.radius, params.max_sample_count);

    let mut intermediate = Image::<T, C>::from_size_val(src.size(), T::zero())?;
    pass.apply(src, mask, &mut intermediate, first, strategy);
    pass.apply(&intermediate, mask, dst, second, strategy);

    Ok(())
}

/// Apply a mask-modulated variable-radius blur to an image.
///
/// Uses `ExecutionStrategy::Auto` (parallel for images ≥100K pixels, serial
/// otherwise). For explicit control, use [`variable_blur_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `mask` - The mask image with shape (H, W, 4); only the alpha channel is consulted.
/// * `dst` - The destination image with shape (H, W, C).
/// * `params` - The blur parameters.
pub fn variable_blur<T, const C: usize>(
    src: &Image<T, C>,
    mask: &Image<f32, 4>,
    dst: &mut Image<T, C>,
    params: &VariableBlurParams,
) -> Result<(), VariableBlurError>
where
    T: FloatConversion + Copy + Zero + Send + Sync,
{
    variable_blur_with_strategy(src, mask, dst, params, ExecutionStrategy::Auto)
}
