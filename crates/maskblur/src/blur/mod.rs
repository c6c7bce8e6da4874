//! Mask-modulated variable-radius blur
//!
//! A two-pass separable blur where the blur extent at each pixel is driven
//! by the alpha channel of a mask image sampled at that pixel.

/// Falloff weight kernels
pub mod weights;

/// Single-axis blur pass
mod pass;
pub use pass::{BlurAxis, FloatConversion};

/// Blur orchestration
mod ops;
pub use ops::*;
