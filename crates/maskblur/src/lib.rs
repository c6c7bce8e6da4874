#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// mask-modulated blur module.
pub mod blur;

/// module containing parallelization utilities.
pub mod parallel;
