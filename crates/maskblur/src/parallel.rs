/// Controls how a blur pass is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Parallelize over rows for large images, run serially otherwise.
    #[default]
    Auto,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of
    /// parallelization outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process output rows in parallel.
    Parallel,
}

impl ExecutionStrategy {
    /// Pixel count at which `Auto` switches to the parallel path.
    const AUTO_PARALLEL_THRESHOLD: usize = 100_000;

    /// Whether this strategy runs in parallel for the given number of pixels.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            Self::Serial => false,
            Self::Parallel => true,
            Self::Auto => num_pixels >= Self::AUTO_PARALLEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_is_parallel() {
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::Parallel.is_parallel(1));
        assert!(!ExecutionStrategy::Auto.is_parallel(99_999));
        assert!(ExecutionStrategy::Auto.is_parallel(100_000));
    }

    #[test]
    fn test_strategy_default() {
        assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Auto);
    }
}
