/// Create a normalized falloff kernel for one blur direction.
///
/// The kernel has `2 * sample_count + 1` taps, is Gaussian-shaped with
/// sigma `sample_count / 2`, symmetric around the center tap and
/// normalized to sum to one.
///
/// # Arguments
///
/// * `sample_count` - The number of taps on each side of the center.
///
/// # Returns
///
/// A vector of the kernel.
pub fn falloff_weights_1d(sample_count: usize) -> Vec<f32> {
    let kernel_size = 2 * sample_count + 1;
    let mean = sample_count as f32;
    let sigma = (sample_count as f32 / 2.0).max(0.5);
    let sigma_sq = sigma * sigma;

    let mut kernel = Vec::with_capacity(kernel_size);

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}
