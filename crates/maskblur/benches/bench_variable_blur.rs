use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use maskblur::blur::{variable_blur_with_strategy, VariableBlurParams};
use maskblur::parallel::ExecutionStrategy;
use maskblur_image::{Image, ImageSize};

fn gradient_mask(size: ImageSize) -> Image<f32, 4> {
    let data = (0..size.height)
        .flat_map(|y| {
            let alpha = y as f32 / (size.height - 1) as f32;
            (0..size.width).flat_map(move |_| [0.0, 0.0, 0.0, alpha])
        })
        .collect();
    Image::new(size, data).unwrap()
}

fn bench_variable_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("Variable Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for max_sample_count in [5, 15, 31].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *max_sample_count) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, max_sample_count);

            let image_size = ImageSize {
                width: *width,
                height: *height,
            };

            let image_data = (0..width * height * 4)
                .map(|x| (x % 256) as f32 / 255.0)
                .collect();
            let image_f32 = Image::<f32, 4>::new(image_size, image_data).unwrap();
            let mask = gradient_mask(image_size);

            let output_f32 = Image::<f32, 4>::from_size_val(image_size, 0.0).unwrap();

            let mut params = VariableBlurParams::new(24.0);
            params.max_sample_count = *max_sample_count;

            group.bench_with_input(
                BenchmarkId::new("variable_blur_serial", &parameter_string),
                &(&image_f32, &mask, &output_f32),
                |b, i| {
                    let (src, mask, mut dst) = (i.0, i.1, i.2.clone());
                    b.iter(|| {
                        black_box(variable_blur_with_strategy(
                            src,
                            mask,
                            &mut dst,
                            &params,
                            ExecutionStrategy::Serial,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("variable_blur_parallel", &parameter_string),
                &(&image_f32, &mask, &output_f32),
                |b, i| {
                    let (src, mask, mut dst) = (i.0, i.1, i.2.clone());
                    b.iter(|| {
                        black_box(variable_blur_with_strategy(
                            src,
                            mask,
                            &mut dst,
                            &params,
                            ExecutionStrategy::Parallel,
                        ))
                    })
                },
            );

            let image_u8 = image_f32.cast::<u8>().unwrap();
            let output_u8 = Image::<u8, 4>::from_size_val(image_size, 0).unwrap();

            group.bench_with_input(
                BenchmarkId::new("variable_blur_parallel_u8", &parameter_string),
                &(&image_u8, &mask, &output_u8),
                |b, i| {
                    let (src, mask, mut dst) = (i.0, i.1, i.2.clone());
                    b.iter(|| {
                        black_box(variable_blur_with_strategy(
                            src,
                            mask,
                            &mut dst,
                            &params,
                            ExecutionStrategy::Parallel,
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_variable_blur);
criterion_main!(benches);
