use criterion::{criterion_group, criterion_main, Criterion};
use rotraj::lowlevel::rotate_u8;
use rotraj::{Fill, ImageView, Interpolation, TrajectoryConfig, TrajectoryGenerator};
use std::hint::black_box;

fn make_image(width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let value = ((x * 13) ^ (y * 7) ^ (x * y) ^ (c * 29)) & 0xFF;
                data.push(value as u8);
            }
        }
    }
    data
}

fn bench_rotate(c: &mut Criterion) {
    let data = make_image(256, 256, 3);
    let view = ImageView::from_slice(&data, 256, 256, 3).unwrap();
    let fill = Fill::Scalar(0).resolve(3).unwrap();

    let mut group = c.benchmark_group("rotate_256_rgb");
    for filter in [
        Interpolation::Nearest,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
    ] {
        group.bench_function(format!("{filter:?}"), |b| {
            b.iter(|| rotate_u8(black_box(view), black_box(33.0), &fill, filter).unwrap())
        });
    }
    group.finish();
}

fn bench_trajectory(c: &mut Criterion) {
    // MNIST-sized digits resized to 32x32 with 100 angles.
    let data = make_image(32, 32, 1);
    let view = ImageView::from_slice(&data, 32, 32, 1).unwrap();
    let sequential = TrajectoryGenerator::new(TrajectoryConfig::default()).unwrap();
    c.bench_function("trajectory_32x32_x100", |b| {
        b.iter(|| sequential.generate(black_box(view)).unwrap())
    });

    #[cfg(feature = "rayon")]
    {
        let parallel = TrajectoryGenerator::new(TrajectoryConfig {
            parallel: true,
            ..TrajectoryConfig::default()
        })
        .unwrap();
        c.bench_function("trajectory_32x32_x100_par", |b| {
            b.iter(|| parallel.generate(black_box(view)).unwrap())
        });
    }

    let large = make_image(224, 224, 3);
    let large_view = ImageView::from_slice(&large, 224, 224, 3).unwrap();
    let short = TrajectoryGenerator::new(TrajectoryConfig {
        sample_count: 8,
        ..TrajectoryConfig::default()
    })
    .unwrap();
    c.bench_function("trajectory_224x224_rgb_x8", |b| {
        b.iter(|| short.generate(black_box(large_view)).unwrap())
    });
}

criterion_group!(benches, bench_rotate, bench_trajectory);
criterion_main!(benches);
