#![cfg(feature = "rayon")]

use rotraj::{
    Fill, ImageView, Interpolation, PaddingMode, TensorLayout, TrajectoryConfig,
    TrajectoryGenerator,
};

fn make_image(width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let value = ((x * 11) ^ (y * 3) ^ (x * y) ^ (c * 37)) & 0xFF;
                data.push(value as u8);
            }
        }
    }
    data
}

#[test]
fn parallel_matches_sequential() {
    let (width, height, channels) = (37, 22, 3);
    let data = make_image(width, height, channels);
    let view = ImageView::from_slice(&data, width, height, channels).unwrap();

    for (padding, layout, interpolation) in [
        (PaddingMode::Uniform, TensorLayout::Nchw, Interpolation::Bicubic),
        (PaddingMode::PerAxis, TensorLayout::Nhwc, Interpolation::Bilinear),
    ] {
        let base = TrajectoryConfig {
            angle_range: (-90.0, 270.0),
            sample_count: 24,
            fill: Fill::from([10u8, 20, 30]),
            interpolation,
            padding,
            layout,
            parallel: false,
        };
        let sequential = TrajectoryGenerator::new(base.clone())
            .unwrap()
            .generate(view)
            .unwrap();
        let parallel = TrajectoryGenerator::new(TrajectoryConfig {
            parallel: true,
            ..base
        })
        .unwrap()
        .generate(view)
        .unwrap();
        assert_eq!(sequential, parallel);
    }
}
