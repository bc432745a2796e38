use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use midline_image::{Image, ImageSize};
use midline_imgproc::hough::{hough_lines_probabilistic, HoughParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// two diagonal bands plus salt noise
fn create_test_image(width: usize, height: usize) -> Image<u8, 1> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = (0..(width * height))
        .map(|_| if rng.random_bool(0.01) { 255 } else { 0 })
        .collect::<Vec<u8>>();

    for x in 0..width.min(height) {
        for offset in [0, height / 4] {
            for t in 0..3 {
                let y = x + offset + t;
                if y < height {
                    data[y * width + x] = 255;
                }
            }
        }
    }

    Image::new(ImageSize { width, height }, data).unwrap()
}

fn bench_hough(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hough");

    for (w, h) in [(256, 224), (512, 448), (1024, 896)].iter() {
        let src = create_test_image(*w, *h);
        let params = HoughParams {
            threshold: 100,
            min_line_length: 50,
            ..Default::default()
        };

        group.bench_with_input(
            BenchmarkId::new("probabilistic", format!("{}x{}", w, h)),
            &src,
            |b, src| {
                b.iter(|| std::hint::black_box(hough_lines_probabilistic(src, &params).unwrap()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_hough);
criterion_main!(benches);
