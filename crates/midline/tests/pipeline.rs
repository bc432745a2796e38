use midline::image::{Image, ImageSize};
use midline::imgproc::hough::{LineCandidate, LineSegment};
use midline::{estimate_midline, MidlineConfig, MidlineError, MidlinePipeline};

const SIZE: usize = 120;
const BACKGROUND: u8 = 20;

/// Dark image with the lines `y = x + offset` drawn for `x` in `10..110`.
fn diagonals(offsets: &[i64]) -> Image<u8, 3> {
    let mut data = vec![BACKGROUND; SIZE * SIZE * 3];
    for &offset in offsets {
        for x in 10..110i64 {
            let y = x + offset;
            if (0..SIZE as i64).contains(&y) {
                let i = (y as usize * SIZE + x as usize) * 3;
                data[i..i + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
    }
    Image::new(
        ImageSize {
            width: SIZE,
            height: SIZE,
        },
        data,
    )
    .unwrap()
}

fn two_diagonals() -> Image<u8, 3> {
    diagonals(&[-30, 30])
}

/// Parameters the synthetic scene is tuned for.
fn diagonal_config() -> MidlineConfig {
    MidlineConfig {
        hough_rho: 1.0,
        hough_theta: std::f32::consts::FRAC_PI_4,
        hough_threshold: 60,
        min_line_length: Some(50),
        ..Default::default()
    }
}

/// Signed offset of a segment from the diagonal `y = x`.
fn diagonal_offset(seg: &LineSegment) -> f64 {
    ((seg.y1 - seg.x1) + (seg.y2 - seg.x2)) as f64 / 2.0
}

fn distance_to_segment(px: f64, py: f64, seg: &LineSegment) -> f64 {
    let (x1, y1) = (seg.x1 as f64, seg.y1 as f64);
    let (dx, dy) = (seg.x2 as f64 - x1, seg.y2 as f64 - y1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (px - (x1 + t * dx)).hypot(py - (y1 + t * dy))
}

#[test]
fn outputs_keep_the_input_size() -> Result<(), MidlineError> {
    let image = two_diagonals();
    let result = MidlinePipeline::new(diagonal_config()).run(&image)?;

    assert_eq!(result.binary.size(), image.size());
    assert_eq!(result.rendered.size(), image.size());
    assert_eq!(result.rendered.num_channels(), 3);
    Ok(())
}

#[test]
fn binary_image_has_two_levels() -> Result<(), MidlineError> {
    let result = MidlinePipeline::new(diagonal_config()).run(&two_diagonals())?;

    let binary = result.binary.as_slice();
    assert!(binary.iter().all(|&v| v == 0 || v == 192));
    assert!(binary.contains(&0));
    assert!(binary.contains(&192));
    Ok(())
}

#[test]
fn midline_between_two_diagonals() -> Result<(), MidlineError> {
    let image = two_diagonals();
    let result = MidlinePipeline::new(diagonal_config()).run(&image)?;

    assert!(result.candidates.len() >= 2);
    assert!(result
        .candidates
        .windows(2)
        .all(|w| w[0].votes >= w[1].votes));

    // the two best candidates come from different input lines
    let above = diagonal_offset(&result.candidates[0].segment);
    let below = diagonal_offset(&result.candidates[1].segment);
    assert!(above * below < 0.0, "{above} {below}");
    assert!((25.0..=35.0).contains(&above.abs()));
    assert!((25.0..=35.0).contains(&below.abs()));

    let seg = result.midline.to_pixels();
    assert!((seg.x1 - 20).abs() <= 2, "{seg:?}");
    assert!((seg.y1 - 20).abs() <= 2, "{seg:?}");
    assert!((seg.x2 - 100).abs() <= 2, "{seg:?}");
    assert!((seg.y2 - 100).abs() <= 2, "{seg:?}");

    Ok(())
}

#[test]
fn rendered_image_is_dimmed_with_a_red_midline() -> Result<(), MidlineError> {
    let image = two_diagonals();
    let result = MidlinePipeline::new(diagonal_config()).run(&image)?;
    let seg = result.midline.to_pixels();

    let src = image.as_slice();
    let dst = result.rendered.as_slice();

    for y in 0..SIZE {
        for x in 0..SIZE {
            let i = (y * SIZE + x) * 3;
            let d = distance_to_segment(x as f64, y as f64, &seg);
            if d <= 6.0 {
                // inside the stroke: red saturates, green and blue are dimmed
                assert_eq!(dst[i], 255, "({x}, {y})");
                assert_eq!(dst[i + 1], (src[i + 1] as f64 * 0.8).round() as u8);
                assert_eq!(dst[i + 2], (src[i + 2] as f64 * 0.8).round() as u8);
            } else if d > 8.5 {
                for c in 0..3 {
                    assert_eq!(dst[i + c], (src[i + c] as f64 * 0.8).round() as u8);
                }
            }
        }
    }

    // the midline pixel in the middle of the image
    assert_eq!(result.rendered.get_pixel(60, 60, 0)?, &255);
    assert_eq!(result.rendered.get_pixel(60, 60, 1)?, &16);
    // a pixel of an input line away from the stroke
    assert_eq!(result.rendered.get_pixel(60, 30, 0)?, &204);

    Ok(())
}

#[test]
fn only_the_two_first_candidates_count() -> Result<(), MidlineError> {
    let result = MidlinePipeline::new(diagonal_config()).run(&two_diagonals())?;

    let mut candidates = result.candidates[..2].to_vec();
    candidates.push(LineCandidate {
        segment: LineSegment::new(0, 119, 119, 0),
        votes: 0,
    });
    assert_eq!(estimate_midline(&candidates)?, result.midline);

    // changing the second ranked candidate moves the midline
    candidates.swap(1, 2);
    assert_ne!(estimate_midline(&candidates)?, result.midline);
    Ok(())
}

#[test]
fn same_input_same_output() -> Result<(), MidlineError> {
    let image = two_diagonals();
    let pipeline = MidlinePipeline::new(diagonal_config());

    let a = pipeline.run(&image)?;
    let b = pipeline.run(&image)?;
    assert_eq!(a.candidates, b.candidates);
    assert_eq!(a.midline, b.midline);
    assert_eq!(a.rendered, b.rendered);
    Ok(())
}

#[test]
fn black_image_has_no_lines() -> Result<(), MidlineError> {
    let image = Image::<u8, 3>::from_size_val(
        ImageSize {
            width: 64,
            height: 48,
        },
        0,
    )?;

    for config in [MidlineConfig::default(), diagonal_config()] {
        let res = MidlinePipeline::new(config).run(&image);
        assert!(matches!(res, Err(MidlineError::NoLinesDetected)));
    }
    Ok(())
}

#[test]
fn single_line_is_not_enough() {
    // a coarse rho keeps the whole blurred band in one bin, so the band yields one line
    let config = MidlineConfig {
        hough_rho: 3.0,
        hough_threshold: 440,
        ..diagonal_config()
    };
    let res = MidlinePipeline::new(config).run(&diagonals(&[0]));
    assert!(
        matches!(
            res,
            Err(MidlineError::InsufficientCandidates {
                found: 1,
                required: 2
            })
        ),
        "{res:?}"
    );
}

#[test]
fn run_file_writes_the_rendered_image() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("diagonals.png");
    let output = tmp_dir.path().join("midline.png");

    let image = two_diagonals();
    midline::io::functional::write_image_rgb8(&input, &image)?;

    let pipeline = MidlinePipeline::new(diagonal_config());
    let midline = pipeline.run_file(&input, &output)?;

    let expected = pipeline.run(&image)?;
    assert_eq!(midline, expected.midline);

    let written = midline::io::functional::read_image_any_rgb8(&output)?;
    assert_eq!(written, expected.rendered);
    Ok(())
}

#[test]
fn run_file_errors() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let pipeline = MidlinePipeline::new(diagonal_config());

    let res = pipeline.run_file(tmp_dir.path().join("missing.png"), tmp_dir.path().join("out.png"));
    assert!(matches!(res, Err(MidlineError::ImageLoadFailed(_))));

    let input = tmp_dir.path().join("diagonals.png");
    midline::io::functional::write_image_rgb8(&input, &two_diagonals())?;
    let res = pipeline.run_file(&input, tmp_dir.path().join("out.unknown"));
    assert!(matches!(res, Err(MidlineError::ImageWriteFailed(_))));
    Ok(())
}
