use std::f32::consts::PI;

use rand::{rngs::StdRng, Rng, SeedableRng};

use midline_image::{Image, ImageError};

/// Fixed point precision used while walking along a line.
const SHIFT: u32 = 16;

/// Finest angle resolution accepted, as a number of accumulator angles over `[0, pi)`.
const MAX_ANGLES: usize = 36_000;

/// A line segment in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineSegment {
    /// x-coordinate of the first endpoint.
    pub x1: i32,
    /// y-coordinate of the first endpoint.
    pub y1: i32,
    /// x-coordinate of the second endpoint.
    pub x2: i32,
    /// y-coordinate of the second endpoint.
    pub y2: i32,
}

impl LineSegment {
    /// Create a segment from its two endpoints.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<[i32; 4]> for LineSegment {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// A detected line segment together with the accumulator votes that triggered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineCandidate {
    /// The detected segment.
    pub segment: LineSegment,
    /// Votes of the accumulator bin at detection time.
    pub votes: u32,
}

/// Parameters of the probabilistic hough transform.
#[derive(Clone, Debug, PartialEq)]
pub struct HoughParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator in radians.
    pub theta: f32,
    /// Minimum number of votes for a line to be reported.
    pub threshold: u32,
    /// Minimum extent of a segment along x or y, in pixels.
    pub min_line_length: usize,
    /// Maximum number of consecutive missing pixels bridged inside a segment.
    pub max_line_gap: usize,
    /// Maximum number of segments to report.
    pub max_lines: usize,
    /// Seed of the generator that picks the visiting order of the points.
    pub seed: u64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 15.0,
            theta: PI / 360.0,
            threshold: 500,
            min_line_length: 0,
            max_line_gap: 0,
            max_lines: usize::MAX,
            seed: 0xFFFF_FFFF,
        }
    }
}

impl HoughParams {
    fn validate(&self) -> Result<(), ImageError> {
        if self.rho.is_nan() || self.rho <= 0.0 {
            return Err(ImageError::InvalidHoughParameter(
                "rho",
                format!("must be positive, got {}", self.rho),
            ));
        }
        if self.theta.is_nan() || self.theta <= 0.0 || self.theta > PI {
            return Err(ImageError::InvalidHoughParameter(
                "theta",
                format!("must be in (0, pi], got {}", self.theta),
            ));
        }
        if (PI / self.theta).round() > MAX_ANGLES as f32 {
            return Err(ImageError::InvalidHoughParameter(
                "theta",
                format!("resolution finer than pi / {MAX_ANGLES}, got {}", self.theta),
            ));
        }
        if self.threshold == 0 || self.threshold > i32::MAX as u32 {
            return Err(ImageError::InvalidHoughParameter(
                "threshold",
                format!("must be in [1, {}], got {}", i32::MAX, self.threshold),
            ));
        }
        Ok(())
    }
}

/// Vote accumulator over the (rho, theta) parameter space.
///
/// Bins are signed: removing the votes of a segment also removes pixels that have not
/// voted yet.
struct HoughAccumulator {
    data: Vec<i32>,
    num_rho: usize,
    rho_offset: i64,
    // (cos(theta) / rho, sin(theta) / rho) per angle
    trig: Vec<(f32, f32)>,
    // unit direction of the line for each angle
    dirs: Vec<(f32, f32)>,
}

impl HoughAccumulator {
    fn new(width: usize, height: usize, rho: f32, theta: f32) -> Self {
        let num_angle = ((PI / theta).round() as usize).max(1);
        let rho_offset = ((width + height) as f32 / rho).ceil() as i64;
        let num_rho = 2 * rho_offset as usize + 1;

        let irho = 1.0 / rho;
        let (trig, dirs): (Vec<_>, Vec<_>) = (0..num_angle)
            .map(|n| {
                let (sin_t, cos_t) = (n as f32 * theta).sin_cos();
                ((cos_t * irho, sin_t * irho), (-sin_t, cos_t))
            })
            .unzip();

        Self {
            data: vec![0; num_angle * num_rho],
            num_rho,
            rho_offset,
            trig,
            dirs,
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: i64, y: i64) -> usize {
        let (cos_t, sin_t) = self.trig[n];
        let r = (x as f32 * cos_t + y as f32 * sin_t).round() as i64 + self.rho_offset;
        n * self.num_rho + r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    /// Add the votes of a point and return the best (votes, angle) pair.
    fn vote(&mut self, x: i64, y: i64) -> (i32, usize) {
        let mut best = (i32::MIN, 0);
        for n in 0..self.trig.len() {
            let idx = self.bin(n, x, y);
            self.data[idx] += 1;
            if self.data[idx] > best.0 {
                best = (self.data[idx], n);
            }
        }
        best
    }

    fn unvote(&mut self, x: i64, y: i64) {
        for n in 0..self.trig.len() {
            let idx = self.bin(n, x, y);
            self.data[idx] -= 1;
        }
    }
}

/// Fixed point walker stepping one pixel per iteration along the major axis.
#[derive(Clone, Copy)]
struct LineWalker {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    x_major: bool,
}

impl LineWalker {
    fn new(x: i64, y: i64, dir: (f32, f32)) -> Self {
        let (a, b) = dir;
        let one = (1i64 << SHIFT) as f32;
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x0: x,
                y0: (y << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                x0: (x << SHIFT) + half,
                y0: y,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    /// Pixel positions visited in the given direction, `forward` or backwards.
    fn iter(&self, forward: bool) -> impl Iterator<Item = (i64, i64)> {
        let (dx, dy) = if forward {
            (self.dx, self.dy)
        } else {
            (-self.dx, -self.dy)
        };
        let x_major = self.x_major;
        let mut state = (self.x0, self.y0);
        std::iter::from_fn(move || {
            let (x, y) = state;
            state = (x + dx, y + dy);
            Some(if x_major { (x, y >> SHIFT) } else { (x >> SHIFT, y) })
        })
    }
}

/// Detect line segments with the progressive probabilistic hough transform.
///
/// Every non-zero pixel of `src` is a point. Points are visited in a random order drawn
/// from `params.seed`; each point votes in the accumulator and, once a bin reaches
/// `params.threshold`, the line through the point is followed in both directions over
/// non-visited points. Walks spanning at least `params.min_line_length` pixels along x
/// or y are reported and their votes are removed.
///
/// # Arguments
///
/// * `src` - The binary input image. Any non-zero value is a foreground pixel.
/// * `params` - The transform parameters.
///
/// # Returns
///
/// The detected segments sorted by votes, highest first. Segments with equal votes keep
/// their detection order.
///
/// # Errors
///
/// Returns an error if the parameters are out of range.
///
/// # Example
///
/// ```
/// use midline_image::{Image, ImageSize};
/// use midline_imgproc::hough::{hough_lines_probabilistic, HoughParams};
///
/// let size = ImageSize { width: 32, height: 32 };
/// let mut data = vec![0u8; 32 * 32];
/// (0..32).for_each(|x| data[16 * 32 + x] = 255);
/// let image = Image::<u8, 1>::new(size, data).unwrap();
///
/// let params = HoughParams { rho: 1.0, threshold: 20, min_line_length: 20, ..Default::default() };
/// let lines = hough_lines_probabilistic(&image, &params).unwrap();
///
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].segment.y1, 16);
/// assert_eq!(lines[0].segment.y2, 16);
/// ```
pub fn hough_lines_probabilistic(
    src: &Image<u8, 1>,
    params: &HoughParams,
) -> Result<Vec<LineCandidate>, ImageError> {
    params.validate()?;

    let width = src.width();
    let height = src.height();
    let mut lines = Vec::new();

    if src.is_empty() || params.max_lines == 0 {
        return Ok(lines);
    }

    let mut acc = HoughAccumulator::new(width, height, params.rho, params.theta);

    // collect the foreground points
    let mut mask = src.as_slice().iter().map(|&v| v != 0).collect::<Vec<_>>();
    let mut points = mask
        .iter()
        .enumerate()
        .filter(|(_, m)| **m)
        .map(|(i, _)| ((i % width) as i64, (i / width) as i64))
        .collect::<Vec<_>>();

    let in_bounds = |x: i64, y: i64| x >= 0 && y >= 0 && x < width as i64 && y < height as i64;
    let index = |x: i64, y: i64| y as usize * width + x as usize;

    let threshold = params.threshold as i32;
    let min_len = params.min_line_length as i64;
    let mut rng = StdRng::seed_from_u64(params.seed);

    while !points.is_empty() {
        let (x, y) = points.swap_remove(rng.random_range(0..points.len()));

        // the point was consumed by a previous segment
        if !mask[index(x, y)] {
            continue;
        }

        let (max_votes, max_n) = acc.vote(x, y);
        if max_votes < threshold {
            continue;
        }

        let walker = LineWalker::new(x, y, acc.dirs[max_n]);

        // find the extent of the line in both directions
        let mut line_end = [(x, y); 2];
        for (k, end) in line_end.iter_mut().enumerate() {
            let mut gap = 0;
            for (px, py) in walker.iter(k == 0) {
                if !in_bounds(px, py) {
                    break;
                }
                if mask[index(px, py)] {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap > params.max_line_gap {
                        break;
                    }
                }
            }
        }

        let good_line = (line_end[1].0 - line_end[0].0).abs() >= min_len
            || (line_end[1].1 - line_end[0].1).abs() >= min_len;

        // consume the walked pixels, removing their votes for accepted lines
        for (k, &end) in line_end.iter().enumerate() {
            for (px, py) in walker.iter(k == 0) {
                if !in_bounds(px, py) {
                    break;
                }
                let idx = index(px, py);
                if mask[idx] {
                    if good_line {
                        acc.unvote(px, py);
                    }
                    mask[idx] = false;
                }
                if (px, py) == end {
                    break;
                }
            }
        }

        if good_line {
            lines.push(LineCandidate {
                segment: LineSegment::new(
                    line_end[0].0 as i32,
                    line_end[0].1 as i32,
                    line_end[1].0 as i32,
                    line_end[1].1 as i32,
                ),
                votes: max_votes as u32,
            });
            if lines.len() >= params.max_lines {
                break;
            }
        }
    }

    lines.sort_by(|a, b| b.votes.cmp(&a.votes));

    Ok(lines)
}
