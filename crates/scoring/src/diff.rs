//! Perceptual pixel difference
//!
//! Colors are compared in YIQ space after blending any translucency onto
//! white, weighting luma over chroma. A pixel differs when its squared YIQ
//! distance exceeds `MAX_YIQ_DELTA * threshold^2`, so a threshold of 0
//! flags any change and 1 tolerates everything short of black on white.
//!
//! Optionally, differing pixels that look like anti-aliasing in either
//! image (a pixel sitting between a darker and a brighter neighbor, each
//! of which belongs to a flat region in both images) are not counted.

use flagdraw_config::ScoringConfig;
use image::{GrayImage, Luma, RgbaImage};

use crate::DimensionError;

/// How two images are compared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffOptions {
    /// Perceptual threshold in 0..=1
    pub threshold: f64,
    /// Skip pixels detected as anti-aliased edges
    pub detect_antialiasing: bool,
}

impl DiffOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            detect_antialiasing: true,
        }
    }
}

impl From<&ScoringConfig> for DiffOptions {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            threshold: config.threshold,
            detect_antialiasing: config.detect_antialiasing,
        }
    }
}

/// Squared YIQ distance between pure black and pure white, rounded up
pub const MAX_YIQ_DELTA: f64 = 35215.0;

const MASK_DIFF: Luma<u8> = Luma([255]);
const MASK_SAME: Luma<u8> = Luma([0]);

/// Largest delta still considered a match for `threshold` in 0..=1
pub fn max_delta(threshold: f64) -> f64 {
    MAX_YIQ_DELTA * threshold * threshold
}

fn blend(channel: f64, alpha: f64) -> f64 {
    255.0 + (channel - 255.0) * alpha
}

fn rgb2y(r: f64, g: f64, b: f64) -> f64 {
    r * 0.298_895_31 + g * 0.586_622_47 + b * 0.114_482_23
}

fn rgb2i(r: f64, g: f64, b: f64) -> f64 {
    r * 0.595_977_99 - g * 0.274_176_10 - b * 0.321_801_89
}

fn rgb2q(r: f64, g: f64, b: f64) -> f64 {
    r * 0.211_470_17 - g * 0.522_617_11 + b * 0.311_146_94
}

fn on_white(pixel: [u8; 4]) -> (f64, f64, f64) {
    let [r, g, b, a] = pixel.map(f64::from);
    if a < 255.0 {
        let alpha = a / 255.0;
        (blend(r, alpha), blend(g, alpha), blend(b, alpha))
    } else {
        (r, g, b)
    }
}

/// Signed brightness difference between two RGBA colors
fn luma_delta(a: [u8; 4], b: [u8; 4]) -> f64 {
    let (r1, g1, b1) = on_white(a);
    let (r2, g2, b2) = on_white(b);
    rgb2y(r1, g1, b1) - rgb2y(r2, g2, b2)
}

/// Squared perceptual distance between two RGBA colors
pub fn color_delta(a: [u8; 4], b: [u8; 4]) -> f64 {
    if a == b {
        return 0.0;
    }
    let (r1, g1, b1) = on_white(a);
    let (r2, g2, b2) = on_white(b);

    let y = rgb2y(r1, g1, b1) - rgb2y(r2, g2, b2);
    let i = rgb2i(r1, g1, b1) - rgb2i(r2, g2, b2);
    let q = rgb2q(r1, g1, b1) - rgb2q(r2, g2, b2);

    0.5053 * y * y + 0.299 * i * i + 0.1957 * q * q
}

/// Per-pixel outcome of a comparison
#[derive(Debug, Clone, PartialEq)]
pub struct DiffMask {
    /// 255 where the pixels differ, 0 where they match
    mask: GrayImage,
    differing: u64,
}

impl DiffMask {
    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    /// Number of differing pixels
    pub fn differing(&self) -> u64 {
        self.differing
    }

    /// Number of pixels compared
    pub fn total(&self) -> u64 {
        u64::from(self.mask.width()) * u64::from(self.mask.height())
    }

    pub fn is_different(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.mask.get_pixel(x, y) == &MASK_DIFF
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.mask
    }

    pub fn into_image(self) -> GrayImage {
        self.mask
    }
}

/// The 3x3 window around `(x, y)`, clipped to the image, and whether the
/// pixel sits on the image border
fn window(image: &RgbaImage, x: u32, y: u32) -> (u32, u32, u32, u32, bool) {
    let x0 = x.saturating_sub(1);
    let y0 = y.saturating_sub(1);
    let x1 = (x + 1).min(image.width() - 1);
    let y1 = (y + 1).min(image.height() - 1);
    let on_border = x == x0 || x == x1 || y == y0 || y == y1;
    (x0, y0, x1, y1, on_border)
}

/// Whether at least three neighbors of `(x, y)` share its exact color
fn has_many_siblings(image: &RgbaImage, x: u32, y: u32) -> bool {
    let (x0, y0, x1, y1, on_border) = window(image, x, y);
    let center = image.get_pixel(x, y);
    let mut same = u32::from(on_border);

    for nx in x0..=x1 {
        for ny in y0..=y1 {
            if (nx, ny) == (x, y) {
                continue;
            }
            if image.get_pixel(nx, ny) == center {
                same += 1;
            }
            if same > 2 {
                return true;
            }
        }
    }
    false
}

/// Whether `(x, y)` in `image` looks like an anti-aliased edge pixel
///
/// The pixel must have at most two identical neighbors, and its darkest or
/// brightest neighbor must lie in a flat area of both `image` and `other`.
fn antialiased(image: &RgbaImage, x: u32, y: u32, other: &RgbaImage) -> bool {
    let (x0, y0, x1, y1, on_border) = window(image, x, y);
    let center = image.get_pixel(x, y).0;
    let mut zeroes = u32::from(on_border);
    let (mut min, mut max) = (0.0, 0.0);
    let (mut darkest, mut brightest) = ((x, y), (x, y));

    for nx in x0..=x1 {
        for ny in y0..=y1 {
            if (nx, ny) == (x, y) {
                continue;
            }
            let delta = luma_delta(center, image.get_pixel(nx, ny).0);
            if delta == 0.0 {
                zeroes += 1;
                if zeroes > 2 {
                    return false;
                }
            } else if delta < min {
                min = delta;
                brightest = (nx, ny);
            } else if delta > max {
                max = delta;
                darkest = (nx, ny);
            }
        }
    }

    if min == 0.0 || max == 0.0 {
        return false;
    }

    let flat_in_both =
        |(px, py): (u32, u32)| has_many_siblings(image, px, py) && has_many_siblings(other, px, py);
    flat_in_both(darkest) || flat_in_both(brightest)
}

/// Compare two images of equal size pixel by pixel
pub fn diff_images(
    drawn: &RgbaImage,
    reference: &RgbaImage,
    options: DiffOptions,
) -> Result<DiffMask, DimensionError> {
    if drawn.dimensions() != reference.dimensions() {
        return Err(DimensionError::Mismatch {
            expected: reference.dimensions(),
            actual: drawn.dimensions(),
        });
    }

    let limit = max_delta(options.threshold);
    let (width, height) = reference.dimensions();
    let mut mask = GrayImage::from_pixel(width, height, MASK_SAME);
    let mut differing = 0u64;

    for ((x, y, ours), theirs) in drawn.enumerate_pixels().zip(reference.pixels()) {
        if color_delta(ours.0, theirs.0) <= limit {
            continue;
        }
        if options.detect_antialiasing
            && (antialiased(drawn, x, y, reference) || antialiased(reference, x, y, drawn))
        {
            continue;
        }
        mask.put_pixel(x, y, MASK_DIFF);
        differing += 1;
    }

    Ok(DiffMask { mask, differing })
}
