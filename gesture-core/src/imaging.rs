//! Image primitives
//!
//! Stateless operations on fixed-size pixel buffers. Anything that has to
//! remember a previous frame receives its state explicitly from the caller;
//! see [`crate::filters`] for the engine-owned wrappers.
//!
//! ## Pipeline position
//!
//! ```text
//! frame ─→ low_pass / subtract_background ─→ peak
//!       ─→ interpolate ─→ clamp_below_peak_fraction ─→ centroid
//! ```
//!
//! ## Interpolation
//!
//! [`interpolate`] is a separable bilinear upsample: every source row is
//! stretched along x into its anchor row of the destination, then the rows
//! between anchors are filled along y. Sample `k` of `factor` between two
//! source pixels `a` and `b` is `a + (b - a) * k / factor`, truncated
//! toward zero. The last source column and row are copied, never
//! extrapolated, so the destination's edges equal the source's edges.

use libm::floorf;

use crate::constants::{INTERP_FACTOR, SENSOR_XRES, SENSOR_YRES};
use crate::frame::{InterpFrame, PixelFrame};

/// Largest value in the buffer.
pub fn peak(pixels: &[i32]) -> i32 {
    pixels.iter().copied().fold(i32::MIN, i32::max)
}

/// Smallest value in the buffer.
pub fn trough(pixels: &[i32]) -> i32 {
    pixels.iter().copied().fold(i32::MAX, i32::min)
}

/// Zero every pixel below `threshold`.
///
/// Returns how many pixels are at or above the threshold.
pub fn zero_below_threshold(pixels: &mut [i32], threshold: i32) -> usize {
    let mut remaining = pixels.len();
    for pixel in pixels.iter_mut() {
        if *pixel < threshold {
            *pixel = 0;
            remaining -= 1;
        }
    }
    remaining
}

/// Two-stage clutter suppression used before centroiding.
///
/// First zeroes everything below `peak / factor`, then everything below
/// the absolute `floor`. `peak` must be the peak measured before either
/// pass. Returns the count surviving both passes.
pub fn clamp_below_peak_fraction(pixels: &mut [i32], peak: i32, factor: f32, floor: i32) -> usize {
    let relative = (peak as f32 / factor) as i32;
    zero_below_threshold(pixels, relative);
    zero_below_threshold(pixels, floor)
}

/// Exponential low-pass filter, in place.
///
/// `state = (1 - alpha) * state + alpha * raw`, then the pixel becomes the
/// truncated state. With `alpha == 1.0` the pixels pass through unchanged.
pub fn low_pass(pixels: &mut [i32], state: &mut [f32], alpha: f32) {
    for (pixel, acc) in pixels.iter_mut().zip(state.iter_mut()) {
        *acc = (1.0 - alpha) * *acc + alpha * *pixel as f32;
        *pixel = *acc as i32;
    }
}

/// High-pass background cancellation, in place.
///
/// Updates a fast (`short_avg`) and a slow (`long_avg`) exponential average
/// from the raw pixels, then outputs `short_avg - floor(long_avg)`. Slow
/// ambient drift is absorbed by the long average while fast transients
/// survive. `alpha_long` should be smaller than `alpha_short`.
pub fn subtract_background(
    pixels: &mut [i32],
    short_avg: &mut [f32],
    long_avg: &mut [f32],
    alpha_short: f32,
    alpha_long: f32,
) {
    for ((pixel, short), long) in pixels
        .iter_mut()
        .zip(short_avg.iter_mut())
        .zip(long_avg.iter_mut())
    {
        let raw = *pixel as f32;
        *long = (1.0 - alpha_long) * *long + alpha_long * raw;
        *short = (1.0 - alpha_short) * *short + alpha_short * raw;
        *pixel = (*short - floorf(*long)) as i32;
    }
}

/// Intensity-weighted centre of a row-major grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    /// Column coordinate, in grid pixels
    pub x: f32,
    /// Row coordinate, in grid pixels
    pub y: f32,
    /// Sum of all pixel values, clamped to 1 when it would be zero
    pub mass: i64,
}

/// Weighted centroid over a `width`×`height` row-major grid.
///
/// A grid with zero total mass reports `(0, 0)`; the mass is clamped to 1
/// instead of dividing by zero.
pub fn centroid(pixels: &[i32], width: usize, height: usize) -> Centroid {
    debug_assert_eq!(pixels.len(), width * height);

    let mut x_moment: i64 = 0;
    let mut y_moment: i64 = 0;
    let mut mass: i64 = 0;
    for (i, &value) in pixels.iter().enumerate() {
        let value = i64::from(value);
        x_moment += (i % width) as i64 * value;
        y_moment += (i / width) as i64 * value;
        mass += value;
    }
    if mass == 0 {
        mass = 1;
    }

    Centroid {
        x: x_moment as f32 / mass as f32,
        y: y_moment as f32 / mass as f32,
        mass,
    }
}

#[inline]
fn lerp(a: i32, b: i32, frac: f32) -> i32 {
    (a as f32 + (b as f32 - a as f32) * frac) as i32
}

/// Stretch one row by `factor`, replicating the last source pixel.
fn stretch_row(src: &[i32], factor: usize, dst: &mut [i32]) {
    let last = src.len() - 1;
    for (j, out) in dst.iter_mut().enumerate() {
        let x = j / factor;
        *out = if x == last {
            src[last]
        } else {
            lerp(src[x], src[x + 1], (j % factor) as f32 / factor as f32)
        };
    }
}

/// Separable bilinear upsample of a `width`×`height` grid by `factor`.
///
/// `dst` must hold `((width - 1) * factor + 1) * ((height - 1) * factor + 1)`
/// pixels. With `factor == 1` this is a plain copy.
pub fn interpolate(src: &[i32], width: usize, height: usize, factor: usize, dst: &mut [i32]) {
    let out_width = (width - 1) * factor + 1;
    let out_height = (height - 1) * factor + 1;
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), out_width * out_height);

    // x pass: each source row lands on destination row `row * factor`
    for row in 0..height {
        let anchor = row * factor * out_width;
        stretch_row(
            &src[row * width..(row + 1) * width],
            factor,
            &mut dst[anchor..anchor + out_width],
        );
    }

    // y pass: fill the rows between anchors
    for i in 0..out_height {
        let step = i % factor;
        if step == 0 {
            continue;
        }
        let upper = (i / factor) * factor * out_width;
        let lower = upper + factor * out_width;
        let frac = step as f32 / factor as f32;
        for j in 0..out_width {
            dst[i * out_width + j] = lerp(dst[upper + j], dst[lower + j], frac);
        }
    }
}

/// Upsample a native frame onto the engine's interpolation grid.
pub fn upsample(frame: &PixelFrame, out: &mut InterpFrame) {
    interpolate(frame, SENSOR_XRES, SENSOR_YRES, INTERP_FACTOR, out);
}
