//! Engine-owned temporal filters
//!
//! Thin stateful wrappers around the primitives in [`crate::imaging`].
//! Each filter owns its history and is told explicitly when a reset is
//! due; a reset pass seeds the history from the incoming frame so the
//! first post-reset output is the identity (window) or zero (background).
//!
//! | Filter               | State                     | Reset pass output        |
//! |----------------------|---------------------------|--------------------------|
//! | [`WindowFilter`]     | last 3 frames             | frame unchanged          |
//! | [`BackgroundFilter`] | short + long averages     | `frame - floor(frame)`   |
//! | [`LowPassFilter`]    | one accumulator per pixel | frame unchanged          |

use heapless::HistoryBuffer;

use crate::constants::{NUM_SENSOR_PIXELS, WINDOW_TAPS};
use crate::frame::{PixelFrame, PixelState};
use crate::imaging;

fn seed_state(state: &mut PixelState, frame: &PixelFrame) {
    for (acc, &pixel) in state.iter_mut().zip(frame.iter()) {
        *acc = pixel as f32;
    }
}

/// 3-tap temporal noise filter.
///
/// Holds the last three frames and replaces the newest with
/// `alpha * middle + (1 - alpha) * (oldest + newest) / 2`. The output is
/// therefore delayed by one frame relative to the input.
pub struct WindowFilter {
    taps: HistoryBuffer<PixelFrame, WINDOW_TAPS>,
}

impl Default for WindowFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowFilter {
    /// Create an empty filter; the first frame applied seeds it
    pub const fn new() -> Self {
        Self {
            taps: HistoryBuffer::new(),
        }
    }

    /// Filter `frame` in place.
    ///
    /// On `reset` (or before three frames are held) every tap is set to the
    /// incoming frame and the frame is left untouched.
    pub fn apply(&mut self, frame: &mut PixelFrame, alpha: f32, reset: bool) {
        if reset || self.taps.len() < WINDOW_TAPS {
            self.taps.clear();
            for _ in 0..WINDOW_TAPS {
                self.taps.write(*frame);
            }
            return;
        }

        self.taps.write(*frame);
        let mut taps = self.taps.oldest_ordered();
        let (Some(oldest), Some(middle), Some(newest)) = (taps.next(), taps.next(), taps.next())
        else {
            return;
        };

        for (i, pixel) in frame.iter_mut().enumerate() {
            let outer = (oldest[i] as f32 + newest[i] as f32) / 2.0;
            *pixel = (alpha * middle[i] as f32 + (1.0 - alpha) * outer) as i32;
        }
    }
}

/// Dual exponential-average background canceller.
///
/// See [`imaging::subtract_background`] for the arithmetic.
pub struct BackgroundFilter {
    short_avg: PixelState,
    long_avg: PixelState,
}

impl Default for BackgroundFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundFilter {
    /// Create a filter with zeroed averages
    pub const fn new() -> Self {
        Self {
            short_avg: [0.0; NUM_SENSOR_PIXELS],
            long_avg: [0.0; NUM_SENSOR_PIXELS],
        }
    }

    /// Cancel the background in place. On `reset` both averages are first
    /// seeded with the incoming frame.
    pub fn apply(&mut self, frame: &mut PixelFrame, alpha_short: f32, alpha_long: f32, reset: bool) {
        if reset {
            seed_state(&mut self.short_avg, frame);
            seed_state(&mut self.long_avg, frame);
        }
        imaging::subtract_background(
            frame,
            &mut self.short_avg,
            &mut self.long_avg,
            alpha_short,
            alpha_long,
        );
    }
}

/// Exponential low-pass filter with per-pixel accumulators.
pub struct LowPassFilter {
    state: PixelState,
}

impl Default for LowPassFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LowPassFilter {
    /// Create a filter with zeroed accumulators
    pub const fn new() -> Self {
        Self {
            state: [0.0; NUM_SENSOR_PIXELS],
        }
    }

    /// Smooth `frame` in place. On `reset` the accumulators are first set
    /// to the incoming frame, making this pass the identity.
    pub fn apply(&mut self, frame: &mut PixelFrame, alpha: f32, reset: bool) {
        if reset {
            seed_state(&mut self.state, frame);
        }
        imaging::low_pass(frame, &mut self.state, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_reset_pass_is_identity() {
        let mut filter = WindowFilter::new();
        let mut frame = [321; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.5, true);
        assert_eq!(frame, [321; NUM_SENSOR_PIXELS]);
    }

    #[test]
    fn window_blends_three_taps() {
        let mut filter = WindowFilter::new();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.5, true);

        // taps: [0, 0, 400] -> 0.5 * 0 + 0.5 * 200
        let mut frame = [400; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.5, false);
        assert_eq!(frame[0], 100);

        // taps: [0, 400, 400] -> 0.5 * 400 + 0.5 * 200
        let mut frame = [400; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.5, false);
        assert_eq!(frame[0], 300);

        // taps: [400, 400, 400]
        let mut frame = [400; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.5, false);
        assert_eq!(frame[0], 400);
    }

    #[test]
    fn window_unseeded_acts_as_reset() {
        let mut filter = WindowFilter::new();
        let mut frame = [77; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.2, false);
        assert_eq!(frame, [77; NUM_SENSOR_PIXELS]);
    }

    #[test]
    fn background_reset_pass_with_pass_through_short_average_is_zero() {
        let mut filter = BackgroundFilter::new();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        for (i, pixel) in frame.iter_mut().enumerate() {
            *pixel = (i as i32) * 37 - 400;
        }
        filter.apply(&mut frame, 1.0, 0.0, true);
        assert_eq!(frame, [0; NUM_SENSOR_PIXELS]);
    }

    #[test]
    fn low_pass_reset_pass_is_identity() {
        let mut filter = LowPassFilter::new();
        let mut frame = [250; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.25, true);
        assert_eq!(frame, [250; NUM_SENSOR_PIXELS]);

        // 0.75 * 250 + 0.25 * 350
        let mut frame = [350; NUM_SENSOR_PIXELS];
        filter.apply(&mut frame, 0.25, false);
        assert_eq!(frame[0], 275);
    }
}
