//! Dynamic gesture engine
//!
//! Presence detection for moving objects. Each frame is background
//! cancelled, upsampled and clutter-clamped; an object is reported while
//! the filtered peak stays at or above the end detection threshold.
//!
//! ```text
//! frame ─→ BackgroundFilter ─→ peak ─→ upsample ─→ clamp ─→ centroid
//!                                 └─→ peak >= end threshold ?
//! ```
//!
//! Only the end threshold gates activity. The start threshold belongs to
//! the same configuration block but is not consulted here, so there is no
//! hysteresis on this path. The reported y coordinate is scaled by
//! [`DY_PIXEL_SCALE`] to square up the sensor's pixel pitch.

use crate::config::GestureConfig;
use crate::constants::{DY_PIXEL_SCALE, INTERP_FACTOR, INTERP_XRES, INTERP_YRES, NUM_INTERP_PIXELS};
use crate::filters::BackgroundFilter;
use crate::frame::{InterpFrame, PixelFrame};
use crate::imaging;
use crate::result::{DynamicGestureResult, GestureState};
use crate::traits::{Amplitude, FrameEngine};

/// Background-cancelling presence detector
pub struct DynamicGestureEngine {
    background: BackgroundFilter,
    interp: InterpFrame,
    state: GestureState,
    n_sample: u32,
    reset_pending: bool,
}

impl Default for DynamicGestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicGestureEngine {
    /// Create an engine; the first processed frame seeds the background
    pub const fn new() -> Self {
        Self {
            background: BackgroundFilter::new(),
            interp: [0; NUM_INTERP_PIXELS],
            state: GestureState::Inactive,
            n_sample: 0,
            reset_pending: true,
        }
    }

    /// Interpolated, clamped grid from the most recent frame
    pub fn interpolated(&self) -> &InterpFrame {
        &self.interp
    }

    /// Run one frame through the detector
    pub fn run(&mut self, frame: &mut PixelFrame, config: &GestureConfig) -> DynamicGestureResult {
        let reset = core::mem::take(&mut self.reset_pending);
        if reset {
            self.state = GestureState::Inactive;
            self.n_sample = 0;
        }

        self.background.apply(
            frame,
            config.low_pass_filter_alpha,
            config.background_filter_alpha,
            reset,
        );

        let peak = frame.peak();
        imaging::upsample(frame, &mut self.interp);
        imaging::clamp_below_peak_fraction(
            &mut self.interp,
            peak,
            config.zero_clamp_threshold_factor,
            config.zero_clamp_threshold,
        );

        if peak < config.end_detection_threshold {
            if self.state.is_active() {
                log_debug!("dynamic: released after {} frames, peak {}", self.n_sample, peak);
            }
            self.state = GestureState::Inactive;
            self.n_sample = 0;
            return DynamicGestureResult::inactive(peak);
        }

        if !self.state.is_active() {
            log_debug!("dynamic: detected, peak {}", peak);
        }
        self.state = GestureState::Active;
        self.n_sample = self.n_sample.saturating_add(1);

        let c = imaging::centroid(&self.interp, INTERP_XRES, INTERP_YRES);
        let x = c.x / INTERP_FACTOR as f32;
        let y = c.y / INTERP_FACTOR as f32 * DY_PIXEL_SCALE;
        DynamicGestureResult::active(peak, self.n_sample, x, y)
    }
}

impl FrameEngine for DynamicGestureEngine {
    fn process(&mut self, frame: &mut PixelFrame, config: &GestureConfig) -> DynamicGestureResult {
        self.run(frame, config)
    }

    fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    fn state(&self) -> GestureState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NUM_SENSOR_PIXELS, POSITION_SENTINEL, SENSOR_XRES};

    fn spot(col: usize, row: usize, value: i32) -> PixelFrame {
        let mut frame = [0; NUM_SENSOR_PIXELS];
        frame[row * SENSOR_XRES + col] = value;
        frame
    }

    // Background average frozen at zero, short average passes through
    fn pass_through() -> GestureConfig {
        GestureConfig::default()
            .with_window_filter(false, 0.5)
            .with_background_alphas(1.0, 0.0)
    }

    #[test]
    fn reports_spot_position_with_pitch_correction() {
        let cfg = pass_through();
        let mut engine = DynamicGestureEngine::new();

        let mut frame = [0; NUM_SENSOR_PIXELS];
        let first = engine.run(&mut frame, &cfg);
        assert_eq!(first.state, GestureState::Inactive);

        let mut frame = spot(3, 2, 1000);
        let result = engine.run(&mut frame, &cfg);
        assert_eq!(result.state, GestureState::Active);
        assert_eq!(result.peak, 1000);
        assert_eq!(result.n_sample, 1);
        assert!((result.x - 3.0).abs() < 1e-4);
        assert!((result.y - 2.0 * DY_PIXEL_SCALE).abs() < 1e-4);
    }

    #[test]
    fn peak_below_end_threshold_is_inactive() {
        let cfg = pass_through();
        let mut engine = DynamicGestureEngine::new();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);

        let mut frame = spot(5, 3, cfg.end_detection_threshold - 1);
        let result = engine.run(&mut frame, &cfg);
        assert_eq!(result.state, GestureState::Inactive);
        assert_eq!((result.x, result.y), (POSITION_SENTINEL, POSITION_SENTINEL));
        assert_eq!(result.n_sample, 0);
    }

    #[test]
    fn end_threshold_is_inclusive() {
        let cfg = pass_through();
        let mut engine = DynamicGestureEngine::new();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);

        let mut frame = spot(5, 3, cfg.end_detection_threshold);
        assert_eq!(engine.run(&mut frame, &cfg).state, GestureState::Active);
    }

    #[test]
    fn start_threshold_is_ignored() {
        let cfg = pass_through().with_detection_thresholds(5000, 50);
        let mut engine = DynamicGestureEngine::new();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);

        let mut frame = spot(4, 1, 100);
        assert_eq!(engine.run(&mut frame, &cfg).state, GestureState::Active);
    }

    #[test]
    fn counts_consecutive_active_frames() {
        let cfg = pass_through();
        let mut engine = DynamicGestureEngine::new();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);

        for expected in 1..=4 {
            let mut frame = spot(6, 2, 800);
            assert_eq!(engine.run(&mut frame, &cfg).n_sample, expected);
        }
        let mut frame = [0; NUM_SENSOR_PIXELS];
        assert_eq!(engine.run(&mut frame, &cfg).n_sample, 0);
        let mut frame = spot(6, 2, 800);
        assert_eq!(engine.run(&mut frame, &cfg).n_sample, 1);
    }

    #[test]
    fn reset_seeds_background_from_frame() {
        let cfg = GestureConfig::default().with_background_alphas(1.0, 0.5);
        let mut engine = DynamicGestureEngine::new();

        // A bright static scene on the reset pass cancels to zero
        let mut frame = [900; NUM_SENSOR_PIXELS];
        let result = engine.run(&mut frame, &cfg);
        assert_eq!(result.peak, 0);
        assert_eq!(engine.state(), GestureState::Inactive);

        engine.request_reset();
        let mut frame = [1500; NUM_SENSOR_PIXELS];
        assert_eq!(engine.run(&mut frame, &cfg).peak, 0);
    }
}
