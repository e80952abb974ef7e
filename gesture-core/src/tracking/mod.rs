//! Tracking engine
//!
//! Persistent position tracking for slow or stationary objects. Unlike the
//! dynamic engine there is no background high-pass; instead a bias learned
//! from the empty scene is subtracted and a hysteresis band decides when
//! tracking starts and stops.
//!
//! ## Per-frame pipeline
//!
//! ```text
//! raw ─→ [calibrate] ─→ - bias ─→ low-pass ─→ zone gain ─→ peak
//!                                                          │
//!            Inactive ──(peak > start)──→ Tracking ←──(peak > end)
//!                ↑                           │
//!                └────────(otherwise)────────┘
//!
//! Tracking: upsample ─→ clamp ─→ centroid ─→ track window ─→ (x, y)
//! ```
//!
//! Nothing is reported until a bias has been committed, either by the
//! static-scene detector or by [`TrackingEngine::request_force_calibration`].
//!
//! ## Track window
//!
//! The centroid is mapped so a `track_width`×`track_height` region centred
//! on the array spans the full output range `[0, 9) × [0, 5)`:
//!
//! ```text
//! x = (cx - (10 - track_width) / 2) * 9 / (track_width - 1)
//! ```
//!
//! and likewise for y. Results at or beyond the far edge are pulled just
//! inside it; results below zero are clamped to zero.

pub mod calibration;
pub mod gain;

use crate::config::GestureConfig;
use crate::constants::{
    INTERP_FACTOR, INTERP_XRES, INTERP_YRES, NUM_INTERP_PIXELS, SENSOR_XRES, SENSOR_YRES,
    TRACK_EDGE_EPSILON,
};
use crate::filters::LowPassFilter;
use crate::frame::{InterpFrame, PixelFrame, PixelState};
use crate::imaging;
use crate::result::{GestureState, TrackingResult};
use crate::traits::{Amplitude, FrameEngine};

use self::calibration::{BiasCalibrator, StaticGate};
use self::gain::ZoneGains;

/// Map a centroid coordinate onto the track window along one axis
pub fn map_to_track_window(center: f32, track: f32, resolution: usize) -> f32 {
    let res = resolution as f32;
    let edge = res - 1.0;
    let mapped = (center - (res - track) / 2.0) * edge / (track - 1.0);
    if mapped >= edge {
        edge - TRACK_EDGE_EPSILON
    } else if mapped < 0.0 {
        0.0
    } else {
        mapped
    }
}

/// Bias-compensated hysteresis tracker
pub struct TrackingEngine {
    calibrator: BiasCalibrator,
    low_pass: LowPassFilter,
    interp: InterpFrame,
    state: GestureState,
    n_sample: u32,
    reset_pending: bool,
    clear_calibration_pending: bool,
    force_calibration_pending: bool,
    low_pass_seed_pending: bool,
}

impl Default for TrackingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingEngine {
    /// Create an uncalibrated engine; the first frame becomes the static
    /// reference
    pub const fn new() -> Self {
        Self {
            calibrator: BiasCalibrator::new(),
            low_pass: LowPassFilter::new(),
            interp: [0; NUM_INTERP_PIXELS],
            state: GestureState::Inactive,
            n_sample: 0,
            reset_pending: true,
            clear_calibration_pending: true,
            force_calibration_pending: false,
            low_pass_seed_pending: true,
        }
    }

    /// Capture the next frame as the bias, even with auto-calibration off
    pub fn request_force_calibration(&mut self) {
        self.force_calibration_pending = true;
    }

    /// Drop the bias on the next frame and start a fresh static run
    pub fn request_clear_calibration(&mut self) {
        self.clear_calibration_pending = true;
    }

    /// True once a bias has been committed
    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_calibrated()
    }

    /// Current per-pixel bias
    pub fn bias(&self) -> &PixelState {
        self.calibrator.bias()
    }

    /// Interpolated, clamped grid from the most recent tracked frame
    pub fn interpolated(&self) -> &InterpFrame {
        &self.interp
    }

    /// Run one frame through the tracker
    pub fn run(&mut self, frame: &mut PixelFrame, config: &GestureConfig) -> TrackingResult {
        let tracking = &config.tracking;

        if core::mem::take(&mut self.reset_pending) {
            self.state = GestureState::Inactive;
            self.n_sample = 0;
            self.calibrator.restart();
            self.low_pass_seed_pending = true;
        }

        if core::mem::take(&mut self.clear_calibration_pending) {
            self.calibrator.clear(frame);
            log_debug!("tracking: calibration cleared");
        }

        if tracking.enable_auto_bias_calibration {
            let gate = StaticGate::from_config(config);
            if self.calibrator.observe(frame, &gate, self.state.is_active()) {
                log_info!(
                    "tracking: bias calibrated after {} static frames",
                    gate.samples.saturating_add(1)
                );
            }
        }

        if core::mem::take(&mut self.force_calibration_pending) {
            self.calibrator.force(frame);
            log_info!("tracking: bias calibration forced");
        }

        self.calibrator.compensate(frame);

        if self.calibrator.is_calibrated() {
            let seed = core::mem::take(&mut self.low_pass_seed_pending);
            self.low_pass.apply(frame, tracking.low_pass_filter_alpha, seed);
        }

        ZoneGains::from_config(tracking).apply(frame);

        let peak = frame.peak();
        let next = match self.state {
            _ if !self.calibrator.is_calibrated() => GestureState::Inactive,
            GestureState::Inactive if peak > tracking.start_detection_threshold => {
                GestureState::Active
            }
            GestureState::Active if peak > tracking.end_detection_threshold => GestureState::Active,
            _ => GestureState::Inactive,
        };

        if next != self.state {
            if next.is_active() {
                log_debug!("tracking: started, peak {}", peak);
            } else {
                log_debug!("tracking: stopped after {} frames, peak {}", self.n_sample, peak);
            }
        }
        self.state = next;

        if !next.is_active() {
            self.n_sample = 0;
            return TrackingResult::inactive(peak);
        }
        self.n_sample = self.n_sample.saturating_add(1);

        imaging::upsample(frame, &mut self.interp);
        imaging::clamp_below_peak_fraction(
            &mut self.interp,
            peak,
            tracking.zero_clamp_threshold_factor,
            tracking.zero_clamp_threshold,
        );
        let c = imaging::centroid(&self.interp, INTERP_XRES, INTERP_YRES);
        let cx = c.x / INTERP_FACTOR as f32;
        let cy = c.y / INTERP_FACTOR as f32;

        TrackingResult::active(
            peak,
            self.n_sample,
            map_to_track_window(cx, tracking.track_width, SENSOR_XRES),
            map_to_track_window(cy, tracking.track_height, SENSOR_YRES),
        )
    }
}

impl FrameEngine for TrackingEngine {
    fn process(&mut self, frame: &mut PixelFrame, config: &GestureConfig) -> TrackingResult {
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
    use crate::config::TrackingConfig;
    use crate::constants::{NUM_SENSOR_PIXELS, POSITION_SENTINEL};

    fn spot(col: usize, row: usize, value: i32) -> PixelFrame {
        let mut frame = [0; NUM_SENSOR_PIXELS];
        frame[row * SENSOR_XRES + col] = value;
        frame
    }

    fn manual_config() -> GestureConfig {
        GestureConfig::default().with_tracking(
            TrackingConfig::default()
                .with_auto_calibration(false)
                .with_gain_correction(false),
        )
    }

    fn forced(config: &GestureConfig) -> TrackingEngine {
        let mut engine = TrackingEngine::new();
        engine.request_force_calibration();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        let result = engine.run(&mut frame, config);
        assert_eq!(result.state, GestureState::Inactive);
        assert!(engine.is_calibrated());
        engine
    }

    #[test]
    fn track_window_mapping() {
        // Centre of a 6-wide window on a 10-wide array
        assert!((map_to_track_window(4.5, 6.0, 10) - 4.5).abs() < 1e-5);
        assert!((map_to_track_window(3.0, 6.0, 10) - 1.8).abs() < 1e-5);
        assert_eq!(map_to_track_window(1.0, 6.0, 10), 0.0);
        assert_eq!(map_to_track_window(9.0, 6.0, 10), 9.0 - TRACK_EDGE_EPSILON);
        // Full-width window is the identity
        assert!((map_to_track_window(2.25, 10.0, 10) - 2.25).abs() < 1e-5);
    }

    #[test]
    fn uncalibrated_never_tracks() {
        let cfg = manual_config();
        let mut engine = TrackingEngine::new();
        for _ in 0..5 {
            let mut frame = spot(4, 2, 5000);
            let result = engine.run(&mut frame, &cfg);
            assert_eq!(result.state, GestureState::Inactive);
            assert_eq!(result.x, POSITION_SENTINEL);
        }
        assert!(!engine.is_calibrated());
    }

    #[test]
    fn hysteresis_band() {
        let cfg = manual_config();
        let mut engine = forced(&cfg);

        let mut frame = spot(3, 2, 450);
        let first = engine.run(&mut frame, &cfg);
        assert_eq!(first.state, GestureState::Active);
        assert_eq!(first.n_sample, 1);
        assert!((first.x - 1.8).abs() < 1e-4);
        assert!((first.y - 1.25).abs() < 1e-4);

        let mut frame = spot(3, 2, 350);
        let held = engine.run(&mut frame, &cfg);
        assert_eq!(held.state, GestureState::Active);
        assert_eq!(held.n_sample, 2);

        let mut frame = spot(3, 2, 250);
        let released = engine.run(&mut frame, &cfg);
        assert_eq!(released.state, GestureState::Inactive);
        assert_eq!((released.x, released.y), (POSITION_SENTINEL, POSITION_SENTINEL));
    }

    #[test]
    fn below_start_does_not_enter() {
        let cfg = manual_config();
        let mut engine = forced(&cfg);
        let mut frame = spot(5, 3, 350);
        assert_eq!(engine.run(&mut frame, &cfg).state, GestureState::Inactive);
    }

    #[test]
    fn thresholds_are_strict() {
        let cfg = manual_config();
        let mut engine = forced(&cfg);
        let mut frame = spot(5, 3, cfg.tracking.start_detection_threshold);
        assert_eq!(engine.run(&mut frame, &cfg).state, GestureState::Inactive);

        let mut frame = spot(5, 3, 401);
        assert_eq!(engine.run(&mut frame, &cfg).state, GestureState::Active);
        let mut frame = spot(5, 3, cfg.tracking.end_detection_threshold);
        assert_eq!(engine.run(&mut frame, &cfg).state, GestureState::Inactive);
    }

    #[test]
    fn static_scene_calibrates_automatically() {
        let mut cfg = GestureConfig::default();
        cfg.sample_period_ms = 20.0;
        cfg.tracking.static_state_bias_ms = 100;
        let samples = cfg.tracking.static_bias_samples(cfg.sample_period_ms);
        assert_eq!(samples, 5);

        let scene = [300; NUM_SENSOR_PIXELS];
        let mut engine = TrackingEngine::new();
        for _ in 0..samples {
            let mut frame = scene;
            engine.run(&mut frame, &cfg);
            assert!(!engine.is_calibrated());
        }

        let mut frame = scene;
        let result = engine.run(&mut frame, &cfg);
        assert!(engine.is_calibrated());
        assert_eq!(engine.bias()[0], 300.0);
        assert_eq!(result.peak, 0);

        let mut frame = scene;
        let after = engine.run(&mut frame, &cfg);
        assert_eq!(after.peak, 0);
        assert_eq!(after.state, GestureState::Inactive);
    }

    #[test]
    fn reset_keeps_bias_clear_drops_it() {
        let cfg = manual_config();
        let mut engine = forced(&cfg);

        engine.request_reset();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);
        assert!(engine.is_calibrated());

        engine.request_clear_calibration();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);
        assert!(!engine.is_calibrated());
    }

    #[test]
    fn low_pass_seeds_once_per_reset() {
        let mut cfg = manual_config();
        cfg.tracking.low_pass_filter_alpha = 0.5;
        let mut engine = forced(&cfg);
        let at = 2 * SENSOR_XRES + 4;

        let mut frame = spot(4, 2, 400);
        engine.run(&mut frame, &cfg);
        assert_eq!(frame[at], 200);
        let mut frame = spot(4, 2, 400);
        engine.run(&mut frame, &cfg);
        assert_eq!(frame[at], 300);

        // First calibrated frame after a reset passes through unchanged
        engine.request_reset();
        let mut frame = spot(4, 2, 600);
        let result = engine.run(&mut frame, &cfg);
        assert_eq!(frame[at], 600);
        assert_eq!(result.state, GestureState::Active);

        let mut frame = spot(4, 2, 0);
        engine.run(&mut frame, &cfg);
        assert_eq!(frame[at], 300);

        // Clearing the calibration keeps the filter history
        engine.request_clear_calibration();
        engine.request_force_calibration();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);
        assert!(engine.is_calibrated());
        assert_eq!(frame[at], 150);
    }

    #[test]
    fn bias_is_subtracted_before_thresholding() {
        let cfg = manual_config();
        let mut engine = TrackingEngine::new();
        engine.request_force_calibration();
        let mut frame = [200; NUM_SENSOR_PIXELS];
        engine.run(&mut frame, &cfg);

        // 200 + 450 raw is 450 after compensation
        let mut frame = [200; NUM_SENSOR_PIXELS];
        frame[2 * SENSOR_XRES + 3] = 650;
        let result = engine.run(&mut frame, &cfg);
        assert_eq!(result.peak, 450);
        assert_eq!(result.state, GestureState::Active);
        assert_eq!(frame[0], 0);
    }
}
