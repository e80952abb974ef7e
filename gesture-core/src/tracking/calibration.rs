//! Bias calibration
//!
//! The tracking engine subtracts a per-pixel bias learned from the empty
//! scene. A new bias is committed automatically once the raw frames have
//! stayed within `delta_max` of a reference frame for more than
//! `samples` consecutive frames, provided the raw range is below the
//! full-scale gate and nothing is being tracked.
//!
//! Until the first commit (or a forced calibration) the engine reports
//! inactive regardless of signal.

use libm::fabsf;

use crate::config::{GestureConfig, TrackingConfig};
use crate::constants::NUM_SENSOR_PIXELS;
use crate::frame::{PixelFrame, PixelState};
use crate::traits::Amplitude;

/// Static-scene detection limits, derived from the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticGate {
    /// Largest per-pixel drift still counted as static
    pub delta_max: f32,
    /// Raw peak-to-trough range must stay below this
    pub range_limit: i64,
    /// Static frames to exceed before committing
    pub samples: u32,
}

impl StaticGate {
    /// Derive the gate from the sample period, full scale and tracking block
    pub fn from_config(config: &GestureConfig) -> Self {
        let tracking: &TrackingConfig = &config.tracking;
        Self {
            delta_max: tracking.static_state_bias_delta_max as f32,
            range_limit: i64::from(tracking.calibration_range_limit(config.adc_full_scale)),
            samples: tracking.static_bias_samples(config.sample_period_ms),
        }
    }
}

/// Per-pixel bias estimator
pub struct BiasCalibrator {
    bias: PixelState,
    reference: PixelState,
    static_count: u32,
    calibrated: bool,
}

impl Default for BiasCalibrator {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_frame(state: &mut PixelState, frame: &PixelFrame) {
    for (dst, &src) in state.iter_mut().zip(frame.iter()) {
        *dst = src as f32;
    }
}

impl BiasCalibrator {
    /// Uncalibrated, zero bias
    pub const fn new() -> Self {
        Self {
            bias: [0.0; NUM_SENSOR_PIXELS],
            reference: [0.0; NUM_SENSOR_PIXELS],
            static_count: 0,
            calibrated: false,
        }
    }

    /// True once a bias has been committed
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Current per-pixel bias
    pub fn bias(&self) -> &PixelState {
        &self.bias
    }

    /// Consecutive static frames observed so far
    pub fn static_count(&self) -> u32 {
        self.static_count
    }

    /// Drop the bias and take `frame` as the new static reference
    pub fn clear(&mut self, frame: &PixelFrame) {
        self.bias = [0.0; NUM_SENSOR_PIXELS];
        copy_frame(&mut self.reference, frame);
        self.static_count = 0;
        self.calibrated = false;
    }

    /// Restart the static run without touching the bias
    pub fn restart(&mut self) {
        self.static_count = 0;
    }

    /// Commit `frame` as the bias immediately.
    ///
    /// The static run and its reference carry on untouched.
    pub fn force(&mut self, frame: &PixelFrame) {
        copy_frame(&mut self.bias, frame);
        self.calibrated = true;
    }

    /// Feed a raw frame to the static-scene detector.
    ///
    /// Returns true when this frame committed a new bias.
    pub fn observe(&mut self, frame: &PixelFrame, gate: &StaticGate, tracking: bool) -> bool {
        let max_delta = frame
            .iter()
            .zip(self.reference.iter())
            .map(|(&pixel, &reference)| fabsf(pixel as f32 - reference))
            .fold(0.0, f32::max);

        let is_static = max_delta < gate.delta_max && frame.range() < gate.range_limit && !tracking;
        if !is_static {
            self.static_count = 0;
            copy_frame(&mut self.reference, frame);
            return false;
        }

        self.static_count = self.static_count.saturating_add(1);
        if self.static_count <= gate.samples {
            return false;
        }

        self.bias = self.reference;
        self.static_count = 0;
        self.calibrated = true;
        true
    }

    /// Subtract the bias in place, truncating toward zero
    pub fn compensate(&self, frame: &mut PixelFrame) {
        for (pixel, &bias) in frame.iter_mut().zip(self.bias.iter()) {
            *pixel = (*pixel as f32 - bias) as i32;
        }
    }
}
