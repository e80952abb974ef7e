//! Gesture engine orchestrator
//!
//! [`GestureEngine`] owns the configuration, the shared window filter and
//! both engines. The host calls [`GestureEngine::run`] once per sample
//! period with the decoded frame and polls the returned [`GestureResult`].
//!
//! ```text
//! registers ─→ decode (+flip) ─→ window filter ─┬─→ DynamicGestureEngine
//!                                              └─→ TrackingEngine
//! ```
//!
//! Control requests ([`reset`](GestureEngine::reset),
//! [`force_calibration`](GestureEngine::force_calibration),
//! [`clear_calibration`](GestureEngine::clear_calibration)) are latched
//! and take effect on the next frame, so they are safe to issue from a
//! command handler between frames.
//!
//! ```rust
//! use gesture_core::{GestureConfig, GestureEngine, NUM_SENSOR_PIXELS};
//!
//! let mut engine = GestureEngine::new(Some(GestureConfig::default()));
//! let mut frame = [0i32; NUM_SENSOR_PIXELS];
//! let result = engine.run(&mut frame);
//! assert!(!result.is_active());
//! ```

use crate::config::{EngineMode, GestureConfig};
use crate::dynamic::DynamicGestureEngine;
use crate::errors::ConfigResult;
use crate::filters::WindowFilter;
use crate::frame::{self, PixelFrame, RegisterFrame};
use crate::result::{GestureResult, GestureState};
use crate::tracking::TrackingEngine;
use crate::traits::FrameEngine;

/// Per-frame gesture and tracking orchestrator
pub struct GestureEngine {
    config: GestureConfig,
    window: WindowFilter,
    window_reset_pending: bool,
    dynamic: DynamicGestureEngine,
    tracking: TrackingEngine,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GestureEngine {
    /// Create an engine with `config`, or the defaults when `None`
    pub fn new(config: Option<GestureConfig>) -> Self {
        let mut engine = Self {
            config: GestureConfig::default(),
            window: WindowFilter::new(),
            window_reset_pending: true,
            dynamic: DynamicGestureEngine::new(),
            tracking: TrackingEngine::new(),
        };
        engine.configure(config);
        engine
    }

    /// Active configuration
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Copy of the active configuration
    pub fn config_copy(&self) -> GestureConfig {
        self.config
    }

    /// Replace the configuration (defaults when `None`).
    ///
    /// Always resets both engines and clears the tracking calibration.
    /// Values are applied as given; a configuration that fails
    /// [`GestureConfig::validate`] is logged but still used.
    pub fn configure(&mut self, config: Option<GestureConfig>) {
        let config = config.unwrap_or_default();
        if let Err(err) = config.validate() {
            log_warn!("configure: applying degenerate configuration: {}", err);
        }
        self.config = config;
        self.reset();
        self.clear_calibration();
        log_info!(
            "configure: period {} ms, full scale {}, tracking {}",
            config.sample_period_ms,
            config.adc_full_scale,
            config.engine_mode == EngineMode::Tracking
        );
    }

    /// Validate `config` and apply it only if it passes
    pub fn try_configure(&mut self, config: GestureConfig) -> ConfigResult<()> {
        config.validate()?;
        self.configure(Some(config));
        Ok(())
    }

    /// Reset filters and state machines on the next frame.
    ///
    /// A committed tracking bias survives a reset.
    pub fn reset(&mut self) {
        self.window_reset_pending = true;
        self.dynamic.request_reset();
        self.tracking.request_reset();
    }

    /// Commit the next frame as the tracking bias
    pub fn force_calibration(&mut self) {
        self.tracking.request_force_calibration();
    }

    /// Drop the tracking bias on the next frame
    pub fn clear_calibration(&mut self) {
        self.tracking.request_clear_calibration();
    }

    /// Decode a register readout, applying the configured orientation
    pub fn decode(&self, bytes: &RegisterFrame) -> PixelFrame {
        frame::decode_register_frame(bytes, self.config.flip_sensor_pixels)
    }

    /// Process one frame.
    ///
    /// `frame` is filtered in place and holds the selected engine's
    /// processed pixels afterwards.
    pub fn run(&mut self, frame: &mut PixelFrame) -> GestureResult {
        let mut result = GestureResult::default();
        self.run_into(frame, &mut result);
        result
    }

    /// Process one frame, writing into an existing result
    pub fn run_into(&mut self, frame: &mut PixelFrame, result: &mut GestureResult) {
        let config = &self.config;

        if config.enable_window_filter {
            let reset = core::mem::take(&mut self.window_reset_pending);
            self.window.apply(frame, config.window_filter_alpha, reset);
        }

        let engine: &mut dyn FrameEngine = match config.engine_mode {
            EngineMode::Dynamic => &mut self.dynamic,
            EngineMode::Tracking => &mut self.tracking,
        };
        *result = GestureResult::from(engine.process(frame, config));
    }

    /// State of the selected engine after the most recent frame
    pub fn state(&self) -> GestureState {
        match self.config.engine_mode {
            EngineMode::Dynamic => self.dynamic.state(),
            EngineMode::Tracking => self.tracking.state(),
        }
    }

    /// True once the tracking engine holds a committed bias
    pub fn is_calibrated(&self) -> bool {
        self.tracking.is_calibrated()
    }

    /// Dynamic engine, for inspection
    pub fn dynamic(&self) -> &DynamicGestureEngine {
        &self.dynamic
    }

    /// Tracking engine, for inspection
    pub fn tracking(&self) -> &TrackingEngine {
        &self.tracking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackingConfig;
    use crate::constants::{FRAME_REGISTER_BYTES, NUM_SENSOR_PIXELS};

    #[test]
    fn default_is_dynamic_and_inactive() {
        let mut engine = GestureEngine::default();
        assert_eq!(engine.config().engine_mode, EngineMode::Dynamic);

        let mut frame = [0; NUM_SENSOR_PIXELS];
        let result = engine.run(&mut frame);
        assert_eq!(result.state, GestureState::Inactive);
        assert_eq!(result.position(), None);
    }

    #[test]
    fn try_configure_rejects_without_applying() {
        let mut engine = GestureEngine::default();
        let bad = GestureConfig::default()
            .with_tracking(TrackingConfig::default().with_detection_thresholds(100, 200));
        assert!(engine.try_configure(bad).is_err());
        assert_eq!(engine.config_copy(), GestureConfig::default());
    }

    #[test]
    fn window_filter_delays_a_step() {
        let cfg = GestureConfig::default()
            .with_window_filter(true, 0.5)
            .with_background_alphas(1.0, 0.0);
        let mut engine = GestureEngine::new(Some(cfg));

        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame);

        // taps [0, 0, 400]: 0.5 * 0 + 0.5 * 200
        let mut frame = [400; NUM_SENSOR_PIXELS];
        let result = engine.run(&mut frame);
        assert_eq!(result.peak, 100);
    }

    #[test]
    fn decode_honours_flip() {
        let mut bytes = [0u8; FRAME_REGISTER_BYTES];
        bytes[1] = 7;
        let upright = GestureEngine::default().decode(&bytes);
        assert_eq!(upright[0], 7);

        let mut cfg = GestureConfig::default();
        cfg.flip_sensor_pixels = true;
        let flipped = GestureEngine::new(Some(cfg)).decode(&bytes);
        assert_eq!(flipped[NUM_SENSOR_PIXELS - 1], 7);
    }

    #[test]
    fn configure_clears_calibration() {
        let cfg = GestureConfig::default()
            .with_engine_mode(EngineMode::Tracking)
            .with_window_filter(false, 0.5);
        let mut engine = GestureEngine::new(Some(cfg));
        engine.force_calibration();
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame);
        assert!(engine.is_calibrated());

        engine.configure(Some(cfg));
        let mut frame = [0; NUM_SENSOR_PIXELS];
        engine.run(&mut frame);
        assert!(!engine.is_calibrated());
    }
}
