//! Common test utilities for integration tests
//!
//! This module provides:
//! - Synthetic frame generators (spots, blobs, flat scenes, register images)
//! - Engine drivers that feed a sequence of frames
//! - Configurations that make the filters transparent

#![allow(dead_code)]

use gesture_core::{
    constants::FRAME_REGISTER_BYTES, EngineMode, GestureConfig, GestureEngine, GestureResult,
    PixelFrame, RegisterFrame, TrackingConfig, NUM_SENSOR_PIXELS, SENSOR_XRES,
};

/// Frame with every pixel at `value`
pub fn flat(value: i32) -> PixelFrame {
    [value; NUM_SENSOR_PIXELS]
}

/// Zero frame with a single lit pixel
pub fn spot(col: usize, row: usize, value: i32) -> PixelFrame {
    let mut frame = flat(0);
    frame[row * SENSOR_XRES + col] = value;
    frame
}

/// Rounded blob centred on `(col, row)`, falling off as `1 / (1 + d²)`
pub fn blob(col: usize, row: usize, amplitude: i32) -> PixelFrame {
    let mut frame = flat(0);
    for (i, pixel) in frame.iter_mut().enumerate() {
        let dx = (i % SENSOR_XRES) as i32 - col as i32;
        let dy = (i / SENSOR_XRES) as i32 - row as i32;
        *pixel = amplitude / (1 + dx * dx + dy * dy);
    }
    frame
}

/// Flat scene with a single pixel raised above it
pub fn spot_on(background: i32, col: usize, row: usize, value: i32) -> PixelFrame {
    let mut frame = flat(background);
    frame[row * SENSOR_XRES + col] = background + value;
    frame
}

/// Encode a frame as the sensor's big-endian register readout
pub fn encode_registers(frame: &PixelFrame) -> RegisterFrame {
    let mut bytes = [0u8; FRAME_REGISTER_BYTES];
    for (pair, &pixel) in bytes.chunks_exact_mut(2).zip(frame.iter()) {
        let raw = (pixel as u32 & 0xFFFF) as u16;
        pair.copy_from_slice(&raw.to_be_bytes());
    }
    bytes
}

/// Dynamic configuration with the window filter off and the background
/// average frozen, so pixels pass straight through after the reset pass
pub fn transparent_dynamic() -> GestureConfig {
    GestureConfig::default()
        .with_window_filter(false, 0.5)
        .with_background_alphas(1.0, 0.0)
}

/// Tracking configuration calibrated only on request, unity gains
pub fn manual_tracking() -> GestureConfig {
    GestureConfig::default()
        .with_engine_mode(EngineMode::Tracking)
        .with_window_filter(false, 0.5)
        .with_tracking(
            TrackingConfig::default()
                .with_auto_calibration(false)
                .with_gain_correction(false),
        )
}

/// Run every frame through `engine`, returning the results in order
pub fn drive(engine: &mut GestureEngine, frames: &[PixelFrame]) -> Vec<GestureResult> {
    frames
        .iter()
        .map(|frame| {
            let mut frame = *frame;
            engine.run(&mut frame)
        })
        .collect()
}

/// Approximate float comparison for positions
pub fn approx(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 1e-4
}
