//! Constants for the gesture engine
//!
//! Grouped by domain:
//! - **Sensor**: array geometry, interpolation grid, position conventions
//! - **Defaults**: factory configuration values
//!
//! Use these instead of magic numbers. Buffer sizes derive from the sensor
//! constants, so changing the interpolation factor resizes every buffer at
//! compile time.

/// Sensor geometry, interpolation grid and position conventions.
pub mod sensor;

/// Factory configuration values.
pub mod defaults;

pub use sensor::{
    SENSOR_XRES, SENSOR_YRES, NUM_SENSOR_PIXELS, FRAME_REGISTER_BYTES,
    INTERP_FACTOR, INTERP_XRES, INTERP_YRES, NUM_INTERP_PIXELS,
    DY_PIXEL_SCALE, POSITION_SENTINEL, TRACK_EDGE_EPSILON, WINDOW_TAPS,
};
