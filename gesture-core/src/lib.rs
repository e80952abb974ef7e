//! Core gesture and tracking engine for the 10×6 optical proximity sensor
//!
//! Turns raw photodiode frames into presence, position and tracking state.
//! Designed for the sensor's host MCU.
//!
//! Key constraints:
//! - One frame every ~20 ms, processed synchronously
//! - No heap allocation; every buffer is sized at compile time
//! - Frame processing never fails, degenerate input degrades to sentinels
//!
//! ```rust
//! use gesture_core::{EngineMode, GestureConfig, GestureEngine, NUM_SENSOR_PIXELS};
//!
//! let config = GestureConfig::default().with_engine_mode(EngineMode::Tracking);
//! let mut engine = GestureEngine::new(Some(config));
//!
//! let mut frame = [0i32; NUM_SENSOR_PIXELS];
//! let result = engine.run(&mut frame);
//!
//! match result.position() {
//!     Some((x, y)) => { let _ = (x, y); } // Object tracked
//!     None => {}                          // Nothing above threshold
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod dynamic;
pub mod engine;
pub mod errors;
pub mod filters;
pub mod frame;
pub mod imaging;
pub mod result;
pub mod tracking;
pub mod traits;

// Public API
pub use config::{EngineMode, GestureConfig, PixelDataMode, TrackingConfig};
pub use constants::{NUM_SENSOR_PIXELS, SENSOR_XRES, SENSOR_YRES};
pub use dynamic::DynamicGestureEngine;
pub use engine::GestureEngine;
pub use errors::{ConfigError, ConfigResult};
pub use frame::{InterpFrame, PixelFrame, RegisterFrame};
pub use result::{
    DynamicGestureResult, EngineResult, GestureEvent, GestureResult, GestureState,
    TrackingResult,
};
pub use tracking::TrackingEngine;
pub use traits::FrameEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
