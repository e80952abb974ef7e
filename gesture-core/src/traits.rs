//! Core traits for frame engines
//!
//! Both engines consume one native frame per sample period and produce an
//! [`EngineResult`]. Keep the seam small: the orchestrator only needs to
//! feed frames, request resets and read the current state.

use crate::config::GestureConfig;
use crate::frame::PixelFrame;
use crate::result::{EngineResult, GestureState};

/// A stateful per-frame estimator
pub trait FrameEngine {
    /// Process one frame in place.
    ///
    /// The frame is left holding the engine's fully filtered pixels, which
    /// host tooling may stream. Any pending reset is consumed first.
    fn process(&mut self, frame: &mut PixelFrame, config: &GestureConfig) -> EngineResult;

    /// Schedule a reset, applied at the start of the next frame
    fn request_reset(&mut self);

    /// State reached after the most recent frame
    fn state(&self) -> GestureState;
}

/// Frames that can be scored by peak amplitude
pub trait Amplitude {
    /// Largest pixel value
    fn peak(&self) -> i32;

    /// Smallest pixel value
    fn trough(&self) -> i32;

    /// Peak-to-trough range
    fn range(&self) -> i64 {
        i64::from(self.peak()) - i64::from(self.trough())
    }
}

impl Amplitude for PixelFrame {
    fn peak(&self) -> i32 {
        crate::imaging::peak(self)
    }

    fn trough(&self) -> i32 {
        crate::imaging::trough(self)
    }
}
