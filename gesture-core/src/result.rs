//! Per-frame results
//!
//! Each engine produces an [`EngineResult`]; the orchestrator copies the
//! active engine's fields into the unified [`GestureResult`] that callers
//! poll every sample period.
//!
//! Positions are only meaningful while the state is active. Inactive
//! results always carry [`POSITION_SENTINEL`] in both coordinates.

use crate::constants::POSITION_SENTINEL;

/// Gesture classification slot. Only presence/position is estimated, so
/// this is always [`GestureEvent::None`] today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureEvent {
    /// No gesture recognised
    #[default]
    None,
    /// Reserved for a future classifier
    Placeholder,
}

/// Discrete engine state as reported to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum GestureState {
    /// Nothing above threshold
    #[default]
    Inactive = 0,
    /// Object detected (dynamic) or being tracked (tracking)
    Active = 1,
    /// Reserved code, never produced by the engines
    Reserved = 2,
}

impl GestureState {
    /// Numeric code used on the wire: 0 inactive, 1 active, 2 reserved
    pub fn code(self) -> u32 {
        self as u32
    }

    /// True for any non-inactive state
    pub fn is_active(self) -> bool {
        self != Self::Inactive
    }
}

/// Output of a single engine for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineResult {
    /// Engine state after this frame
    pub state: GestureState,
    /// Consecutive active frames including this one; 0 while inactive
    pub n_sample: u32,
    /// Post-filter peak pixel
    pub peak: i32,
    /// Column position, or the sentinel while inactive
    pub x: f32,
    /// Row position, or the sentinel while inactive
    pub y: f32,
}

/// Result of the dynamic gesture engine
pub type DynamicGestureResult = EngineResult;

/// Result of the tracking engine
pub type TrackingResult = EngineResult;

impl EngineResult {
    /// Inactive result with sentinel position
    pub fn inactive(peak: i32) -> Self {
        Self {
            state: GestureState::Inactive,
            n_sample: 0,
            peak,
            x: POSITION_SENTINEL,
            y: POSITION_SENTINEL,
        }
    }

    /// Active result at `(x, y)`
    pub fn active(peak: i32, n_sample: u32, x: f32, y: f32) -> Self {
        Self {
            state: GestureState::Active,
            n_sample,
            peak,
            x,
            y,
        }
    }
}

/// Unified result handed to the application every frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureResult {
    /// Gesture event for this frame
    pub gesture: GestureEvent,
    /// Discrete state
    pub state: GestureState,
    /// Frames since the current activity started
    pub n_sample: u32,
    /// Post-filter peak pixel
    pub peak: i32,
    /// Object column position
    pub x: f32,
    /// Object row position
    pub y: f32,
    /// Reserved
    pub float_placeholder: f32,
    /// Reserved
    pub int_placeholder: u32,
}

impl Default for GestureResult {
    fn default() -> Self {
        Self {
            gesture: GestureEvent::None,
            state: GestureState::Inactive,
            n_sample: 0,
            peak: 0,
            x: POSITION_SENTINEL,
            y: POSITION_SENTINEL,
            float_placeholder: 0.0,
            int_placeholder: 0,
        }
    }
}

impl GestureResult {
    /// True when an object is present
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Position, if meaningful for this frame
    pub fn position(&self) -> Option<(f32, f32)> {
        self.is_active().then_some((self.x, self.y))
    }
}

impl From<EngineResult> for GestureResult {
    fn from(engine: EngineResult) -> Self {
        Self {
            state: engine.state,
            n_sample: engine.n_sample,
            peak: engine.peak,
            x: engine.x,
            y: engine.y,
            ..Self::default()
        }
    }
}
