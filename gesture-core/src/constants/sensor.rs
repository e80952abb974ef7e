//! Sensor Geometry and Interpolation Constants
//!
//! The optical sensor is a fixed 10×6 photodiode array read out row-major.
//! Every buffer in the engine is sized from these values at compile time;
//! nothing is resized at runtime.
//!
//! ```text
//!  col:  0 1 2 3 4 5 6 7 8 9
//! row 0  . . . . . . . . . .
//! row 1  . . . . . . . . . .
//! row 2  . . . . . . . . . .     index = row * SENSOR_XRES + col
//! row 3  . . . . . . . . . .
//! row 4  . . . . . . . . . .
//! row 5  . . . . . . . . . .
//! ```

// ===== NATIVE SENSOR GRID =====

/// Number of pixel columns on the sensor.
pub const SENSOR_XRES: usize = 10;

/// Number of pixel rows on the sensor.
pub const SENSOR_YRES: usize = 6;

/// Total pixels in one native frame.
pub const NUM_SENSOR_PIXELS: usize = SENSOR_XRES * SENSOR_YRES;

/// Bytes in one register readout (two bytes per pixel, big-endian).
pub const FRAME_REGISTER_BYTES: usize = NUM_SENSOR_PIXELS * 2;

// ===== INTERPOLATED GRID =====

/// Integer upsampling factor used before thresholding and centroiding.
///
/// The interpolated grid places `INTERP_FACTOR - 1` synthetic samples
/// between each pair of native pixels. A factor of 1 is a pass-through.
pub const INTERP_FACTOR: usize = 4;

/// Columns of the interpolated grid.
pub const INTERP_XRES: usize = (SENSOR_XRES - 1) * INTERP_FACTOR + 1;

/// Rows of the interpolated grid.
pub const INTERP_YRES: usize = (SENSOR_YRES - 1) * INTERP_FACTOR + 1;

/// Total pixels in the interpolated grid.
pub const NUM_INTERP_PIXELS: usize = INTERP_XRES * INTERP_YRES;

// ===== POSITION OUTPUT =====

/// Vertical pixel pitch correction (10/7).
///
/// Sensor pixels are taller than they are wide; multiplying the y centroid
/// by this factor gives x and y the same physical unit. Applied by the
/// dynamic gesture engine only.
pub const DY_PIXEL_SCALE: f32 = 1.42857;

/// Position value reported while no object is present.
pub const POSITION_SENTINEL: f32 = -1.0;

/// Margin kept below the upper edge when clamping tracked positions.
///
/// Tracked coordinates land in `[0, SENSOR_XRES - 1)`; a centroid on the
/// far edge is reported as `SENSOR_XRES - 1 - TRACK_EDGE_EPSILON`.
pub const TRACK_EDGE_EPSILON: f32 = 0.001;

// ===== TEMPORAL WINDOW =====

/// Number of frames held by the 3-tap window filter.
pub const WINDOW_TAPS: usize = 3;
