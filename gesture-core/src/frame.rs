//! Pixel frame types and register decoding
//!
//! A frame is one sample period's readout of the 10×6 array, row-major.
//! The engine filters frames in place, so after a call to
//! [`GestureEngine::run`](crate::engine::GestureEngine::run) the caller's
//! buffer holds the post-filter pixels, not the raw readout.
//!
//! The sensor transport hands over 120 bytes per frame: two bytes per pixel,
//! high byte first. [`decode_register_frame`] turns those bytes into a
//! [`PixelFrame`] and applies the mounting orientation.

use crate::constants::{FRAME_REGISTER_BYTES, NUM_INTERP_PIXELS, NUM_SENSOR_PIXELS};

/// One native frame of signed pixel intensities, row-major over 10×6.
pub type PixelFrame = [i32; NUM_SENSOR_PIXELS];

/// Upsampled frame used for thresholding and centroiding.
pub type InterpFrame = [i32; NUM_INTERP_PIXELS];

/// Per-pixel floating point state (filter accumulators, bias, reference).
pub type PixelState = [f32; NUM_SENSOR_PIXELS];

/// Raw register bytes for one frame.
pub type RegisterFrame = [u8; FRAME_REGISTER_BYTES];

/// Convert one big-endian register pair into a signed pixel value.
///
/// Readings strictly above `0x8000` are two's complement negatives.
/// `0x8000` itself decodes as +32768.
pub fn decode_pixel(hi: u8, lo: u8) -> i32 {
    let raw = i32::from(hi) << 8 | i32::from(lo);
    if raw > 1 << 15 {
        raw - (1 << 16)
    } else {
        raw
    }
}

/// Rotate a frame by 180° for sensors mounted upside-down.
pub fn flip_frame(frame: &mut PixelFrame) {
    frame.reverse();
}

/// Decode a register readout into a pixel frame.
///
/// When `flip` is set the frame is rotated by 180° after decoding.
pub fn decode_register_frame(bytes: &RegisterFrame, flip: bool) -> PixelFrame {
    let mut frame = [0; NUM_SENSOR_PIXELS];
    for (pixel, pair) in frame.iter_mut().zip(bytes.chunks_exact(2)) {
        *pixel = decode_pixel(pair[0], pair[1]);
    }
    if flip {
        flip_frame(&mut frame);
    }
    frame
}
