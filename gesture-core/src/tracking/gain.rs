//! Zone gain correction
//!
//! The lens delivers less light to the edges of the array, so the tracking
//! path rescales pixels by concentric zone. Each pixel's zone is the
//! outermost of its column zone and its row zone:
//!
//! ```text
//!  col:  0 1 2 3 4 5 6 7 8 9
//! row 0  O O O O O O O O O O
//! row 1  O O M M M M M M O O      I = inner  (gain_factor_0)
//! row 2  O O M I I I I M O O      M = middle (gain_factor_1)
//! row 3  O O M I I I I M O O      O = outer  (gain_factor_2)
//! row 4  O O M M M M M M O O
//! row 5  O O O O O O O O O O
//! ```

use crate::config::TrackingConfig;
use crate::constants::{NUM_SENSOR_PIXELS, SENSOR_XRES, SENSOR_YRES};
use crate::frame::PixelFrame;

/// Concentric gain zone, ordered innermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    /// Centre block
    Inner = 0,
    /// Ring around the centre
    Middle = 1,
    /// Border pixels
    Outer = 2,
}

use Zone::{Inner, Middle, Outer};

const COLUMN_ZONES: [Zone; SENSOR_XRES] = [
    Outer, Outer, Middle, Inner, Inner, Inner, Inner, Middle, Outer, Outer,
];

const ROW_ZONES: [Zone; SENSOR_YRES] = [Outer, Middle, Inner, Inner, Middle, Outer];

const fn outermost(a: Zone, b: Zone) -> Zone {
    if (a as u8) >= (b as u8) {
        a
    } else {
        b
    }
}

const fn build_zone_map() -> [Zone; NUM_SENSOR_PIXELS] {
    let mut map = [Inner; NUM_SENSOR_PIXELS];
    let mut i = 0;
    while i < NUM_SENSOR_PIXELS {
        map[i] = outermost(COLUMN_ZONES[i % SENSOR_XRES], ROW_ZONES[i / SENSOR_XRES]);
        i += 1;
    }
    map
}

/// Zone of every pixel in row-major order
pub const ZONE_MAP: [Zone; NUM_SENSOR_PIXELS] = build_zone_map();

/// Zone of the pixel at `(col, row)`
pub fn zone_at(col: usize, row: usize) -> Zone {
    ZONE_MAP[row * SENSOR_XRES + col]
}

/// Per-zone gains, indexed by [`Zone`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneGains([f32; 3]);

impl ZoneGains {
    /// Unity gain everywhere
    pub const UNITY: Self = Self([1.0; 3]);

    /// Gains from a tracking configuration; unity when correction is off
    pub fn from_config(config: &TrackingConfig) -> Self {
        if config.enable_gain_correction {
            Self([config.gain_factor_0, config.gain_factor_1, config.gain_factor_2])
        } else {
            Self::UNITY
        }
    }

    /// Gain applied to `zone`
    pub fn gain(&self, zone: Zone) -> f32 {
        self.0[zone as usize]
    }

    /// Scale every pixel by its zone gain, truncating toward zero
    pub fn apply(&self, frame: &mut PixelFrame) {
        for (pixel, &zone) in frame.iter_mut().zip(ZONE_MAP.iter()) {
            *pixel = (*pixel as f32 * self.gain(zone)) as i32;
        }
    }
}
