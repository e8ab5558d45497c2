// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colorings turn a normalized scalar into a pixel.
//!
//! Each algorithm decides what the scalar is (an escape count, a trap
//! distance, a visit count) and when a pixel gets painted at all; the
//! colorings only know about `[0, 1]`-ish doubles.  All of this runs
//! in double precision whatever backend produced the scalar.

use num::clamp;

/// One pixel: red, green, blue.
pub type Rgb = [u8; 3];

/// A straight gradient between two colors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Linear {
    /// Color at `v = 0`.
    pub from: Rgb,
    /// Color at `v = 1`.
    pub to: Rgb,
}

/// One sine wave per channel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Periodic {
    /// Angular frequency of each channel.
    pub amplitude: [f64; 3],
    /// Phase offset of each channel, in radians.
    pub phase: [f64; 3],
}

/// A single color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Solid {
    /// The color painted.
    pub color: Rgb,
}

/// The coloring selected for a render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Coloring {
    /// See [`Linear`].
    Linear(Linear),
    /// See [`Periodic`].
    Periodic(Periodic),
    /// See [`Solid`].
    Solid(Solid),
}

impl Linear {
    /// `from + v·(to - from)` per channel, clamped to a byte.
    pub fn color(&self, v: f64) -> Rgb {
        let mut rgb = [0; 3];
        for (channel, out) in rgb.iter_mut().enumerate() {
            let (from, to) = (f64::from(self.from[channel]), f64::from(self.to[channel]));
            *out = clamp(from + v * (to - from), 0.0, 255.0) as u8;
        }
        rgb
    }
}

impl Default for Linear {
    fn default() -> Self {
        Linear {
            from: [0, 0, 0],
            to: [255, 255, 255],
        }
    }
}

impl Periodic {
    /// `(sin(amplitude·v + phase) + 1)·127.5` per channel.
    pub fn color(&self, v: f64) -> Rgb {
        let mut rgb = [0; 3];
        for (channel, out) in rgb.iter_mut().enumerate() {
            let wave = (self.amplitude[channel] * v + self.phase[channel]).sin();
            *out = ((wave + 1.0) * 127.5) as u8;
        }
        rgb
    }
}

impl Default for Periodic {
    fn default() -> Self {
        Periodic {
            amplitude: [31.93, 30.38, 11.08],
            phase: [6.26, 5.86, 0.81],
        }
    }
}

impl Default for Solid {
    fn default() -> Self {
        Solid {
            color: [255, 255, 255],
        }
    }
}

impl Default for Coloring {
    fn default() -> Self {
        Coloring::Periodic(Periodic::default())
    }
}
