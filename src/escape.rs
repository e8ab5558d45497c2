// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time rendering: color a point by how long it survives.

use crate::coloring::{Coloring, Rgb};
use crate::complex::Complex;
use crate::error::ConfigError;
use crate::orbit::{check_limits, Orbiter};
use crate::parallel::paint_rows;
use crate::planes::PlaneMapper;
use crate::raster::Image;
use crate::real::Real;

/// Escape-time parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// A point has escaped once its modulus exceeds this.
    pub bailout_radius: f64,
    /// Points still inside after this many steps are bounded.
    pub max_iterations: usize,
    /// Replace the integer count with a continuous estimate.
    pub enable_smooth: bool,
}

impl Default for Escape {
    fn default() -> Self {
        Escape {
            bailout_radius: 10.0,
            max_iterations: 80,
            enable_smooth: true,
        }
    }
}

impl Escape {
    /// Check the limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_limits(self.bailout_radius, self.max_iterations)
    }
}

/// The escape scalar of `point`, or `None` if it is bounded.
///
/// Without smoothing this is the zero-based index of the escaping
/// step.  With smoothing, `log2(ln|z|² / 2)` is subtracted; that lowers
/// the value whenever the bailout radius is at least `e`, and is
/// dropped when it is not a number (`|z|² <= 1`).
pub fn evaluate<R: Real>(orbiter: &Orbiter<R>, point: Complex<R>, smooth: bool) -> Option<f64> {
    let outcome = orbiter.run(point, |_| ());
    if !outcome.escaped {
        return None;
    }
    let mut value = outcome.iterations as f64;
    if smooth {
        let correction = (0.5 * outcome.last.norm_sqr().to_f64().ln()).log2();
        if correction.is_finite() {
            value -= correction;
        }
    }
    Some(value)
}

fn shade(coloring: &Coloring, value: f64, max_iterations: usize) -> Rgb {
    let v = value / max_iterations as f64;
    match coloring {
        Coloring::Linear(linear) => linear.color(v),
        Coloring::Periodic(periodic) => periodic.color(v),
        Coloring::Solid(solid) => solid.color,
    }
}

/// Render `image` with the escape-time algorithm.  Bounded pixels keep
/// their background.
pub fn draw<R: Real>(
    image: &mut Image,
    plane: &PlaneMapper<R>,
    orbiter: &Orbiter<R>,
    params: &Escape,
    coloring: &Coloring,
    threads: usize,
) {
    paint_rows(image, threads, |pixel| {
        let point = plane.pixel_to_point(&pixel);
        evaluate(orbiter, point, params.enable_smooth)
            .map(|value| shade(coloring, value, orbiter.max_iterations()))
    });
}
