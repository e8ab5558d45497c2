// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Orbit-trap rendering: color a point by how close its orbit comes
//! to a fixed shape.

use crate::coloring::{Coloring, Rgb};
use crate::complex::Complex;
use crate::error::ConfigError;
use crate::formula::Trap;
use crate::orbit::{check_limits, Orbiter};
use crate::parallel::paint_rows;
use crate::planes::PlaneMapper;
use crate::raster::Image;
use crate::real::Real;

/// Orbit-trap parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrapParams {
    /// A point has escaped once its modulus exceeds this.
    pub bailout_radius: f64,
    /// Iteration limit.
    pub max_iterations: usize,
    /// Index into the trap registry.
    pub trap_index: usize,
    /// Leave bounded points at the background color.
    pub fill_background: bool,
}

impl Default for TrapParams {
    fn default() -> Self {
        TrapParams {
            bailout_radius: 100.0,
            max_iterations: 80,
            trap_index: 2,
            fill_background: false,
        }
    }
}

impl TrapParams {
    /// Check the limits and resolve the trap.
    pub fn validate(&self) -> Result<Trap, ConfigError> {
        check_limits(self.bailout_radius, self.max_iterations)?;
        Trap::from_index(self.trap_index)
    }
}

/// The smallest trap distance over `orbit`; the earliest point wins a
/// tie.  `None` for an empty orbit.
pub fn closest_approach<R: Real>(trap: Trap, orbit: &[Complex<R>]) -> Option<R> {
    let mut distances = orbit.iter().map(|z| trap.distance(z));
    let first = distances.next()?;
    Some(distances.fold(first, |best, d| if d < best { d } else { best }))
}

fn shade(coloring: &Coloring, value: f64) -> Rgb {
    match coloring {
        Coloring::Linear(linear) => linear.color(1.0 / (1.0 + 5.0 * value)),
        Coloring::Periodic(periodic) => periodic.color(0.03 * value.max(f64::MIN_POSITIVE).ln()),
        Coloring::Solid(solid) => solid.color,
    }
}

/// The color of `point`, or `None` to keep the background.
pub fn evaluate<R: Real>(
    orbiter: &Orbiter<R>,
    trap: Trap,
    point: Complex<R>,
    fill_background: bool,
    coloring: &Coloring,
) -> Option<Rgb> {
    let (outcome, orbit) = orbiter.trace(point);
    if fill_background && !outcome.escaped {
        return None;
    }
    closest_approach(trap, &orbit).map(|value| shade(coloring, value.to_f64()))
}

/// Render `image` with the orbit-trap algorithm.
pub fn draw<R: Real>(
    image: &mut Image,
    plane: &PlaneMapper<R>,
    orbiter: &Orbiter<R>,
    params: &TrapParams,
    trap: Trap,
    coloring: &Coloring,
    threads: usize,
) {
    paint_rows(image, threads, |pixel| {
        let point = plane.pixel_to_point(&pixel);
        evaluate(orbiter, trap, point, params.fill_background, coloring)
    });
}
