// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The bounded iteration loop shared by all three algorithms.

use crate::complex::Complex;
use crate::error::ConfigError;
use crate::formula::Formula;
use crate::real::Real;

/// How an iteration run ended.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<R> {
    /// Zero-based index of the escaping step, or the iteration limit
    /// when the point never escaped.
    pub iterations: usize,
    /// The last value of `z`.
    pub last: Complex<R>,
    /// Whether the squared modulus passed the bailout.
    pub escaped: bool,
}

/// Everything needed to iterate a point: the formula, the rotated
/// driving constant, and the two termination limits.
#[derive(Clone, Debug)]
pub struct Orbiter<R> {
    formula: Formula,
    constant: Complex<R>,
    bailout_sqr: R,
    max_iterations: usize,
}

/// Reject limits no iteration can run with.
pub fn check_limits(bailout_radius: f64, max_iterations: usize) -> Result<(), ConfigError> {
    if !(bailout_radius.is_finite() && bailout_radius > 0.0) {
        return Err(ConfigError::InvalidBailout(bailout_radius));
    }
    if max_iterations == 0 {
        return Err(ConfigError::ZeroIterations);
    }
    Ok(())
}

impl<R: Real> Orbiter<R> {
    /// The squared bailout is built at the precision of `constant`.
    pub fn new(
        formula: Formula,
        constant: Complex<R>,
        bailout_radius: f64,
        max_iterations: usize,
    ) -> Self {
        let bailout_sqr = R::from_f64(bailout_radius * bailout_radius, constant.context());
        Orbiter {
            formula,
            constant,
            bailout_sqr,
            max_iterations,
        }
    }

    /// The formula being iterated.
    pub fn formula(&self) -> Formula {
        self.formula
    }

    /// The iteration limit.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Iterate `point` until it escapes or the limit is reached,
    /// handing every non-escaping value of `z` to `visit`.
    pub fn run<F>(&self, point: Complex<R>, mut visit: F) -> Outcome<R>
    where
        F: FnMut(&Complex<R>),
    {
        let start = self.formula.initial_condition(point, &self.constant);
        let effective = start.effective;
        let (mut z, mut previous) = (start.z, start.previous);
        for n in 0..self.max_iterations {
            let (next, prev) = self.formula.step(&effective, z, previous);
            z = next;
            previous = prev;
            if z.norm_sqr() > self.bailout_sqr {
                return Outcome {
                    iterations: n,
                    last: z,
                    escaped: true,
                };
            }
            visit(&z);
        }
        Outcome {
            iterations: self.max_iterations,
            last: z,
            escaped: false,
        }
    }

    /// Iterate `point`, recording its orbit.
    pub fn trace(&self, point: Complex<R>) -> (Outcome<R>, Vec<Complex<R>>) {
        let mut orbit = Vec::new();
        let outcome = self.run(point, |z| orbit.push(z.clone()));
        (outcome, orbit)
    }
}
