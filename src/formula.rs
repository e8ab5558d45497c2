// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed registry of fractal formulas and orbit traps.
//!
//! A formula is two pure functions: one that turns a point of the
//! plane (and the driving constant) into a starting state, and one
//! that advances that state by a single step.  Both are a `match` on
//! the formula, so the set is closed and checked at compile time.

use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use crate::complex::Complex;
use crate::error::ConfigError;
use crate::real::{min_of, Real};

/// One of the named escape-time formulas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Formula {
    /// `|z|² - |z| + c` with both parts folded positive.
    Buffalo,
    /// `|z|² + c` with both parts folded positive.
    BurningShip,
    /// `z² + k` for the fixed driving constant `k`.
    Julia,
    /// `z² + c`.
    Mandelbrot,
    /// `z² + z' + c`, where `z'` is the previous value of `z`.
    Manowar,
    /// `z² - z'/2 + 0.5667`.
    Phoenix,
}

/// The state an iteration starts from.
#[derive(Clone, Debug, PartialEq)]
pub struct Start<R> {
    /// The additive parameter handed to every step.
    pub effective: Complex<R>,
    /// First value of `z`.
    pub z: Complex<R>,
    /// The value standing in for the `z` before the first one.
    pub previous: Complex<R>,
}

const PHOENIX_OFFSET: f64 = 0.5667;

impl Formula {
    /// Every formula, in name order.
    pub const ALL: [Formula; 6] = [
        Formula::Buffalo,
        Formula::BurningShip,
        Formula::Julia,
        Formula::Mandelbrot,
        Formula::Manowar,
        Formula::Phoenix,
    ];

    /// The registry name.
    pub fn name(self) -> &'static str {
        match self {
            Formula::Buffalo => "buffalo",
            Formula::BurningShip => "burningship",
            Formula::Julia => "julia",
            Formula::Mandelbrot => "mandelbrot",
            Formula::Manowar => "manowar",
            Formula::Phoenix => "phoenix",
        }
    }

    /// The starting state for the plane point `point`, given the
    /// rotated driving constant.
    pub fn initial_condition<R: Real>(self, point: Complex<R>, constant: &Complex<R>) -> Start<R> {
        let zero = Complex::zero(point.context());
        match self {
            Formula::Buffalo | Formula::BurningShip | Formula::Mandelbrot => Start {
                effective: point,
                z: zero.clone(),
                previous: zero,
            },
            Formula::Julia => Start {
                effective: constant.clone(),
                z: point,
                previous: zero,
            },
            Formula::Manowar => Start {
                effective: point.clone(),
                z: point.clone(),
                previous: point,
            },
            Formula::Phoenix => Start {
                effective: point.clone(),
                z: point.times_i(),
                previous: constant.clone(),
            },
        }
    }

    /// One iteration.  Returns the next `z` together with the `z` it
    /// replaced, which becomes the next step's `previous`.
    pub fn step<R: Real>(
        self,
        effective: &Complex<R>,
        z: Complex<R>,
        previous: Complex<R>,
    ) -> (Complex<R>, Complex<R>) {
        let next = match self {
            Formula::Buffalo => {
                let a = z.clone().abs_parts();
                a.clone() * a.clone() - a + effective.clone()
            }
            Formula::BurningShip => {
                let a = z.clone().abs_parts();
                a.clone() * a + effective.clone()
            }
            Formula::Julia | Formula::Mandelbrot => z.clone() * z.clone() + effective.clone(),
            Formula::Manowar => z.clone() * z.clone() + previous + effective.clone(),
            Formula::Phoenix => {
                let context = z.context();
                let half = R::from_f64(0.5, context);
                z.clone() * z.clone() - previous.scale(half)
                    + Complex::from_f64(PHOENIX_OFFSET, 0.0, context)
            }
        };
        (next, z)
    }
}

impl FromStr for Formula {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Formula::ALL
            .iter()
            .copied()
            .find(|formula| formula.name() == name)
            .ok_or_else(|| ConfigError::UnknownFormula(name.to_string()))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The shapes an orbit trap can measure distance to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// The origin, measured as the squared modulus.
    Origin,
    /// The nearer of the real and imaginary axes.
    Axes,
    /// The nearer of the two diagonals `re = im` and `re = -im`.
    Diagonals,
    /// The unit circle, measured on the squared modulus.
    UnitCircle,
    /// Whichever of the origin and the unit circle is nearer.
    OriginOrCircle,
}

impl Trap {
    /// Number of traps in the registry.
    pub const COUNT: usize = 5;

    /// Look a trap up by its index.
    pub fn from_index(index: usize) -> Result<Trap, ConfigError> {
        match index {
            0 => Ok(Trap::Origin),
            1 => Ok(Trap::Axes),
            2 => Ok(Trap::Diagonals),
            3 => Ok(Trap::UnitCircle),
            4 => Ok(Trap::OriginOrCircle),
            _ => Err(ConfigError::UnknownTrap {
                index,
                count: Trap::COUNT,
            }),
        }
    }

    /// Distance from `z` to this trap's shape.
    pub fn distance<R: Real>(self, z: &Complex<R>) -> R {
        let one = || R::from_f64(1.0, z.context());
        match self {
            Trap::Origin => z.norm_sqr(),
            Trap::Axes => min_of(z.re.clone().abs(), z.im.clone().abs()),
            Trap::Diagonals => {
                let along = (z.re.clone() - z.im.clone()).abs();
                let across = (z.re.clone() + z.im.clone()).abs();
                min_of(along, across) / R::from_f64(SQRT_2, z.context())
            }
            Trap::UnitCircle => (z.norm_sqr() - one()).abs(),
            Trap::OriginOrCircle => {
                let norm = z.norm_sqr();
                min_of(norm.clone(), (norm - one()).abs())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn every_name_round_trips() {
        for formula in Formula::ALL.iter() {
            assert_eq!(formula.name().parse::<Formula>().unwrap(), *formula);
            assert_eq!(formula.to_string(), formula.name());
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "newton".parse::<Formula>(),
            Err(ConfigError::UnknownFormula("newton".to_string()))
        );
        assert!("Mandelbrot".parse::<Formula>().is_err());
    }

    #[test]
    fn initial_conditions() {
        let p = c(0.25, -0.5);
        let k = c(0.0, 1.0);
        let zero = c(0.0, 0.0);

        let mandelbrot = Formula::Mandelbrot.initial_condition(p.clone(), &k);
        let expected = Start {
            effective: p.clone(),
            z: zero.clone(),
            previous: zero.clone(),
        };
        assert_eq!(mandelbrot, expected);

        let julia = Formula::Julia.initial_condition(p.clone(), &k);
        let expected = Start {
            effective: k.clone(),
            z: p.clone(),
            previous: zero,
        };
        assert_eq!(julia, expected);

        let manowar = Formula::Manowar.initial_condition(p.clone(), &k);
        let expected = Start {
            effective: p.clone(),
            z: p.clone(),
            previous: p.clone(),
        };
        assert_eq!(manowar, expected);

        let phoenix = Formula::Phoenix.initial_condition(p.clone(), &k);
        let expected = Start {
            effective: p,
            z: c(0.5, 0.25),
            previous: k,
        };
        assert_eq!(phoenix, expected);
    }

    #[test]
    fn steps() {
        let e = c(0.5, 0.5);
        let z = c(-1.0, 2.0);
        let zp = c(2.0, 0.0);

        assert_eq!(Formula::Mandelbrot.step(&e, z.clone(), zp.clone()), (c(-2.5, -3.5), z.clone()));
        assert_eq!(Formula::Julia.step(&e, z.clone(), zp.clone()).0, c(-2.5, -3.5));
        // (1 + 2i)² = -3 + 4i
        assert_eq!(Formula::BurningShip.step(&e, z.clone(), zp.clone()).0, c(-2.5, 4.5));
        assert_eq!(Formula::Buffalo.step(&e, z.clone(), zp.clone()).0, c(-3.5, 2.5));
        assert_eq!(Formula::Manowar.step(&e, z.clone(), zp.clone()).0, c(-0.5, -3.5));
        let (next, prev) = Formula::Phoenix.step(&e, z.clone(), zp);
        assert!((next.re - (-3.0 - 1.0 + 0.5667)).abs() < 1e-12);
        assert_eq!(next.im, -4.0);
        assert_eq!(prev, z);
    }

    #[test]
    fn trap_indices() {
        assert_eq!(Trap::from_index(0), Ok(Trap::Origin));
        assert_eq!(Trap::from_index(4), Ok(Trap::OriginOrCircle));
        assert_eq!(
            Trap::from_index(5),
            Err(ConfigError::UnknownTrap { index: 5, count: 5 })
        );
    }

    #[test]
    fn trap_distances() {
        let z = c(0.6, -0.8);
        assert!((Trap::Origin.distance(&z) - 1.0).abs() < 1e-12);
        assert!((Trap::Axes.distance(&z) - 0.6).abs() < 1e-12);
        assert!((Trap::Diagonals.distance(&z) - 0.2 / SQRT_2).abs() < 1e-12);
        assert!(Trap::UnitCircle.distance(&z).abs() < 1e-12);
        assert!(Trap::OriginOrCircle.distance(&z).abs() < 1e-12);
        assert_eq!(Trap::OriginOrCircle.distance(&c(0.1, 0.0)), 0.1 * 0.1);
    }
}
