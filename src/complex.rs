// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Complex numbers over any [`Real`].
//!
//! `num::Complex` needs `num::Num`, which an MPFR float cannot provide
//! without a global precision, so the iteration uses this smaller type
//! and converts to `num::Complex<f64>` at the edges.

use std::ops::{Add, Mul, Sub};

use num::Complex as Complex64;

use crate::real::Real;

/// A complex number with components of type `R`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Complex<R> {
    /// Real part.
    pub re: R,
    /// Imaginary part.
    pub im: R,
}

impl<R: Real> Complex<R> {
    /// Build a complex number from its parts.
    pub fn new(re: R, im: R) -> Self {
        Complex { re, im }
    }

    /// Build a complex number from two doubles.
    pub fn from_f64(re: f64, im: f64, context: R::Context) -> Self {
        Complex {
            re: R::from_f64(re, context),
            im: R::from_f64(im, context),
        }
    }

    /// Zero at the given precision.
    pub fn zero(context: R::Context) -> Self {
        Self::from_f64(0.0, 0.0, context)
    }

    /// `exp(i·angle)`, the unit vector at `angle` radians, evaluated
    /// at the full precision of `context`.
    pub fn unit(angle: f64, context: R::Context) -> Self {
        let (sin, cos) = R::from_f64(angle, context).sin_cos();
        Complex { re: cos, im: sin }
    }

    /// Squared modulus, `re² + im²`.
    pub fn norm_sqr(&self) -> R {
        self.re.clone() * self.re.clone() + self.im.clone() * self.im.clone()
    }

    /// Fold both components into the positive quadrant.
    pub fn abs_parts(self) -> Self {
        Complex {
            re: self.re.abs(),
            im: self.im.abs(),
        }
    }

    /// Multiply both components by a real factor.
    pub fn scale(self, factor: R) -> Self {
        Complex {
            re: self.re * factor.clone(),
            im: self.im * factor,
        }
    }

    /// Multiply by `i`.
    pub fn times_i(self) -> Self {
        Complex {
            re: -self.im,
            im: self.re,
        }
    }

    /// Nearest double-precision value.
    pub fn to_f64(&self) -> Complex64<f64> {
        Complex64::new(self.re.to_f64(), self.im.to_f64())
    }

    /// The precision context of the real part.
    pub fn context(&self) -> R::Context {
        self.re.context()
    }
}

impl<R: Real> Add for Complex<R> {
    type Output = Complex<R>;

    fn add(self, rhs: Complex<R>) -> Self {
        Complex {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl<R: Real> Sub for Complex<R> {
    type Output = Complex<R>;

    fn sub(self, rhs: Complex<R>) -> Self {
        Complex {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl<R: Real> Mul for Complex<R> {
    type Output = Complex<R>;

    fn mul(self, rhs: Complex<R>) -> Self {
        // (a + ib)(c + id) = (ac - bd) + i(ad + bc)
        let (a, b) = (self.re, self.im);
        let (c, d) = (rhs.re, rhs.im);
        let re = a.clone() * c.clone() - b.clone() * d.clone();
        let im = a * d + b * c;
        Complex { re, im }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn multiplies_like_num_complex() {
        let product = c(1.0, 2.0) * c(3.0, 4.0);
        assert_eq!(product, c(-5.0, 10.0));
        assert_eq!(product.to_f64(), Complex64::new(1.0, 2.0) * Complex64::new(3.0, 4.0));
    }

    #[test]
    fn squares() {
        assert_eq!(c(2.0, 3.0) * c(2.0, 3.0), c(-5.0, 12.0));
    }

    #[test]
    fn adds_and_subtracts() {
        assert_eq!(c(1.0, 2.0) + c(-3.0, -7.0), c(-2.0, -5.0));
        assert_eq!(c(1.0, 2.0) - c(-3.0, -7.0), c(4.0, 9.0));
    }

    #[test]
    fn norm_sqr_ignores_signs() {
        assert_eq!(c(3.0, 4.0).norm_sqr(), 25.0);
        assert_eq!(c(-3.0, -4.0).norm_sqr(), 25.0);
        assert_eq!(c(0.0, 0.0).norm_sqr(), 0.0);
    }

    #[test]
    fn abs_parts_folds_into_first_quadrant() {
        assert_eq!(c(-1.5, 2.0).abs_parts(), c(1.5, 2.0));
        assert_eq!(c(1.5, -2.0).abs_parts(), c(1.5, 2.0));
    }

    #[test]
    fn times_i_rotates_a_quarter_turn() {
        assert_eq!(c(1.0, 2.0).times_i(), c(-2.0, 1.0));
    }

    #[test]
    fn unit_lies_on_the_circle() {
        let u = Complex::<f64>::unit(0.3, ());
        assert!((u.norm_sqr() - 1.0).abs() < 1e-15);
        assert_eq!(Complex::<f64>::unit(0.0, ()), c(1.0, 0.0));
    }

    #[cfg(feature = "mpfr")]
    #[test]
    fn mpfr_unit_is_exact_past_double_precision() {
        let u = Complex::<rug::Float>::unit(2.1, 200);
        assert_eq!(u.re.prec(), 200);
        let (dsin, dcos) = 2.1_f64.sin_cos();
        assert!((u.to_f64() - Complex64::new(dcos, dsin)).norm() < 1e-15);
        let off = rug::Float::with_val(200, u.norm_sqr() - 1u32).abs();
        assert!(off.to_f64() < 1e-55);
    }

    #[cfg(feature = "mpfr")]
    #[test]
    fn mpfr_arithmetic_matches_double_for_exact_values() {
        let a = Complex::<rug::Float>::from_f64(1.0, 2.0, 96);
        let b = Complex::<rug::Float>::from_f64(3.0, 4.0, 96);
        assert_eq!((a * b).to_f64(), Complex64::new(-5.0, 10.0));
    }
}
