// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The real-number half of the numeric backend.
//!
//! Every algorithm in this crate is written once against [`Real`] and
//! instantiated either with the native `f64` or, for deep zooms where
//! a double runs out of mantissa, with an MPFR float of a chosen bit
//! width.  Coloring always happens in double precision, so the only
//! way out of a `Real` is [`Real::to_f64`].

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::ConfigError;

/// A real number the fractal iteration can run on.
///
/// All arithmetic is on owned values so that arbitrary-precision types
/// can reuse their allocation for the result.
pub trait Real:
    Clone
    + Debug
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Whatever a value needs to be constructed: nothing for `f64`,
    /// the bit width for MPFR floats.
    type Context: Copy + Debug + Send + Sync;

    /// Build a value from a double.
    fn from_f64(value: f64, context: Self::Context) -> Self;

    /// Parse a decimal string, keeping as many digits as the context allows.
    fn parse(text: &str, context: Self::Context) -> Result<Self, ConfigError>;

    /// Round to the nearest double.
    fn to_f64(&self) -> f64;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Sine and cosine, at the precision of `self`.
    fn sin_cos(self) -> (Self, Self);

    /// The context this value was built with, so that constants can be
    /// created at a matching precision.
    fn context(&self) -> Self::Context;
}

impl Real for f64 {
    type Context = ();

    #[inline]
    fn from_f64(value: f64, _: ()) -> Self {
        value
    }

    fn parse(text: &str, _: ()) -> Result<Self, ConfigError> {
        text.trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidNumber {
                text: text.to_string(),
            })
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        f64::sin_cos(self)
    }

    #[inline]
    fn context(&self) {}
}

#[cfg(feature = "mpfr")]
impl Real for rug::Float {
    type Context = u32;

    fn from_f64(value: f64, bits: u32) -> Self {
        rug::Float::with_val(bits, value)
    }

    fn parse(text: &str, bits: u32) -> Result<Self, ConfigError> {
        match rug::Float::parse(text.trim()) {
            Ok(parsed) => Ok(rug::Float::with_val(bits, parsed)),
            Err(_) => Err(ConfigError::InvalidNumber {
                text: text.to_string(),
            }),
        }
    }

    fn to_f64(&self) -> f64 {
        rug::Float::to_f64(self)
    }

    fn abs(self) -> Self {
        rug::Float::abs(self)
    }

    fn sin_cos(self) -> (Self, Self) {
        let cos = rug::Float::new(self.prec());
        rug::Float::sin_cos(self, cos)
    }

    fn context(&self) -> u32 {
        self.prec()
    }
}

/// Check that `bits` is a width MPFR accepts.
#[cfg(feature = "mpfr")]
pub fn check_precision(bits: u32) -> Result<u32, ConfigError> {
    let (min, max) = (rug::float::prec_min(), rug::float::prec_max());
    if bits < min || bits > max {
        return Err(ConfigError::InvalidPrecision { bits, min, max });
    }
    Ok(bits)
}

/// The smaller of two values; the first one wins a tie.
#[inline]
pub fn min_of<R: PartialOrd>(a: R, b: R) -> R {
    if b < a {
        b
    } else {
        a
    }
}
