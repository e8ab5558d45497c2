// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render configuration.
//!
//! A [`RenderRequest`] is what a caller asks for: every algorithm and
//! coloring is optional, numbers that may need more than double
//! precision are still text.  [`RenderRequest::validate`] checks it
//! and produces a [`RenderConfig`], which names exactly one algorithm
//! and one coloring and is ready to hand to [`crate::engine::render`].

use std::fmt;

use crate::coloring::{Coloring, Linear, Periodic, Solid};
use crate::density::Density;
use crate::error::ConfigError;
use crate::escape::Escape;
use crate::formula::{Formula, Trap};
use crate::real::Real;
use crate::trap::TrapParams;

/// The formula to render and the angle of its driving constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Fractal {
    /// Registry name of the formula.
    pub name: String,
    /// Angle of the driving constant `exp(i·parameter)`, in radians.
    pub parameter: f64,
}

impl Default for Fractal {
    fn default() -> Self {
        Fractal {
            name: Formula::Mandelbrot.name().to_string(),
            parameter: 0.0,
        }
    }
}

/// The numeric backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Precision {
    /// Native `f64`.
    Double,
    /// MPFR floats of the given width.
    Arbitrary {
        /// Mantissa width in bits.
        bits: u32,
    },
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Double
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Precision::Double => write!(f, "double"),
            Precision::Arbitrary { bits } => write!(f, "{} bits", bits),
        }
    }
}

/// The generation algorithm of a validated render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Algorithm {
    /// Escape-time.
    Escape(Escape),
    /// Orbit trap, with the trap already resolved.
    Trap(TrapParams, Trap),
    /// Density accumulation.
    Density(Density),
}

impl Algorithm {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Escape(_) => "escape",
            Algorithm::Trap(..) => "trap",
            Algorithm::Density(_) => "density",
        }
    }

    /// Bailout radius and iteration limit of the selected algorithm.
    pub fn limits(&self) -> (f64, usize) {
        match self {
            Algorithm::Escape(p) => (p.bailout_radius, p.max_iterations),
            Algorithm::Trap(p, _) => (p.bailout_radius, p.max_iterations),
            Algorithm::Density(p) => (p.bailout_radius, p.max_iterations),
        }
    }
}

/// Everything a caller may ask for.  At most one algorithm and at most
/// one coloring may be set; with none, escape-time and periodic
/// coloring are used.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    /// What to render.
    pub fractal: Fractal,
    /// Select escape-time.
    pub escape: Option<Escape>,
    /// Select orbit traps.
    pub trap: Option<TrapParams>,
    /// Select density accumulation.
    pub density: Option<Density>,
    /// Select a linear gradient.
    pub linear: Option<Linear>,
    /// Select periodic coloring.
    pub periodic: Option<Periodic>,
    /// Select a solid color.
    pub solid: Option<Solid>,
    /// Numeric backend.
    pub precision: Precision,
    /// Real and imaginary part of the center, as decimal text.
    pub center: (String, String),
    /// Magnification, as decimal text.
    pub zoom: String,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Worker threads.
    pub threads: usize,
}

impl Default for RenderRequest {
    fn default() -> Self {
        RenderRequest {
            fractal: Fractal::default(),
            escape: None,
            trap: None,
            density: None,
            linear: None,
            periodic: None,
            solid: None,
            precision: Precision::Double,
            center: ("-0.75".to_string(), "0".to_string()),
            zoom: "1.1".to_string(),
            width: 1920,
            height: 1080,
            threads: 1,
        }
    }
}

/// A checked render request.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// The formula.
    pub formula: Formula,
    /// Angle of the driving constant, in radians.
    pub parameter: f64,
    /// The one algorithm.
    pub algorithm: Algorithm,
    /// The one coloring.
    pub coloring: Coloring,
    /// Numeric backend.
    pub precision: Precision,
    /// Real and imaginary part of the center, as decimal text.
    pub center: (String, String),
    /// Magnification, as decimal text.
    pub zoom: String,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Worker threads.
    pub threads: usize,
}

fn check_precision(precision: Precision) -> Result<(), ConfigError> {
    match precision {
        Precision::Double => Ok(()),
        #[cfg(feature = "mpfr")]
        Precision::Arbitrary { bits } => crate::real::check_precision(bits).map(|_| ()),
        #[cfg(not(feature = "mpfr"))]
        Precision::Arbitrary { .. } => Err(ConfigError::ArbitraryPrecisionUnavailable),
    }
}

impl RenderRequest {
    /// Check everything that can be checked before any pixel work.
    pub fn validate(&self) -> Result<RenderConfig, ConfigError> {
        let formula: Formula = self.fractal.name.parse()?;

        let algorithm = match (self.escape, self.trap, self.density) {
            (None, None, None) => Algorithm::Escape(Escape::default()),
            (Some(escape), None, None) => {
                escape.validate()?;
                Algorithm::Escape(escape)
            }
            (None, Some(params), None) => Algorithm::Trap(params, params.validate()?),
            (None, None, Some(density)) => {
                density.validate()?;
                Algorithm::Density(density)
            }
            _ => return Err(ConfigError::ConflictingAlgorithms),
        };

        let coloring = match (self.linear, self.periodic, self.solid) {
            (None, None, None) => Coloring::default(),
            (Some(linear), None, None) => Coloring::Linear(linear),
            (None, Some(periodic), None) => Coloring::Periodic(periodic),
            (None, None, Some(solid)) => Coloring::Solid(solid),
            _ => return Err(ConfigError::ConflictingColorings),
        };

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        check_precision(self.precision)?;

        // Syntax only; the value is parsed again in the render's own
        // precision.
        f64::parse(&self.center.0, ())?;
        f64::parse(&self.center.1, ())?;
        f64::parse(&self.zoom, ())?;

        Ok(RenderConfig {
            formula,
            parameter: self.fractal.parameter,
            algorithm,
            coloring,
            precision: self.precision,
            center: self.center.clone(),
            zoom: self.zoom.clone(),
            width: self.width,
            height: self.height,
            threads: self.threads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_escape_and_periodic() {
        let config = RenderRequest::default().validate().unwrap();
        assert_eq!(config.formula, Formula::Mandelbrot);
        assert_eq!(config.algorithm, Algorithm::Escape(Escape::default()));
        assert_eq!(config.coloring, Coloring::Periodic(Periodic::default()));
        assert_eq!((config.width, config.height, config.threads), (1920, 1080, 1));
    }

    #[test]
    fn one_algorithm_at_a_time() {
        let request = RenderRequest {
            escape: Some(Escape::default()),
            trap: Some(TrapParams::default()),
            ..RenderRequest::default()
        };
        assert_eq!(request.validate(), Err(ConfigError::ConflictingAlgorithms));

        let request = RenderRequest {
            trap: Some(TrapParams::default()),
            density: Some(Density::default()),
            ..RenderRequest::default()
        };
        assert_eq!(request.validate(), Err(ConfigError::ConflictingAlgorithms));
    }

    #[test]
    fn one_coloring_at_a_time() {
        let request = RenderRequest {
            linear: Some(Linear::default()),
            solid: Some(Solid::default()),
            ..RenderRequest::default()
        };
        assert_eq!(request.validate(), Err(ConfigError::ConflictingColorings));
    }

    #[test]
    fn selected_pieces_are_carried_through() {
        let request = RenderRequest {
            fractal: Fractal {
                name: "julia".to_string(),
                parameter: 1.5,
            },
            trap: Some(TrapParams {
                trap_index: 4,
                ..TrapParams::default()
            }),
            solid: Some(Solid { color: [1, 2, 3] }),
            ..RenderRequest::default()
        };
        let config = request.validate().unwrap();
        assert_eq!(config.formula, Formula::Julia);
        assert_eq!(config.parameter, 1.5);
        assert_eq!(config.algorithm.name(), "trap");
        assert_eq!(config.algorithm.limits(), (100.0, 80));
        match config.algorithm {
            Algorithm::Trap(_, trap) => assert_eq!(trap, Trap::OriginOrCircle),
            other => panic!("unexpected algorithm {:?}", other),
        }
        assert_eq!(config.coloring, Coloring::Solid(Solid { color: [1, 2, 3] }));
    }

    #[test]
    fn bad_values_are_rejected() {
        let unknown = RenderRequest {
            fractal: Fractal {
                name: "newton".to_string(),
                parameter: 0.0,
            },
            ..RenderRequest::default()
        };
        assert_eq!(
            unknown.validate(),
            Err(ConfigError::UnknownFormula("newton".to_string()))
        );

        let trap = RenderRequest {
            trap: Some(TrapParams {
                trap_index: 5,
                ..TrapParams::default()
            }),
            ..RenderRequest::default()
        };
        assert_eq!(
            trap.validate(),
            Err(ConfigError::UnknownTrap { index: 5, count: 5 })
        );

        let bailout = RenderRequest {
            escape: Some(Escape {
                bailout_radius: -1.0,
                ..Escape::default()
            }),
            ..RenderRequest::default()
        };
        assert_eq!(bailout.validate(), Err(ConfigError::InvalidBailout(-1.0)));

        let iterations = RenderRequest {
            density: Some(Density {
                max_iterations: 0,
                ..Density::default()
            }),
            ..RenderRequest::default()
        };
        assert_eq!(iterations.validate(), Err(ConfigError::ZeroIterations));

        let empty = RenderRequest {
            width: 0,
            ..RenderRequest::default()
        };
        assert!(empty.validate().is_err());

        let idle = RenderRequest {
            threads: 0,
            ..RenderRequest::default()
        };
        assert_eq!(idle.validate(), Err(ConfigError::ZeroThreads));

        let center = RenderRequest {
            center: ("left".to_string(), "0".to_string()),
            ..RenderRequest::default()
        };
        assert_eq!(
            center.validate(),
            Err(ConfigError::InvalidNumber {
                text: "left".to_string()
            })
        );
    }

    #[test]
    fn zero_samples_are_allowed() {
        let request = RenderRequest {
            density: Some(Density {
                samples: 0,
                ..Density::default()
            }),
            ..RenderRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[cfg(feature = "mpfr")]
    #[test]
    fn precision_width_is_checked() {
        let request = RenderRequest {
            precision: Precision::Arbitrary { bits: 0 },
            ..RenderRequest::default()
        };
        assert!(request.validate().is_err());
        let request = RenderRequest {
            precision: Precision::Arbitrary { bits: 128 },
            ..RenderRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[cfg(not(feature = "mpfr"))]
    #[test]
    fn arbitrary_precision_needs_the_feature() {
        let request = RenderRequest {
            precision: Precision::Arbitrary { bits: 128 },
            ..RenderRequest::default()
        };
        assert_eq!(request.validate(), Err(ConfigError::ArbitraryPrecisionUnavailable));
    }
}
