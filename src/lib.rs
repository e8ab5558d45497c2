#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fractal renderer
//!
//! Takes a point on the complex plane and repeatedly feeds it through
//! one of a handful of formulas, the Mandelbrot set's `z² + c` being
//! the best known, watching how quickly it runs off to infinity.
//! There are three ways to turn that into a picture:
//!
//! * escape-time colors each pixel by how many steps its point lasts;
//! * orbit traps color each pixel by how close its orbit comes to a
//!   fixed shape, such as the axes or the unit circle;
//! * density (the Buddhabrot) throws random points at the plane and
//!   counts how often the orbits of the escaping ones pass through
//!   each pixel.
//!
//! The arithmetic is generic over [`real::Real`], so every algorithm
//! runs either on `f64` or, with the default `mpfr` feature, on MPFR
//! floats of any width for zooms deeper than a double can resolve.
//!
//! ```no_run
//! use fractal::{render, RenderRequest};
//!
//! let config = RenderRequest::default().validate()?;
//! let pixels = render(&config)?.into_raw();
//! # Ok::<(), fractal::ConfigError>(())
//! ```

pub mod coloring;
pub mod complex;
pub mod config;
pub mod density;
pub mod engine;
pub mod error;
pub mod escape;
pub mod formula;
pub mod orbit;
pub mod parallel;
pub mod planes;
pub mod raster;
pub mod real;
pub mod trap;

pub use crate::coloring::{Coloring, Linear, Periodic, Rgb, Solid};
pub use crate::config::{Algorithm, Fractal, Precision, RenderConfig, RenderRequest};
pub use crate::density::Density;
pub use crate::engine::render;
pub use crate::error::ConfigError;
pub use crate::escape::Escape;
pub use crate::formula::{Formula, Trap};
pub use crate::planes::{Pixel, PlaneMapper};
pub use crate::raster::Image;
pub use crate::trap::TrapParams;
