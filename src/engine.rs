// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render entry point.
//!
//! Picks the numeric backend, parses the center and zoom in it, and
//! runs the selected algorithm.  Everything below this point is
//! generic over [`Real`], so both backends share one implementation
//! of every algorithm.

use log::{debug, info};

use crate::complex::Complex;
use crate::config::{Algorithm, Precision, RenderConfig};
use crate::error::ConfigError;
use crate::orbit::Orbiter;
use crate::planes::PlaneMapper;
use crate::raster::Image;
use crate::real::Real;
use crate::{density, escape, trap};

/// Render `config` into a fresh image.
pub fn render(config: &RenderConfig) -> Result<Image, ConfigError> {
    info!(
        "rendering {} (parameter {}) with {} at {}x{}, {} precision, {} thread(s)",
        config.formula,
        config.parameter,
        config.algorithm.name(),
        config.width,
        config.height,
        config.precision,
        config.threads
    );
    match config.precision {
        Precision::Double => render_with::<f64>(config, ()),
        #[cfg(feature = "mpfr")]
        Precision::Arbitrary { bits } => {
            render_with::<rug::Float>(config, crate::real::check_precision(bits)?)
        }
        #[cfg(not(feature = "mpfr"))]
        Precision::Arbitrary { .. } => Err(ConfigError::ArbitraryPrecisionUnavailable),
    }
}

/// Render `config` with the backend `R`, built with `context`.
pub fn render_with<R: Real>(
    config: &RenderConfig,
    context: R::Context,
) -> Result<Image, ConfigError> {
    let center = Complex::new(
        R::parse(&config.center.0, context)?,
        R::parse(&config.center.1, context)?,
    );
    let zoom = R::parse(&config.zoom, context)?;
    let plane = PlaneMapper::new(config.width, config.height, center, zoom)?;
    let constant: Complex<R> = Complex::unit(config.parameter, context);
    let mut image = Image::new(config.width, config.height);
    let threads = config.threads;

    let (bailout_radius, max_iterations) = config.algorithm.limits();
    let orbiter = Orbiter::new(config.formula, constant, bailout_radius, max_iterations);
    match &config.algorithm {
        Algorithm::Escape(params) => {
            escape::draw(&mut image, &plane, &orbiter, params, &config.coloring, threads)
        }
        Algorithm::Trap(params, shape) => {
            trap::draw(&mut image, &plane, &orbiter, params, *shape, &config.coloring, threads)
        }
        Algorithm::Density(params) => {
            density::draw(&mut image, &plane, &orbiter, params, &config.coloring, threads)
        }
    }
    debug!("render finished");
    Ok(image)
}
