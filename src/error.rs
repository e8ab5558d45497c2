// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Setup errors.  Every one of these is raised before any pixel is
//! computed; once a render has started it always runs to completion.

/// A render configuration that cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The fractal name is not in the formula registry.
    #[error("unknown formula: {0}")]
    UnknownFormula(String),

    /// The trap index does not name one of the trap shapes.
    #[error("unknown trap index {index} (expected 0..{count})")]
    UnknownTrap {
        /// The requested index.
        index: usize,
        /// How many traps exist.
        count: usize,
    },

    /// More than one of escape, trap and density was selected.
    #[error("you can use only one algorithm at a time")]
    ConflictingAlgorithms,

    /// More than one of linear, periodic and solid was selected.
    #[error("you can use only one coloring at a time")]
    ConflictingColorings,

    /// The bailout radius is zero, negative or not finite.
    #[error("bailout radius must be positive, got {0}")]
    InvalidBailout(f64),

    /// The iteration limit is zero.
    #[error("maximum iterations must be greater than zero")]
    ZeroIterations,

    /// A decimal number could not be parsed in the selected precision.
    #[error("could not parse {text:?} as a number")]
    InvalidNumber {
        /// The rejected text.
        text: String,
    },

    /// The zoom factor is zero or negative.
    #[error("zoom must be positive, got {0}")]
    InvalidZoom(String),

    /// The image has no pixels.
    #[error("resolution must be at least 1x1, got {width}x{height}")]
    InvalidResolution {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// No worker threads were requested.
    #[error("thread count must be at least one")]
    ZeroThreads,

    /// The arbitrary-precision bit width is outside the supported range.
    #[error("precision of {bits} bits is outside {min}..={max}")]
    InvalidPrecision {
        /// Requested width in bits.
        bits: u32,
        /// Smallest supported width.
        min: u32,
        /// Largest supported width.
        max: u32,
    },

    /// Arbitrary precision was requested from a build without the `mpfr` feature.
    #[error("arbitrary precision support was not compiled in")]
    ArbitraryPrecisionUnavailable,
}
