// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Density rendering, better known as the Buddhabrot.
//!
//! Instead of asking where a pixel's point goes, this asks where the
//! escaping orbits spend their time.  Random samples are drawn from
//! a fixed window around the origin, each one is iterated, and every
//! point of every orbit that eventually escapes bumps the counter of
//! the pixel it lands on.  The image is the histogram, normalized by
//! its largest count.
//!
//! Samples come in blocks of [`SAMPLE_BLOCK`], and block `b` always
//! draws from a generator seeded by the render seed and `b`.  Workers
//! take whole blocks, so the histogram depends on the seed and the
//! sample count but never on the number of threads.

use log::debug;
use num::Complex as Complex64;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::coloring::Coloring;
use crate::complex::Complex;
use crate::error::ConfigError;
use crate::orbit::{check_limits, Orbiter};
use crate::parallel::{accumulate, paint_rows};
use crate::planes::{Pixel, PlaneMapper};
use crate::raster::Image;
use crate::real::Real;

/// Samples drawn from one generator.
pub const SAMPLE_BLOCK: u64 = 4096;

/// Half-width of the sampling window along the real axis.
pub const SAMPLE_RE: f64 = 3.9;

/// Half-height of the sampling window along the imaginary axis.
pub const SAMPLE_IM: f64 = 2.5;

/// Density parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Density {
    /// An orbit counts once its modulus exceeds this.
    pub bailout_radius: f64,
    /// Orbits still inside after this many steps are dropped.
    pub max_iterations: usize,
    /// How many points to sample.
    pub samples: u64,
    /// Seed for the sampler.
    pub seed: u64,
    /// Accepted for symmetry with [`crate::escape::Escape`]; a visit
    /// count has no continuous correction.
    pub enable_smooth: bool,
}

impl Default for Density {
    fn default() -> Self {
        Density {
            bailout_radius: 10.0,
            max_iterations: 80,
            samples: 10_000_000,
            seed: 1,
            enable_smooth: true,
        }
    }
}

impl Density {
    /// Check the limits.  Zero samples is allowed and renders nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_limits(self.bailout_radius, self.max_iterations)
    }
}

/// Uniform points from the sampling window.
pub struct Sampler {
    re: Uniform<f64>,
    im: Uniform<f64>,
    rng: StdRng,
}

impl Sampler {
    /// The generator for block `block` of a render seeded with `seed`.
    pub fn for_block(seed: u64, block: u64) -> Self {
        let seed = seed ^ block.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Sampler {
            re: Uniform::new(-SAMPLE_RE, SAMPLE_RE),
            im: Uniform::new(-SAMPLE_IM, SAMPLE_IM),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The next sample.
    pub fn get(&mut self) -> Complex64<f64> {
        let re = self.re.sample(&mut self.rng);
        let im = self.im.sample(&mut self.rng);
        Complex64::new(re, im)
    }
}

/// Visit counts per pixel, summed over all workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
    escaped: u64,
}

impl Histogram {
    /// Visit count per pixel, row-major.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// How many samples escaped and so contributed their orbit.
    pub fn escaped(&self) -> u64 {
        self.escaped
    }

    /// The largest count, zero for an empty histogram.
    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

fn blocks(samples: u64) -> u64 {
    samples / SAMPLE_BLOCK + u64::from(samples % SAMPLE_BLOCK != 0)
}

/// Add the escaping orbits of block `block` to `histogram`.  Returns
/// the number of escaping samples.
fn plot_block<R: Real>(
    plane: &PlaneMapper<R>,
    orbiter: &Orbiter<R>,
    params: &Density,
    block: u64,
    histogram: &mut [u64],
) -> u64 {
    let start = block * SAMPLE_BLOCK;
    let count = SAMPLE_BLOCK.min(params.samples - start);
    let context = plane.context();
    let mut sampler = Sampler::for_block(params.seed, block);
    let mut escaped = 0;
    for _ in 0..count {
        let sample = sampler.get();
        let (outcome, orbit) = orbiter.trace(Complex::from_f64(sample.re, sample.im, context));
        if !outcome.escaped {
            continue;
        }
        escaped += 1;
        for point in &orbit {
            if let Some(offset) = plane.point_to_offset(point) {
                histogram[offset] += 1;
            }
        }
    }
    escaped
}

/// Sample, iterate and count, on `threads` workers each owning a
/// private histogram.
pub fn histogram<R: Real>(
    plane: &PlaneMapper<R>,
    orbiter: &Orbiter<R>,
    params: &Density,
    threads: usize,
) -> Histogram {
    let jobs = blocks(params.samples);
    let (counts, escaped) = accumulate(plane.len(), threads, jobs, |block, region| {
        plot_block(plane, orbiter, params, block, region)
    });
    Histogram { counts, escaped }
}

/// Render `image` from `histogram`.  Linear and periodic colorings
/// paint every pixel with `count / max`; solid paints the visited
/// pixels.  An empty histogram leaves the image untouched.
pub fn paint(image: &mut Image, histogram: &Histogram, coloring: &Coloring, threads: usize) {
    let max = histogram.max();
    if max == 0 {
        return;
    }
    let width = image.width();
    let counts = histogram.counts();
    paint_rows(image, threads, |Pixel(x, y)| {
        let count = counts[y * width + x];
        let v = count as f64 / max as f64;
        match coloring {
            Coloring::Linear(linear) => Some(linear.color(v)),
            Coloring::Periodic(periodic) => Some(periodic.color(v)),
            Coloring::Solid(solid) if count > 0 => Some(solid.color),
            Coloring::Solid(_) => None,
        }
    });
}

/// Render `image` with the density algorithm.
pub fn draw<R: Real>(
    image: &mut Image,
    plane: &PlaneMapper<R>,
    orbiter: &Orbiter<R>,
    params: &Density,
    coloring: &Coloring,
    threads: usize,
) {
    let histogram = histogram(plane, orbiter, params, threads);
    debug!(
        "density: {} of {} samples escaped, {} visits, busiest pixel {}",
        histogram.escaped(),
        params.samples,
        histogram.total(),
        histogram.max()
    );
    paint(image, &histogram, coloring, threads);
}
