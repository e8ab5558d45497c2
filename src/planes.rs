// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window onto the complex plane given by a center and a zoom.
//!
//! At zoom 1 the window is three units tall, and its width follows
//! the aspect ratio of the image.  The imaginary part grows with the
//! row index, and the center's imaginary part enters negated.

use crate::complex::Complex;
use crate::error::ConfigError;
use crate::real::Real;

/// Describes the x, y of a point in a region: the column first, then
/// the row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels to points of the complex plane and back.
#[derive(Clone, Debug)]
pub struct PlaneMapper<R> {
    center: Complex<R>,
    zoom: R,
    width: usize,
    height: usize,
}

impl<R: Real> PlaneMapper<R> {
    /// Constructor.  Takes the size of the integral plane, the point
    /// of the complex plane that lands in the middle of it, and the
    /// magnification.
    pub fn new(
        width: usize,
        height: usize,
        center: Complex<R>,
        zoom: R,
    ) -> Result<PlaneMapper<R>, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidResolution { width, height });
        }
        if !(zoom > R::from_f64(0.0, zoom.context())) {
            return Err(ConfigError::InvalidZoom(format!("{:?}", zoom)));
        }
        Ok(PlaneMapper {
            center,
            zoom,
            width,
            height,
        })
    }

    /// Width of the integral plane.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the integral plane.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Never true; an empty plane is rejected by the constructor.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The precision the plane was built with.
    pub fn context(&self) -> R::Context {
        self.center.context()
    }

    /// Given a pixel on the integral cartesian plane, map its center
    /// to a point on the complex cartesian plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<R> {
        let context = self.context();
        let (w, h) = (self.width as f64, self.height as f64);
        let (column, row) = (pixel.0 as f64, pixel.1 as f64);
        let height = R::from_f64(h, context);
        let re = self.center.re.clone()
            + R::from_f64(3.0 * (column + 0.5) - 1.5 * w, context) / self.zoom.clone()
                / height.clone();
        let im = -self.center.im.clone()
            + R::from_f64(3.0 * (row + 0.5) - 1.5 * h, context) / self.zoom.clone() / height;
        Complex::new(re, im)
    }

    /// Given a point on the complex plane, find the nearest pixel, or
    /// `None` if it lands outside the integral plane.
    pub fn point_to_pixel(&self, point: &Complex<R>) -> Option<Pixel> {
        let context = self.context();
        let (w, h) = (self.width as f64, self.height as f64);
        let scale = R::from_f64(h, context) * self.zoom.clone();
        let row = ((point.im.clone() + self.center.im.clone()) * scale.clone()).to_f64();
        let column = ((point.re.clone() - self.center.re.clone()) * scale).to_f64();
        let row = ((row + 1.5 * h) / 3.0 - 0.5).round();
        let column = ((column + 1.5 * w) / 3.0 - 0.5).round();
        // NaN fails both comparisons and is dropped with the rest.
        if !(row >= 0.0 && row < h && column >= 0.0 && column < w) {
            return None;
        }
        Some(Pixel(column as usize, row as usize))
    }

    /// Since the Buddhabrot actually tracks the progress of a complex
    /// number as it orbits, we have to map those complex numbers back
    /// to the pixel plane, and then increment those points on the
    /// pixel plane as the orbit passes through them.  This function
    /// takes a point, maps it to pixel coordinates, then returns the
    /// linear offset from the root of the image buffer in memory.
    pub fn point_to_offset(&self, point: &Complex<R>) -> Option<usize> {
        self.point_to_pixel(point)
            .map(|Pixel(column, row)| row * self.width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(width: usize, height: usize) -> PlaneMapper<f64> {
        PlaneMapper::new(width, height, Complex::new(-0.75, 0.0), 1.1).unwrap()
    }

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let center = Complex::new(0.0, 0.0);
        assert_eq!(
            PlaneMapper::new(0, 4, center.clone(), 1.0).unwrap_err(),
            ConfigError::InvalidResolution { width: 0, height: 4 }
        );
        assert!(PlaneMapper::new(4, 4, center.clone(), 0.0).is_err());
        assert!(PlaneMapper::new(4, 4, center.clone(), -2.0).is_err());
        assert!(PlaneMapper::new(4, 4, center, f64::NAN).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = plane(4, 3);
        assert_eq!(pm.len(), 12);
        assert!(!pm.is_empty());
    }

    #[test]
    fn pixel_to_point_matches_the_closed_form() {
        let pm = plane(4, 4);
        let corner = pm.pixel_to_point(&Pixel(0, 0));
        assert_eq!(corner.re, -0.75 + (1.5 - 6.0) / 1.1 / 4.0);
        assert_eq!(corner.im, -0.0 + (1.5 - 6.0) / 1.1 / 4.0);
        let last = pm.pixel_to_point(&Pixel(3, 3));
        assert_eq!(last.re, -0.75 + (10.5 - 6.0) / 1.1 / 4.0);
        assert_eq!(last.im, (10.5 - 6.0) / 1.1 / 4.0);
    }

    #[test]
    fn rows_run_down_the_imaginary_axis() {
        let pm = PlaneMapper::new(8, 8, Complex::new(0.0, 0.5), 1.0).unwrap();
        let top = pm.pixel_to_point(&Pixel(0, 0));
        let bottom = pm.pixel_to_point(&Pixel(0, 7));
        assert!(top.im < bottom.im);
        // The center's imaginary part is negated on the way in.
        let middle = pm.pixel_to_point(&Pixel(4, 4));
        assert!((middle.im - (-0.5 + 1.5 / 8.0)).abs() < 1e-12);
    }

    #[test]
    fn the_center_pixel_lies_within_a_pixel_of_the_center() {
        for (width, height) in [(4, 4), (640, 480), (1920, 1080), (7, 3)].iter() {
            let pm = plane(*width, *height);
            let point = pm.pixel_to_point(&Pixel(width / 2, height / 2));
            let pixel_width = 3.0 / 1.1 / (*height as f64);
            assert!((point.re - -0.75).abs() <= pixel_width);
            assert!(point.im.abs() <= pixel_width);
        }
    }

    #[test]
    fn every_pixel_round_trips() {
        let pm = plane(16, 9);
        for row in 0..9 {
            for column in 0..16 {
                let pixel = Pixel(column, row);
                let point = pm.pixel_to_point(&pixel);
                assert_eq!(pm.point_to_pixel(&point), Some(pixel));
                assert_eq!(pm.point_to_offset(&point), Some(row * 16 + column));
            }
        }
    }

    #[test]
    fn points_outside_are_dropped() {
        let pm = plane(16, 9);
        assert_eq!(pm.point_to_offset(&Complex::new(10.0, 0.0)), None);
        assert_eq!(pm.point_to_offset(&Complex::new(-0.75, 5.0)), None);
        assert_eq!(pm.point_to_offset(&Complex::new(f64::NAN, 0.0)), None);
        assert!(pm.point_to_offset(&Complex::new(-0.75, 0.0)).is_some());
    }

    #[cfg(feature = "mpfr")]
    #[test]
    fn mpfr_plane_agrees_with_double() {
        let center = Complex::<rug::Float>::from_f64(-0.75, 0.0, 128);
        let pm = PlaneMapper::new(16, 9, center, <rug::Float as Real>::from_f64(1.1, 128)).unwrap();
        let reference = plane(16, 9);
        for row in 0..9 {
            for column in 0..16 {
                let pixel = Pixel(column, row);
                let a = pm.pixel_to_point(&pixel).to_f64();
                let b = reference.pixel_to_point(&pixel);
                assert!((a.re - b.re).abs() < 1e-12);
                assert!((a.im - b.im).abs() < 1e-12);
            }
        }
    }
}
