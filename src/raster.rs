// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The packed RGB output buffer.

use std::slice::ChunksMut;

use crate::coloring::Rgb;
use crate::planes::Pixel;

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// A row-major RGB raster, three bytes per pixel, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Image {
    /// A black image.
    pub fn new(width: usize, height: usize) -> Self {
        Image {
            data: vec![0; CHANNELS * width * height],
            width,
            height,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Hand the raw bytes over to an encoder.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, pixel: Pixel) -> usize {
        CHANNELS * (pixel.1 * self.width + pixel.0)
    }

    /// The color at `pixel`.  Panics if the pixel is outside the image.
    pub fn pixel(&self, pixel: Pixel) -> Rgb {
        let offset = self.offset(pixel);
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ]
    }

    /// Paint `pixel`.  Panics if the pixel is outside the image.
    pub fn set_pixel(&mut self, pixel: Pixel, color: Rgb) {
        let offset = self.offset(pixel);
        self.data[offset..offset + CHANNELS].copy_from_slice(&color);
    }

    /// The rows, top to bottom, as disjoint mutable slices.
    pub fn rows_mut(&mut self) -> ChunksMut<u8> {
        self.data.chunks_mut(CHANNELS * self.width)
    }
}
