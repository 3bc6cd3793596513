//! In-memory RGB raster type shared by the rendering pipeline.

/// A single RGB pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A rectangular grid of RGB pixels, row-major, 3 bytes per pixel.
///
/// Rasters are immutable once built; every pipeline stage that changes
/// pixel data produces a new raster. Zero-sized rasters are valid and
/// render to empty output.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Raster {
    /// Build a raster from raw RGB bytes.
    ///
    /// `data` must hold exactly `width * height` RGB triples.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// Build a raster filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGB bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read the pixel at (x, y). Coordinates must be in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let idx = ((y * self.width + x) * 3) as usize;
        Rgb {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
        }
    }

    /// Resample to a new pixel size by averaging each destination cell's
    /// source area. Upscaling degenerates to nearest-pixel sampling since
    /// every destination cell covers at least one source pixel.
    pub fn resize(&self, new_width: u32, new_height: u32) -> Raster {
        if new_width == 0 || new_height == 0 || self.is_empty() {
            return Raster::new(Vec::new(), 0, 0);
        }

        let cell_w = self.width as f32 / new_width as f32;
        let cell_h = self.height as f32 / new_height as f32;

        let mut data = Vec::with_capacity((new_width * new_height * 3) as usize);

        for cy in 0..new_height {
            for cx in 0..new_width {
                let start_x = (cx as f32 * cell_w) as u32;
                let start_y = (cy as f32 * cell_h) as u32;
                // Each cell covers at least one pixel and never leaves the raster
                let end_x = (((cx + 1) as f32 * cell_w).ceil() as u32)
                    .clamp(start_x + 1, self.width.max(start_x + 1));
                let end_y = (((cy + 1) as f32 * cell_h).ceil() as u32)
                    .clamp(start_y + 1, self.height.max(start_y + 1));
                let start_x = start_x.min(self.width - 1);
                let start_y = start_y.min(self.height - 1);

                let mut sum_r = 0u32;
                let mut sum_g = 0u32;
                let mut sum_b = 0u32;
                let mut count = 0u32;

                for py in start_y..end_y.min(self.height) {
                    for px in start_x..end_x.min(self.width) {
                        let p = self.pixel(px, py);
                        sum_r += p.r as u32;
                        sum_g += p.g as u32;
                        sum_b += p.b as u32;
                        count += 1;
                    }
                }

                if count == 0 {
                    data.extend_from_slice(&[0, 0, 0]);
                } else {
                    data.extend_from_slice(&[
                        (sum_r / count) as u8,
                        (sum_g / count) as u8,
                        (sum_b / count) as u8,
                    ]);
                }
            }
        }

        Raster::new(data, new_width, new_height)
    }
}
