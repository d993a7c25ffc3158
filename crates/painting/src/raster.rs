//! CPU raster storage and point-in-time snapshots

use image::RgbaImage;

use crate::types::Rgba;

/// An owned 8-bit RGBA pixel grid
///
/// `pixels.len() == width * height` always holds; storage is never shared
/// with another buffer or snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    /// Pixel data in row-major order
    pixels: Vec<Rgba>,
}

impl RasterBuffer {
    /// Create a buffer with every pixel set to `fill`
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![fill; pixel_count],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the whole buffer with a solid color
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get a pixel, `None` if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Set a pixel; out-of-bounds writes are dropped
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Raw bytes, 4 per pixel
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Copy the current contents into an immutable snapshot
    pub fn capture(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone().into_boxed_slice(),
        }
    }

    /// Make the buffer show `snapshot`
    ///
    /// A snapshot of the same size replaces the contents outright. One taken
    /// at another size is pasted at the origin over a `background` fill.
    pub fn restore(&mut self, snapshot: &Snapshot, background: Rgba) {
        if snapshot.width == self.width && snapshot.height == self.height {
            self.pixels.copy_from_slice(&snapshot.pixels);
            return;
        }
        self.fill(background);
        self.copy_top_left(&snapshot.pixels, snapshot.width, snapshot.height);
    }

    /// Copy the overlap of another buffer at the origin, without scaling
    pub fn copy_from(&mut self, other: &RasterBuffer) {
        self.copy_top_left(&other.pixels, other.width, other.height);
    }

    fn copy_top_left(&mut self, src: &[Rgba], src_width: u32, src_height: u32) {
        let columns = self.width.min(src_width) as usize;
        let rows = self.height.min(src_height) as usize;
        for row in 0..rows {
            let src_start = row * src_width as usize;
            let dst_start = row * self.width as usize;
            self.pixels[dst_start..dst_start + columns]
                .copy_from_slice(&src[src_start..src_start + columns]);
        }
    }

    /// Copy into an `image` buffer for encoding
    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
    }
}

/// An immutable copy of a raster at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Box<[Rgba]>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }
}
