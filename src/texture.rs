//! Owned 2D pixel grids.
//!
//! A [`Texture`] serves two roles: a read-only sampling source for textured
//! objects, and a blittable image leaf in the scene graph. Pixels are stored
//! row-major, addressed by `x + y * width`.

use std::fmt;
use std::path::Path;

use crate::math::vec2::{Vec2, Vec2i};
use crate::pixel::Pixel;

/// Errors detected when constructing a texture.
///
/// A texture that fails to construct must not be rendered; all variants are
/// reported eagerly rather than surfacing as garbage sampling later.
#[derive(Debug)]
pub enum TextureError {
    /// Width or height was zero or negative.
    ZeroSize(Vec2i),
    /// The pixel buffer length does not match `width * height`.
    BufferSizeMismatch { expected: usize, actual: usize },
    /// The backing image file could not be decoded.
    Decode(image::ImageError),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ZeroSize(size) => {
                write!(f, "texture size {}x{} is empty", size.x, size.y)
            }
            TextureError::BufferSizeMismatch { expected, actual } => {
                write!(f, "pixel buffer holds {actual} pixels, expected {expected}")
            }
            TextureError::Decode(e) => write!(f, "failed to decode image: {e}"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Decode(e)
    }
}

/// An owned grid of pixels with a fixed size.
#[derive(Clone, Debug)]
pub struct Texture {
    size: Vec2i,
    pixels: Vec<Pixel>,
}

impl Texture {
    /// Creates a texture from an existing pixel buffer.
    ///
    /// Fails if the size is degenerate or the buffer length does not match.
    pub fn new(size: Vec2i, pixels: Vec<Pixel>) -> Result<Self, TextureError> {
        if size.area() == 0 {
            return Err(TextureError::ZeroSize(size));
        }
        if pixels.len() != size.area() {
            return Err(TextureError::BufferSizeMismatch {
                expected: size.area(),
                actual: pixels.len(),
            });
        }
        Ok(Self { size, pixels })
    }

    /// Creates a texture filled with a single color.
    pub fn solid(size: Vec2i, color: Pixel) -> Result<Self, TextureError> {
        if size.area() == 0 {
            return Err(TextureError::ZeroSize(size));
        }
        Ok(Self {
            size,
            pixels: vec![color; size.area()],
        })
    }

    /// Loads a texture from an image file (PNG, JPG, etc.), converting into
    /// the active pixel format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let pixels: Vec<Pixel> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Pixel::from_rgba(r, g, b, a)
            })
            .collect();

        Self::new(Vec2i::new(width as i32, height as i32), pixels)
    }

    pub fn size(&self) -> Vec2i {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Raw pixel storage, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Reads the pixel at an integer position, or `None` if out of bounds.
    #[inline]
    pub fn read(&self, pos: Vec2i) -> Option<Pixel> {
        if pos.x < 0 || pos.x >= self.size.x || pos.y < 0 || pos.y >= self.size.y {
            return None;
        }
        Some(self.pixels[(pos.x + pos.y * self.size.x) as usize])
    }

    /// Writes a pixel at an integer position. Out-of-bounds writes are ignored.
    #[inline]
    pub fn draw(&mut self, pos: Vec2i, color: Pixel) {
        if pos.x < 0 || pos.x >= self.size.x || pos.y < 0 || pos.y >= self.size.y {
            return;
        }
        self.pixels[(pos.x + pos.y * self.size.x) as usize] = color;
    }

    /// Samples the texture at normalized coordinates, wrapping via Euclidean
    /// modulo so any coordinate lands inside the grid.
    #[inline]
    pub fn sample(&self, pos: Vec2) -> Pixel {
        let x = ((pos.x * self.size.x as f32) as i64).rem_euclid(self.size.x as i64);
        let y = ((pos.y * self.size.y as f32) as i64).rem_euclid(self.size.y as i64);
        self.pixels[(x + y * self.size.x as i64) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: white at (0,0) and (1,1), black elsewhere.
        Texture::new(
            Vec2i::new(2, 2),
            vec![Pixel::WHITE, Pixel::BLACK, Pixel::BLACK, Pixel::WHITE],
        )
        .unwrap()
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Texture::new(Vec2i::new(0, 4), vec![]),
            Err(TextureError::ZeroSize(_))
        ));
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let err = Texture::new(Vec2i::new(2, 2), vec![Pixel::BLACK; 3]);
        assert!(matches!(
            err,
            Err(TextureError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn sampling_wraps_out_of_range_coordinates() {
        let tex = checker();
        assert_eq!(tex.sample(Vec2::new(0.0, 0.0)), Pixel::WHITE);
        assert_eq!(tex.sample(Vec2::new(0.5, 0.0)), Pixel::BLACK);
        // One full wrap in both directions lands on the same texels.
        assert_eq!(tex.sample(Vec2::new(1.0, 1.0)), Pixel::WHITE);
        assert_eq!(tex.sample(Vec2::new(-0.5, 0.0)), Pixel::BLACK);
    }

    #[test]
    fn read_out_of_bounds_is_none() {
        let tex = checker();
        assert!(tex.read(Vec2i::new(2, 0)).is_none());
        assert!(tex.read(Vec2i::new(-1, 0)).is_none());
        assert_eq!(tex.read(Vec2i::new(1, 1)), Some(Pixel::WHITE));
    }

    #[test]
    fn draw_out_of_bounds_is_ignored() {
        let mut tex = checker();
        tex.draw(Vec2i::new(5, 5), Pixel::WHITE);
        tex.draw(Vec2i::new(0, 1), Pixel::WHITE);
        assert_eq!(tex.read(Vec2i::new(0, 1)), Some(Pixel::WHITE));
    }
}
