//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a bounds-checked view into the color and depth buffers a backend
//! lends out for one frame. The view is borrowed, not owning: the backend
//! keeps ownership, the core writes through it between `before_render` and
//! `after_render`.

use crate::depth::{self, Depth};
use crate::math::vec2::Vec2i;
use crate::pixel::Pixel;

/// A borrowed view into one frame's color and depth buffers.
///
/// Both buffers are row-major with stride = width, addressed by
/// `x + y * width`. The depth buffer uses the inverted `1 - depth`
/// convention (larger = nearer); see [`crate::depth`].
pub struct FrameBuffer<'a> {
    color: &'a mut [Pixel],
    depth: &'a mut [Depth],
    size: Vec2i,
}

impl<'a> FrameBuffer<'a> {
    /// Creates a view from buffer slices and dimensions.
    ///
    /// # Panics
    /// Debug-asserts that buffer lengths match `width * height`.
    pub fn new(color: &'a mut [Pixel], depth: &'a mut [Depth], size: Vec2i) -> Self {
        debug_assert_eq!(
            color.len(),
            size.area(),
            "color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth.len(),
            size.area(),
            "depth buffer size doesn't match dimensions"
        );
        Self { color, depth, size }
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

    #[inline]
    fn index(&self, pos: Vec2i) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.size.x || pos.y < 0 || pos.y >= self.size.y {
            return None;
        }
        Some((pos.x + pos.y * self.size.x) as usize)
    }

    /// Writes a color without touching depth (sprites, images, overlays).
    /// Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, pos: Vec2i, color: Pixel) {
        if let Some(idx) = self.index(pos) {
            self.color[idx] = color;
        }
    }

    /// Reads the color at a position, or `None` when out of bounds.
    #[inline]
    pub fn get_pixel(&self, pos: Vec2i) -> Option<Pixel> {
        self.index(pos).map(|idx| self.color[idx])
    }

    /// Returns true if `inverted_depth` at the linear index `idx` is strictly
    /// nearer than the stored value.
    #[inline]
    pub fn depth_test(&self, idx: usize, inverted_depth: f32) -> bool {
        depth::check(self.depth, idx, inverted_depth)
    }

    /// Stores `inverted_depth` at the linear index `idx`.
    #[inline]
    pub fn write_depth(&mut self, idx: usize, inverted_depth: f32) {
        depth::write(self.depth, idx, inverted_depth);
    }

    /// Writes a color at a linear index that already passed the depth test.
    #[inline]
    pub fn write_color(&mut self, idx: usize, color: Pixel) {
        self.color[idx] = color;
    }

    /// Fills the color buffer and resets every depth cell to infinitely far.
    pub fn clear(&mut self, color: Pixel) {
        self.color.fill(color);
        depth::clear(self.depth);
    }
}
