//! Offscreen backend rendering into heap buffers.

use crate::backend::{Backend, Rect};
use crate::depth::Depth;
use crate::math::vec2::Vec2i;
use crate::pixel::Pixel;

/// A backend with no display: frames stay in memory.
///
/// Useful for tests, headless rendering, and saving frames to disk. The
/// buffers can be inspected after `render_frame` through [`MemoryBackend::color`]
/// and [`MemoryBackend::depth`].
pub struct MemoryBackend {
    size: Vec2i,
    color: Vec<Pixel>,
    depth: Vec<Depth>,
}

impl MemoryBackend {
    pub fn new(size: Vec2i) -> Self {
        let mut backend = Self {
            size: Vec2i::ZERO,
            color: Vec::new(),
            depth: Vec::new(),
        };
        backend.init(Rect::with_size(size));
        backend
    }

    /// The color buffer of the last rendered frame, row-major.
    pub fn color(&self) -> &[Pixel] {
        &self.color
    }

    /// The depth buffer of the last rendered frame, row-major.
    pub fn depth(&self) -> &[Depth] {
        &self.depth
    }
}

impl Backend for MemoryBackend {
    fn init(&mut self, viewport: Rect) {
        self.size = viewport.size();
        self.color = vec![Pixel::BLACK; self.size.area()];
        self.depth = vec![Depth::FAR; self.size.area()];
    }

    fn before_render(&mut self) {}

    fn after_render(&mut self) {}

    fn size(&self) -> Vec2i {
        self.size
    }

    fn buffers(&mut self) -> (&mut [Pixel], &mut [Depth]) {
        (&mut self.color, &mut self.depth)
    }
}
