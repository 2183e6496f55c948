//! The display backend capability contract.
//!
//! A backend owns the color and depth buffers and knows how to present them
//! (framebuffer device, window, terminal, offscreen memory). The core never
//! allocates or frees backend buffers; it borrows them for the rasterization
//! window of one frame and calls the hook points around it.

use crate::depth::Depth;
use crate::framebuffer::FrameBuffer;
use crate::math::vec2::Vec2i;
use crate::pixel::Pixel;

/// A viewport rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn with_size(size: Vec2i) -> Self {
        Self::new(0, 0, size.x, size.y)
    }

    pub const fn size(&self) -> Vec2i {
        Vec2i::new(self.width, self.height)
    }
}

/// Optional override for the core's final pixel write.
///
/// Receives the frame view, the pixel position, the sampled color, and the
/// face illumination in [0, 1]. The default behavior it replaces is
/// `color.mul(illumination)` written straight into the framebuffer; a backend
/// can substitute its own blend (custom gamma, palette mapping, ...).
pub type PixelHook = fn(&mut FrameBuffer, Vec2i, Pixel, f32);

/// Capabilities every display backend provides to the renderer.
pub trait Backend {
    /// Called once at setup and again whenever the viewport changes; the
    /// backend (re)allocates or remaps its buffers here.
    fn init(&mut self, viewport: Rect);

    /// Invoked before each frame's rasterization; a good place to poll
    /// events or wait for vsync.
    fn before_render(&mut self);

    /// Invoked after rasterization; responsible for presenting the frame
    /// (copy to device, blit to window, flush).
    fn after_render(&mut self);

    /// Current buffer dimensions.
    fn size(&self) -> Vec2i;

    /// Both per-pixel buffers for the current frame.
    ///
    /// Each must hold exactly `width * height` cells and stay valid until
    /// the next `after_render`.
    fn buffers(&mut self) -> (&mut [Pixel], &mut [Depth]);

    /// Optional override of the default blend-and-write.
    fn pixel_hook(&self) -> Option<PixelHook> {
        None
    }
}
