//! SDL2 windowed backend.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::backend::{Backend, Rect};
use crate::depth::Depth;
use crate::math::vec2::Vec2i;
use crate::pixel::Pixel;

// The streaming texture is updated with the raw color buffer, so the pixel
// layout must be the default 32-bit BGRA (little-endian ARGB8888).
#[cfg(any(
    feature = "pixel-gray",
    feature = "pixel-rgb565",
    feature = "pixel-rgb888",
    feature = "pixel-rgba8888"
))]
compile_error!("the sdl backend requires the default BGRA pixel format");

/// A backend presenting frames into an SDL2 window.
///
/// Rendering happens into heap buffers like [`MemoryBackend`]; `after_render`
/// uploads the color buffer to a streaming texture and presents it. Events
/// are polled in `before_render`; window close or Escape sets
/// [`SdlBackend::should_close`].
///
/// [`MemoryBackend`]: crate::backends::MemoryBackend
pub struct SdlBackend {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    texture: sdl2::render::Texture<'static>,
    event_pump: sdl2::EventPump,
    size: Vec2i,
    color: Vec<Pixel>,
    depth: Vec<Depth>,
    should_close: bool,
}

impl SdlBackend {
    pub fn new(title: &str, size: Vec2i) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, size.x as u32, size.y as u32)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as the
        // backend; field order drops the texture before its creator.
        let creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, size.x as u32, size.y as u32)
            .map_err(|e| e.to_string())?;

        let mut backend = Self {
            canvas,
            texture_creator,
            texture,
            event_pump,
            size: Vec2i::ZERO,
            color: Vec::new(),
            depth: Vec::new(),
            should_close: false,
        };
        backend.init(Rect::with_size(size));
        Ok(backend)
    }

    /// True once the user closed the window or pressed Escape.
    pub fn should_close(&self) -> bool {
        self.should_close
    }
}

impl Backend for SdlBackend {
    fn init(&mut self, viewport: Rect) {
        self.size = viewport.size();
        self.color = vec![Pixel::BLACK; self.size.area()];
        self.depth = vec![Depth::FAR; self.size.area()];

        // The streaming texture must track the viewport, or `update` in
        // `after_render` gets a slice and pitch sized for a different
        // geometry. Recreate it whenever the dimensions change.
        let query = self.texture.query();
        if query.width != self.size.x as u32 || query.height != self.size.y as u32 {
            // SAFETY: same as in new(); texture_creator outlives the texture.
            let creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
                unsafe { &*(self.texture_creator.as_ref() as *const _) };
            match creator_ref.create_texture_streaming(
                PixelFormatEnum::ARGB8888,
                self.size.x as u32,
                self.size.y as u32,
            ) {
                Ok(texture) => self.texture = texture,
                Err(e) => log::error!("failed to recreate SDL texture: {e}"),
            }
        }
    }

    fn before_render(&mut self) {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.should_close = true,
                _ => {}
            }
        }
    }

    fn after_render(&mut self) {
        // SAFETY: Pixel is #[repr(C)] with four u8 channels, so the color
        // buffer is exactly width * height * 4 tightly packed bytes.
        let bytes = unsafe {
            std::slice::from_raw_parts(self.color.as_ptr().cast::<u8>(), self.color.len() * 4)
        };

        let pitch = self.size.x as usize * 4;
        if self.texture.update(None, bytes, pitch).is_err() {
            log::error!("failed to upload frame to SDL texture");
            return;
        }
        self.canvas.clear();
        if self.canvas.copy(&self.texture, None, None).is_err() {
            log::error!("failed to copy frame to SDL canvas");
            return;
        }
        self.canvas.present();
    }

    fn size(&self) -> Vec2i {
        self.size
    }

    fn buffers(&mut self) -> (&mut [Pixel], &mut [Depth]) {
        (&mut self.color, &mut self.depth)
    }
}
