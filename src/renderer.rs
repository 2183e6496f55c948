//! Frame orchestration: scene traversal and backend handshake.

use log::{debug, trace};

use crate::backend::{Backend, PixelHook, Rect};
use crate::framebuffer::FrameBuffer;
use crate::light::DirectionalLight;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2i;
use crate::pixel::Pixel;
use crate::rasterizer;
use crate::renderable::Renderable;
use crate::scene::Scene;

/// Drives rendering of a scene graph through a display backend.
///
/// One `render_frame` call performs the full frame sequence: the backend's
/// `before_render`, an optional clear, a depth-first traversal of the scene
/// graph, and the backend's `after_render`. Rendering a frame does not mutate
/// the scene; rendering the same scene twice produces the same buffers.
pub struct Renderer<B: Backend> {
    backend: B,
    scene: Scene,
    projection: Mat4,
    view: Mat4,
    light: DirectionalLight,
    clear_color: Pixel,
    clear_before_render: bool,
}

impl<B: Backend> Renderer<B> {
    pub fn new(mut backend: B, projection: Mat4) -> Self {
        let viewport = Rect::with_size(backend.size());
        backend.init(viewport);
        debug!("renderer initialized: {}x{} viewport", viewport.width, viewport.height);
        Self {
            backend,
            scene: Scene::new(),
            projection,
            view: Mat4::identity(),
            light: DirectionalLight::default(),
            clear_color: Pixel::BLACK,
            clear_before_render: true,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    /// Sets the camera (world-to-view) matrix.
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn set_clear_color(&mut self, color: Pixel) {
        self.clear_color = color;
    }

    /// When disabled, the previous frame's color and depth persist and the
    /// new frame composites over them.
    pub fn set_clear_before_render(&mut self, clear: bool) {
        self.clear_before_render = clear;
    }

    pub fn size(&self) -> Vec2i {
        self.backend.size()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Renders one frame of the current scene.
    pub fn render_frame(&mut self) {
        self.backend.before_render();

        let size = self.backend.size();
        trace!("rendering frame: {}x{}, {} root renderables", size.x, size.y, self.scene.len());
        let hook = self.backend.pixel_hook();
        let (color, depth) = self.backend.buffers();
        let mut fb = FrameBuffer::new(color, depth, size);

        if self.clear_before_render {
            fb.clear(self.clear_color);
        }
        draw_scene(
            &mut fb,
            hook,
            &self.scene,
            Mat4::identity(),
            self.view,
            self.projection,
            &self.light,
        );

        self.backend.after_render();
    }
}

/// Depth-first traversal. Each node's local transform composes onto the
/// accumulated ancestor transform before its children are visited.
fn draw_scene(
    fb: &mut FrameBuffer,
    hook: Option<PixelHook>,
    scene: &Scene,
    ancestor: Mat4,
    view: Mat4,
    projection: Mat4,
    light: &DirectionalLight,
) {
    if !scene.visible() {
        return;
    }
    let combined = ancestor * scene.transform();

    for renderable in scene.renderables() {
        match renderable {
            Renderable::Image(texture) => {
                let offset = Vec2i::new(combined.get(0, 3) as i32, combined.get(1, 3) as i32);
                rasterizer::blit_image(fb, texture, offset);
            }
            Renderable::Sprite(sprite) => rasterizer::draw_sprite(fb, sprite, combined),
            Renderable::Object(object) => {
                rasterizer::draw_object(fb, hook, object, combined, view, projection, light)
            }
            Renderable::Scene(child) => {
                draw_scene(fb, hook, child, combined, view, projection, light)
            }
        }
    }
}
