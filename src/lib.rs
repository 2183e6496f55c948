//! A software 3D renderer: scene graph, perspective projection, triangle
//! rasterization with depth testing, perspective-correct texturing, and flat
//! directional lighting, drawn through pluggable display backends.
//!
//! # Quick start
//!
//! ```no_run
//! use rastrum::prelude::*;
//!
//! let backend = MemoryBackend::new(Vec2i::new(320, 240));
//! let projection = Mat4::perspective_lh(std::f32::consts::FRAC_PI_2, 320.0 / 240.0, 0.1, 100.0);
//! let mut renderer = Renderer::new(backend, projection);
//!
//! let mut cube = Object::new(Mesh::cube().into_shared(), None);
//! cube.set_transform(Mat4::translation(0.0, 0.0, 5.0));
//! cube.precompute();
//! renderer.scene_mut().add(cube).unwrap();
//!
//! renderer.render_frame();
//! let frame = renderer.backend().color();
//! # let _ = frame;
//! ```

pub mod backend;
pub mod backends;
pub mod depth;
pub mod framebuffer;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod object;
pub mod pixel;
pub mod rasterizer;
pub mod renderable;
pub mod renderer;
pub mod scene;
pub mod sprite;
pub mod texture;

/// Common imports for building and rendering scenes.
pub mod prelude {
    pub use crate::backend::{Backend, PixelHook, Rect};
    pub use crate::backends::MemoryBackend;
    #[cfg(feature = "sdl")]
    pub use crate::backends::SdlBackend;
    pub use crate::depth::Depth;
    pub use crate::framebuffer::FrameBuffer;
    pub use crate::light::DirectionalLight;
    pub use crate::material::Material;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::{Vec2, Vec2i};
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
    pub use crate::mesh::Mesh;
    pub use crate::object::Object;
    pub use crate::pixel::Pixel;
    pub use crate::renderable::Renderable;
    pub use crate::renderer::Renderer;
    pub use crate::scene::Scene;
    pub use crate::sprite::Sprite;
    pub use crate::texture::Texture;
}
