//! Vector and matrix primitives used throughout the renderer.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
