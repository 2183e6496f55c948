//! 2D sprites: a texture drawn through a transform.

use crate::math::mat4::Mat4;
use crate::texture::Texture;

/// A texture placed in the scene through a 4x4 transform.
///
/// Only the 2D affine part of the transform (x/y rotation-scale and
/// translation) affects drawing; sprites write color without depth.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub texture: Texture,
    pub transform: Mat4,
}

impl Sprite {
    pub fn new(texture: Texture, transform: Mat4) -> Self {
        Self { texture, transform }
    }
}
