//! Materials: shareable texture handles for 3D objects.

use std::sync::Arc;

use crate::texture::Texture;

/// A material is a texture shared between any number of objects.
///
/// Cloning a material is cheap; the underlying pixel data is reference
/// counted and read-only for the lifetime of the objects using it.
#[derive(Clone, Debug)]
pub struct Material {
    texture: Arc<Texture>,
}

impl Material {
    pub fn new(texture: Texture) -> Self {
        Self {
            texture: Arc::new(texture),
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}

impl From<Texture> for Material {
    fn from(texture: Texture) -> Self {
        Self::new(texture)
    }
}
