//! The closed set of things a scene can contain.

use crate::object::Object;
use crate::scene::Scene;
use crate::sprite::Sprite;
use crate::texture::Texture;

/// A renderable scene-graph node.
///
/// The renderer dispatches on the variant with a `match`; the set is closed,
/// so there is no such thing as an unknown renderable at runtime.
#[derive(Clone, Debug)]
pub enum Renderable {
    /// A texture blitted at the origin of the accumulated transform.
    Image(Texture),
    /// A texture drawn through a 2D transform.
    Sprite(Sprite),
    /// A 3D object rasterized through the full pipeline.
    Object(Object),
    /// A nested scene, composing its transform with its ancestors'.
    Scene(Scene),
}

impl From<Texture> for Renderable {
    fn from(texture: Texture) -> Self {
        Renderable::Image(texture)
    }
}

impl From<Sprite> for Renderable {
    fn from(sprite: Sprite) -> Self {
        Renderable::Sprite(sprite)
    }
}

impl From<Object> for Renderable {
    fn from(object: Object) -> Self {
        Renderable::Object(object)
    }
}

impl From<Scene> for Renderable {
    fn from(scene: Scene) -> Self {
        Renderable::Scene(scene)
    }
}
