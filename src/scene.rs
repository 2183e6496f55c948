//! Scene graph nodes.

use std::fmt;

use crate::math::mat4::Mat4;
use crate::renderable::Renderable;

/// Maximum number of direct children a scene node can hold.
pub const MAX_SCENE_RENDERABLES: usize = 32;

/// Errors from scene mutation operations.
#[derive(Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The scene already holds [`MAX_SCENE_RENDERABLES`] children.
    Full,
    /// No child exists at the given index.
    NotFound(usize),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Full => {
                write!(f, "scene already holds {MAX_SCENE_RENDERABLES} renderables")
            }
            SceneError::NotFound(index) => write!(f, "no renderable at index {index}"),
        }
    }
}

impl std::error::Error for SceneError {}

/// A node in the scene graph.
///
/// Holds a local transform, a visibility flag, and an ordered list of owned
/// children. Ownership makes the hierarchy a tree by construction; traversal
/// order is insertion order and is deterministic.
#[derive(Clone, Debug)]
pub struct Scene {
    transform: Mat4,
    visible: bool,
    renderables: Vec<Renderable>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            transform: Mat4::identity(),
            visible: true,
            renderables: Vec::new(),
        }
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// An invisible scene is skipped entirely during traversal, children
    /// included.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Adds a child at the end of the traversal order.
    ///
    /// Fails with [`SceneError::Full`] at capacity; the scene is unchanged.
    pub fn add(&mut self, renderable: impl Into<Renderable>) -> Result<(), SceneError> {
        if self.renderables.len() >= MAX_SCENE_RENDERABLES {
            return Err(SceneError::Full);
        }
        self.renderables.push(renderable.into());
        Ok(())
    }

    /// Removes and returns the child at `index`, shifting later children up.
    ///
    /// Fails with [`SceneError::NotFound`] when the index is out of range;
    /// the scene is unchanged.
    pub fn remove(&mut self, index: usize) -> Result<Renderable, SceneError> {
        if index >= self.renderables.len() {
            return Err(SceneError::NotFound(index));
        }
        Ok(self.renderables.remove(index))
    }

    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }

    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    pub fn renderables_mut(&mut self) -> &mut [Renderable] {
        &mut self.renderables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2i;
    use crate::pixel::Pixel;
    use crate::sprite::Sprite;
    use crate::texture::Texture;

    fn leaf() -> Texture {
        Texture::solid(Vec2i::new(1, 1), Pixel::WHITE).unwrap()
    }

    #[test]
    fn add_rejects_past_capacity() {
        let mut scene = Scene::new();
        for _ in 0..MAX_SCENE_RENDERABLES {
            scene.add(leaf()).unwrap();
        }
        assert_eq!(scene.add(leaf()), Err(SceneError::Full));
        assert_eq!(scene.len(), MAX_SCENE_RENDERABLES);
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut scene = Scene::new();
        scene.add(leaf()).unwrap();
        scene
            .add(Sprite::new(leaf(), Mat4::identity()))
            .unwrap();
        scene.add(leaf()).unwrap();

        assert!(scene.remove(1).is_ok());
        assert_eq!(scene.len(), 2);
        // The former index 2 is now index 1.
        assert!(matches!(scene.renderables()[1], Renderable::Image(_)));
    }

    #[test]
    fn remove_missing_index_is_an_error() {
        let mut scene = Scene::new();
        scene.add(leaf()).unwrap();
        assert!(matches!(scene.remove(3), Err(SceneError::NotFound(3))));
        assert_eq!(scene.len(), 1);
    }
}
