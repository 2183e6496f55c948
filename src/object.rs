//! 3D objects: a mesh, an optional material, and precomputed render data.

use std::sync::Arc;

use crate::material::Material;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;

/// A renderable 3D object.
///
/// The object owns derived per-frame-invariant data so the rasterizer does
/// not redo work per frame: vertices transformed by the object's own
/// transform, one unit normal per face, and texture coordinates resolved
/// into per-face triples.
///
/// The precomputed buffers are **not** kept up to date automatically: after
/// changing the transform (or swapping the mesh) call [`Object::precompute`]
/// before the next frame. The buffers are rebuilt wholesale and the old ones
/// dropped.
#[derive(Clone, Debug)]
pub struct Object {
    mesh: Arc<Mesh>,
    material: Option<Material>,
    transform: Mat4,
    transformed_vertices: Vec<Vec4>,
    face_normals: Vec<Vec3>,
    tex_a: Vec<Vec2>,
    tex_b: Vec<Vec2>,
    tex_c: Vec<Vec2>,
}

impl Object {
    pub fn new(mesh: Arc<Mesh>, material: Option<Material>) -> Self {
        let mut object = Self {
            mesh,
            material,
            transform: Mat4::identity(),
            transformed_vertices: Vec::new(),
            face_normals: Vec::new(),
            tex_a: Vec::new(),
            tex_b: Vec::new(),
            tex_c: Vec::new(),
        };
        object.precompute();
        object
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Sets the object transform. Call [`Object::precompute`] afterwards so
    /// the derived vertex data matches.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Replaces the mesh. Call [`Object::precompute`] afterwards.
    pub fn set_mesh(&mut self, mesh: Arc<Mesh>) {
        self.mesh = mesh;
    }

    /// Rebuilds all derived buffers from the current mesh and transform.
    pub fn precompute(&mut self) {
        self.precompute_transformed_vertices();
        self.precompute_face_normals();
        self.precompute_texture_coordinates();
    }

    fn precompute_transformed_vertices(&mut self) {
        self.transformed_vertices = self
            .mesh
            .positions()
            .iter()
            .map(|p| self.transform * Vec4::point(p.x, p.y, p.z))
            .collect();
    }

    fn precompute_face_normals(&mut self) {
        let mesh = &self.mesh;
        let triangle_count = mesh.triangle_count();
        let mut normals = Vec::with_capacity(triangle_count);

        for face in 0..triangle_count {
            let model_normal = if !mesh.normals().is_empty() {
                mesh.normals()[mesh.norm_indices()[face * 3] as usize]
            } else {
                let tri = &mesh.pos_indices()[face * 3..face * 3 + 3];
                let a = mesh.positions()[tri[0] as usize];
                let b = mesh.positions()[tri[1] as usize];
                let c = mesh.positions()[tri[2] as usize];
                (b - a).cross(c - a)
            };
            normals.push(self.transform.transform_direction(model_normal).normalize());
        }
        self.face_normals = normals;
    }

    fn precompute_texture_coordinates(&mut self) {
        let mesh = &self.mesh;
        if !mesh.has_tex_coords() {
            self.tex_a.clear();
            self.tex_b.clear();
            self.tex_c.clear();
            return;
        }

        let coord = |slot: usize| mesh.tex_coords()[mesh.tex_indices()[slot] as usize];
        let triangle_count = mesh.triangle_count();
        self.tex_a = (0..triangle_count).map(|f| coord(f * 3)).collect();
        self.tex_b = (0..triangle_count).map(|f| coord(f * 3 + 1)).collect();
        self.tex_c = (0..triangle_count).map(|f| coord(f * 3 + 2)).collect();
    }

    /// Vertices after the object's own transform, homogeneous (w=1 inputs).
    pub fn transformed_vertices(&self) -> &[Vec4] {
        &self.transformed_vertices
    }

    /// One unit normal per triangle, in the object's transformed space.
    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// Texture coordinates of the face's three corners, or `None` when the
    /// mesh is untextured.
    pub fn face_tex_coords(&self, face: usize) -> Option<(Vec2, Vec2, Vec2)> {
        if self.tex_a.is_empty() {
            return None;
        }
        Some((self.tex_a[face], self.tex_b[face], self.tex_c[face]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn precompute_applies_object_transform() {
        let mut object = Object::new(Mesh::cube().into_shared(), None);
        object.set_transform(Mat4::translation(5.0, 0.0, 0.0));
        object.precompute();

        let v = object.transformed_vertices()[0];
        assert_relative_eq!(v.x, 4.0); // -1 + 5
        assert_relative_eq!(v.w, 1.0);
    }

    #[test]
    fn stale_until_precompute_called() {
        let mut object = Object::new(Mesh::cube().into_shared(), None);
        let before = object.transformed_vertices()[0];
        object.set_transform(Mat4::translation(5.0, 0.0, 0.0));
        // No precompute yet: derived data still reflects the old transform.
        assert_eq!(object.transformed_vertices()[0], before);
    }

    #[test]
    fn face_normals_rotate_with_transform() {
        let mut object = Object::new(Mesh::cube().into_shared(), None);
        let near_face_normal = object.face_normals()[0];
        assert_relative_eq!(near_face_normal.z, -1.0, epsilon = 1e-5);

        object.set_transform(Mat4::rotation_y(std::f32::consts::PI));
        object.precompute();
        assert_relative_eq!(object.face_normals()[0].z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn face_tex_coords_cover_unit_square() {
        let object = Object::new(Mesh::cube().into_shared(), None);
        let (a, b, c) = object.face_tex_coords(0).unwrap();
        assert_eq!(a, Vec2::new(0.0, 0.0));
        assert_eq!(b, Vec2::new(0.0, 1.0));
        assert_eq!(c, Vec2::new(1.0, 1.0));
    }
}
