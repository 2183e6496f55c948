//! Triangle mesh geometry.
//!
//! A [`Mesh`] owns parallel attribute arrays (positions, texture coordinates,
//! normals) and three parallel index arrays grouped in triples, one triple
//! per triangle. Indices are validated at construction so the rasterizer can
//! trust them; meshes are immutable afterwards and shared between objects
//! via `Arc`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Errors detected when constructing or loading a mesh.
#[derive(Debug)]
pub enum MeshError {
    /// The position index count is not a multiple of 3.
    IndexCountNotTriangles(usize),
    /// A secondary index array is non-empty but differs in length from the
    /// position index array.
    IndexArrayLengthMismatch { name: &'static str, len: usize, expected: usize },
    /// An index points past the end of its attribute array.
    IndexOutOfRange { name: &'static str, index: u32, len: usize },
    /// The OBJ file could not be loaded.
    Load(tobj::LoadError),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IndexCountNotTriangles(n) => {
                write!(f, "index count {n} is not a multiple of 3")
            }
            MeshError::IndexArrayLengthMismatch { name, len, expected } => {
                write!(f, "{name} index array has {len} entries, expected {expected}")
            }
            MeshError::IndexOutOfRange { name, index, len } => {
                write!(f, "{name} index {index} out of range for {len} entries")
            }
            MeshError::Load(e) => write!(f, "failed to load OBJ: {e}"),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Load(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for MeshError {
    fn from(e: tobj::LoadError) -> Self {
        MeshError::Load(e)
    }
}

/// Immutable triangle geometry with parallel index arrays.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
    pos_indices: Vec<u32>,
    tex_indices: Vec<u32>,
    norm_indices: Vec<u32>,
}

fn check_indices(
    name: &'static str,
    indices: &[u32],
    array_len: usize,
    expected_len: usize,
) -> Result<(), MeshError> {
    if indices.is_empty() {
        return Ok(());
    }
    if indices.len() != expected_len {
        return Err(MeshError::IndexArrayLengthMismatch {
            name,
            len: indices.len(),
            expected: expected_len,
        });
    }
    for &index in indices {
        if index as usize >= array_len {
            return Err(MeshError::IndexOutOfRange {
                name,
                index,
                len: array_len,
            });
        }
    }
    Ok(())
}

impl Mesh {
    /// Creates a mesh from raw attribute and index arrays.
    ///
    /// `tex_indices` and `norm_indices` may be empty (untextured / no normals
    /// yet); when present they must parallel `pos_indices`. Every index is
    /// bounds-checked here so rendering never has to.
    pub fn new(
        positions: Vec<Vec3>,
        tex_coords: Vec<Vec2>,
        normals: Vec<Vec3>,
        pos_indices: Vec<u32>,
        tex_indices: Vec<u32>,
        norm_indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        if pos_indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles(pos_indices.len()));
        }
        check_indices("position", &pos_indices, positions.len(), pos_indices.len())?;
        check_indices("texture", &tex_indices, tex_coords.len(), pos_indices.len())?;
        check_indices("normal", &norm_indices, normals.len(), pos_indices.len())?;

        Ok(Self {
            positions,
            tex_coords,
            normals,
            pos_indices,
            tex_indices,
            norm_indices,
        })
    }

    /// Loads a mesh from an OBJ file, merging all models in the file.
    ///
    /// Faces are triangulated on load; positions and texture coordinates
    /// share a single index array per OBJ model.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let (models, _materials) = tobj::load_obj(
            path.as_ref(),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut positions = Vec::new();
        let mut tex_coords = Vec::new();
        let mut pos_indices = Vec::new();
        let mut tex_indices = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let pos_base = positions.len() as u32;
            let tex_base = tex_coords.len() as u32;

            positions.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            tex_coords.extend(mesh.texcoords.chunks_exact(2).map(|t| Vec2::new(t[0], t[1])));

            pos_indices.extend(mesh.indices.iter().map(|i| i + pos_base));
            if !mesh.texcoords.is_empty() {
                tex_indices.extend(mesh.indices.iter().map(|i| i + tex_base));
            }
        }

        debug!(
            "loaded OBJ {:?}: {} vertices, {} triangles",
            path.as_ref(),
            positions.len(),
            pos_indices.len() / 3
        );

        let mut mesh = Self::new(positions, tex_coords, vec![], pos_indices, tex_indices, vec![])?;
        mesh.calculate_normals();
        Ok(mesh)
    }

    /// A unit cube (half-extent 1) with per-face texture coordinates,
    /// wound so outward faces survive backface culling.
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
        ];
        let tex_coords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];
        // Quads as (bottom-left, top-left, top-right, bottom-right) seen from
        // outside the cube.
        let quads: [[u32; 4]; 6] = [
            [0, 1, 2, 3], // near (z = -1)
            [7, 6, 5, 4], // far (z = +1)
            [3, 2, 6, 7], // right
            [4, 5, 1, 0], // left
            [1, 5, 6, 2], // top
            [4, 0, 3, 7], // bottom
        ];

        let mut pos_indices = Vec::with_capacity(36);
        let mut tex_indices = Vec::with_capacity(36);
        for quad in quads {
            pos_indices.extend([quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]);
            tex_indices.extend([0, 1, 2, 0, 2, 3]);
        }

        let mut mesh = Self::new(positions, tex_coords, vec![], pos_indices, tex_indices, vec![])
            .expect("cube mesh is statically valid");
        mesh.calculate_normals();
        mesh
    }

    /// Computes one normal per triangle corner from the face's edge cross
    /// product, replacing any existing normals.
    pub fn calculate_normals(&mut self) {
        let count = self.pos_indices.len();
        self.normals = Vec::with_capacity(count);
        self.norm_indices = (0..count as u32).collect();

        for tri in self.pos_indices.chunks_exact(3) {
            let a = self.positions[tri[0] as usize];
            let b = self.positions[tri[1] as usize];
            let c = self.positions[tri[2] as usize];
            let normal = (b - a).cross(c - a).normalize();
            self.normals.extend([normal, normal, normal]);
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn pos_indices(&self) -> &[u32] {
        &self.pos_indices
    }

    pub fn tex_indices(&self) -> &[u32] {
        &self.tex_indices
    }

    pub fn norm_indices(&self) -> &[u32] {
        &self.norm_indices
    }

    pub fn index_count(&self) -> usize {
        self.pos_indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.pos_indices.len() / 3
    }

    pub fn has_tex_coords(&self) -> bool {
        !self.tex_indices.is_empty()
    }

    /// Wraps the mesh for sharing between objects.
    pub fn into_shared(self) -> Arc<Mesh> {
        Arc::new(self)
    }
}
