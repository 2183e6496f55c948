//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! Scene-graph composition therefore reads `ancestor * local`: the node's
//! local transform is applied first, the accumulated ancestor transform second.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix. Translation lives in the last column.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a perspective matrix with a left-handed coordinate system.
    ///
    /// Points in front of the camera (positive view-space z) end up with
    /// positive clip-space w and NDC z in [0, 1] between near and far, which
    /// is the window the depth buffer quantizes.
    pub fn perspective_lh(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let t = near * (fov / 2.0).tan();
        let r = t * aspect_ratio;
        let a = far / (far - near);
        let b = -near * far / (far - near);
        Mat4::new([
            [near / r, 0.0, 0.0, 0.0],
            [0.0, near / t, 0.0, 0.0],
            [0.0, 0.0, a, b],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Creates a view matrix with a left-handed coordinate system.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    pub fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right).normalize();

        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [forward.x, forward.y, forward.z, -forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (row, row_data) in self.data.iter().enumerate() {
            for (col, value) in row_data.iter().enumerate() {
                out[col][row] = *value;
            }
        }
        Mat4::new(out)
    }

    /// Determinant of the 3x3 minor obtained by deleting `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> f32 {
        let mut m = [[0.0f32; 3]; 3];
        let mut mr = 0;
        for r in 0..4 {
            if r == row {
                continue;
            }
            let mut mc = 0;
            for c in 0..4 {
                if c == col {
                    continue;
                }
                m[mr][mc] = self.data[r][c];
                mc += 1;
            }
            mr += 1;
        }
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse of the matrix, if it exists.
    /// Returns `None` if the matrix is singular (determinant is zero).
    pub fn inverse(&self) -> Option<Mat4> {
        let mut cofactors = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                cofactors[row][col] = sign * self.minor(row, col);
            }
        }

        let det = (0..4).map(|c| self.data[0][c] * cofactors[0][c]).sum::<f32>();
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        // Inverse is the transposed cofactor matrix scaled by 1/det.
        let mut out = [[0.0f32; 4]; 4];
        for row in 0..4 {
            for col in 0..4 {
                out[row][col] = cofactors[col][row] * inv_det;
            }
        }
        Some(Mat4::new(out))
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }

    /// Transform a direction vector, ignoring translation (w=0).
    #[inline]
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::direction(v.x, v.y, v.z)).to_vec3()
    }
}

/// Matrix multiplication: `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_leaves_points_unchanged() {
        let p = Vec4::point(1.0, 2.0, 3.0);
        assert_eq!(Mat4::identity() * p, p);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(10.0, 0.0, 0.0);
        assert_eq!((t * Vec4::point(0.0, 5.0, 0.0)).x, 10.0);
        assert_eq!((t * Vec4::direction(0.0, 5.0, 0.0)).x, 0.0);
    }

    #[test]
    fn composition_applies_rightmost_first() {
        // Scale by 2, then translate by 10: origin ends at x=10, (1,0,0) at x=12.
        let m = Mat4::translation(10.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        assert_eq!((m * Vec4::point(0.0, 0.0, 0.0)).x, 10.0);
        assert_eq!((m * Vec4::point(1.0, 0.0, 0.0)).x, 12.0);
    }

    #[test]
    fn inverse_of_translation() {
        let m = Mat4::translation(3.0, -2.0, 7.0);
        let inv = m.inverse().unwrap();
        let roundtrip = inv * (m * Vec4::point(1.0, 1.0, 1.0));
        assert_relative_eq!(roundtrip.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(roundtrip.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(roundtrip.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Mat4::scaling(0.0, 1.0, 1.0).inverse().is_none());
    }

    #[test]
    fn perspective_w_carries_view_depth() {
        let p = Mat4::perspective_lh(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0);
        let clip = p * Vec4::point(0.0, 0.0, 10.0);
        // Left-handed projection: w equals view-space z.
        assert_relative_eq!(clip.w, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_depth_range_spans_zero_to_one() {
        let p = Mat4::perspective_lh(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = p * Vec4::point(0.0, 0.0, 1.0);
        let far = p * Vec4::point(0.0, 0.0, 100.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }
}
