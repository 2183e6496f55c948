//! Triangle rasterization and 2D blitting.
//!
//! This is the bottom of the pipeline: geometry arrives here already carrying
//! the accumulated scene-graph transform, gets projected, and is filled into
//! the frame's color and depth buffers.
//!
//! # Algorithm
//!
//! Triangles are filled with the edge-function algorithm: three edge values
//! are seeded at the top-left corner of the triangle's clamped screen-space
//! bounding box and stepped incrementally per row and column, so the inner
//! loop never recomputes a full cross product. A pixel is covered when all
//! three values are non-negative, checked with a sign-bit OR.
//!
//! Edge values are proportional to barycentric coordinates, which drive depth
//! interpolation, the depth test (inverted `1 - depth` storage, strict
//! greater-than wins), and perspective-correct texture lookup (coordinates
//! pre-divided by each vertex's NDC z, re-multiplied by interpolated depth).
//!
//! Degenerate geometry (zero area, back-facing, outside the viewport, any
//! vertex on or behind the near plane) is silently skipped; that is a normal
//! rendering outcome, not an error.

use crate::backend::PixelHook;
use crate::framebuffer::FrameBuffer;
use crate::light::DirectionalLight;
use crate::math::mat4::Mat4;
use crate::math::vec2::{Vec2, Vec2i};
use crate::math::vec4::Vec4;
use crate::object::Object;
use crate::pixel::Pixel;
use crate::sprite::Sprite;
use crate::texture::Texture;

/// 2D cross product of (b - a) and (c - a); twice the signed triangle area.
#[inline]
fn orient2d(a: Vec2i, b: Vec2i, c: Vec2i) -> i32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True when the 2D linear part of the transform is the identity, so a sprite
/// can be copied row by row at an integer offset instead of inverse-mapped.
fn translation_only(m: &Mat4) -> bool {
    (m.get(0, 0) - 1.0).abs() < f32::EPSILON
        && (m.get(1, 1) - 1.0).abs() < f32::EPSILON
        && m.get(0, 1).abs() < f32::EPSILON
        && m.get(1, 0).abs() < f32::EPSILON
}

/// Projects and fills every triangle of `object` into the frame.
///
/// `transform` is the accumulated scene-graph transform (ancestors composed
/// with the node chain leading to this object); the object's own transform is
/// already baked into its precomputed vertices.
pub fn draw_object(
    fb: &mut FrameBuffer,
    hook: Option<PixelHook>,
    object: &Object,
    transform: Mat4,
    view: Mat4,
    projection: Mat4,
    light: &DirectionalLight,
) {
    let size = fb.size();
    let half_w = size.x as f32 / 2.0;
    let half_h = size.y as f32 / 2.0;
    let clip_matrix = projection * view * transform;
    let vertices = object.transformed_vertices();
    let texture = object.material().map(|m| m.texture());

    for face in 0..object.mesh().triangle_count() {
        let tri = &object.mesh().pos_indices()[face * 3..face * 3 + 3];
        let clip: [Vec4; 3] = [
            clip_matrix * vertices[tri[0] as usize],
            clip_matrix * vertices[tri[1] as usize],
            clip_matrix * vertices[tri[2] as usize],
        ];

        // No near-plane clipping: a triangle reaching behind the camera is
        // dropped whole rather than divided through w <= 0.
        if clip.iter().any(|v| v.w <= 0.0) {
            continue;
        }

        // Perspective division into normalized device coordinates.
        let ndc = clip.map(|v| {
            let w_inv = 1.0 / v.w;
            Vec4::new(v.x * w_inv, v.y * w_inv, v.z * w_inv, w_inv)
        });

        // A vertex exactly on or nearer than the near plane lands at
        // NDC z <= 0, where the texcoord pre-division below blows up.
        // Such triangles are dropped whole, like the w <= 0 case.
        if ndc.iter().any(|v| v.z <= 0.0) {
            continue;
        }

        let screen_f: [Vec2; 3] =
            ndc.map(|v| Vec2::new(v.x * half_w + half_w, v.y * half_h + half_h));

        // Backface cull: non-negative winding faces away from the camera.
        let winding = (screen_f[1].x - screen_f[0].x) * (screen_f[2].y - screen_f[1].y)
            - (screen_f[1].y - screen_f[0].y) * (screen_f[2].x - screen_f[1].x);
        if winding >= 0.0 {
            continue;
        }

        let a = Vec2i::new(screen_f[0].x as i32, screen_f[0].y as i32);
        let b = Vec2i::new(screen_f[1].x as i32, screen_f[1].y as i32);
        let c = Vec2i::new(screen_f[2].x as i32, screen_f[2].y as i32);

        // Signed area in integer screen space; negative for surviving
        // triangles, zero when rounding collapsed the triangle.
        let area = orient2d(a, b, c);
        if area == 0 {
            continue;
        }
        let area_inverse = 1.0 / area as f32;

        // Bounding box clamped to the framebuffer. Fully offscreen triangles
        // produce an empty range and touch nothing.
        let min_x = a.x.min(b.x).min(c.x).max(0);
        let max_x = a.x.max(b.x).max(c.x).min(size.x - 1);
        let min_y = a.y.min(b.y).min(c.y).max(0);
        let max_y = a.y.max(b.y).max(c.y).min(size.y - 1);

        // Edge functions with reversed orientation so interior pixels carry
        // all-non-negative values for the clockwise triangles that survive
        // culling. Per-column and per-row deltas of each edge value:
        let step_x0 = c.y - b.y;
        let step_y0 = b.x - c.x;
        let step_x1 = a.y - c.y;
        let step_y1 = c.x - a.x;
        let step_x2 = b.y - a.y;
        let step_y2 = a.x - b.x;

        let top_left = Vec2i::new(min_x, min_y);
        let mut w0_row = orient2d(c, b, top_left);
        let mut w1_row = orient2d(a, c, top_left);
        let mut w2_row = orient2d(b, a, top_left);

        // Texture coordinates pre-divided by each vertex's NDC z for
        // perspective-correct interpolation.
        let face_tex = texture.and_then(|_| object.face_tex_coords(face)).map(
            |(tca, tcb, tcc)| {
                (
                    tca * (1.0 / ndc[0].z),
                    tcb * (1.0 / ndc[1].z),
                    tcc * (1.0 / ndc[2].z),
                )
            },
        );

        let normal = transform
            .transform_direction(object.face_normals()[face])
            .normalize();
        let diffuse = light.diffuse(normal);

        for y in min_y..=max_y {
            let mut w0 = w0_row;
            let mut w1 = w1_row;
            let mut w2 = w2_row;

            for x in min_x..=max_x {
                // Sign-bit OR: negative iff any edge value is negative.
                if (w0 | w1 | w2) >= 0 {
                    let depth = -(w0 as f32 * ndc[0].z
                        + w1 as f32 * ndc[1].z
                        + w2 as f32 * ndc[2].z)
                        * area_inverse;

                    if (0.0..=1.0).contains(&depth) {
                        let idx = (x + y * size.x) as usize;
                        let inverted = 1.0 - depth;
                        if fb.depth_test(idx, inverted) {
                            fb.write_depth(idx, inverted);

                            let color = match (texture, face_tex) {
                                (Some(tex), Some((tca, tcb, tcc))) => {
                                    let u = -(w0 as f32 * tca.x
                                        + w1 as f32 * tcb.x
                                        + w2 as f32 * tcc.x)
                                        * area_inverse
                                        * depth;
                                    let v = -(w0 as f32 * tca.y
                                        + w1 as f32 * tcb.y
                                        + w2 as f32 * tcc.y)
                                        * area_inverse
                                        * depth;
                                    tex.sample(Vec2::new(u, v))
                                }
                                _ => Pixel::WHITE,
                            };

                            let pos = Vec2i::new(x, y);
                            match hook {
                                Some(draw) => draw(fb, pos, color, diffuse),
                                None => fb.write_color(idx, color.mul(diffuse)),
                            }
                        }
                    }
                }
                w0 += step_x0;
                w1 += step_x1;
                w2 += step_x2;
            }
            w0_row += step_y0;
            w1_row += step_y1;
            w2_row += step_y2;
        }
    }
}

/// Copies a texture into the frame at an integer offset, clipped to bounds.
pub fn blit_image(fb: &mut FrameBuffer, texture: &Texture, offset: Vec2i) {
    for y in 0..texture.height() {
        for x in 0..texture.width() {
            let pos = Vec2i::new(x, y);
            if let Some(color) = texture.read(pos) {
                fb.set_pixel(offset + pos, color);
            }
        }
    }
}

/// Draws a sprite through the accumulated transform.
///
/// Pure translations copy rows directly; anything else inverse-maps each
/// pixel of the transformed bounding box back into texture space and skips
/// positions that land outside the source.
pub fn draw_sprite(fb: &mut FrameBuffer, sprite: &Sprite, transform: Mat4) {
    let combined = transform * sprite.transform;

    if translation_only(&combined) {
        let offset = Vec2i::new(combined.get(0, 3) as i32, combined.get(1, 3) as i32);
        blit_image(fb, &sprite.texture, offset);
        return;
    }

    let inverse = match combined.inverse() {
        Some(inv) => inv,
        // A non-invertible transform collapses the sprite to nothing.
        None => return,
    };

    let tex_size = sprite.texture.size();
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(tex_size.x as f32, 0.0),
        Vec2::new(0.0, tex_size.y as f32),
        Vec2::new(tex_size.x as f32, tex_size.y as f32),
    ]
    .map(|p| {
        let t = combined * Vec4::point(p.x, p.y, 0.0);
        Vec2::new(t.x, t.y)
    });

    let min_x = corners.iter().fold(f32::MAX, |m, c| m.min(c.x)) as i32;
    let min_y = corners.iter().fold(f32::MAX, |m, c| m.min(c.y)) as i32;
    let max_x = corners.iter().fold(f32::MIN, |m, c| m.max(c.x)) as i32;
    let max_y = corners.iter().fold(f32::MIN, |m, c| m.max(c.y)) as i32;

    let min_x = min_x.max(0);
    let min_y = min_y.max(0);
    let max_x = max_x.min(fb.width() - 1);
    let max_y = max_y.min(fb.height() - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let src = inverse * Vec4::point(x as f32, y as f32, 0.0);
            if src.x < 0.0
                || src.y < 0.0
                || src.x >= tex_size.x as f32
                || src.y >= tex_size.y as f32
            {
                continue;
            }
            if let Some(color) = sprite.texture.read(Vec2i::new(src.x as i32, src.y as i32)) {
                fb.set_pixel(Vec2i::new(x, y), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::Depth;
    use crate::material::Material;
    use crate::math::vec3::Vec3;
    use crate::mesh::Mesh;

    const W: i32 = 64;
    const H: i32 = 64;

    fn buffers() -> (Vec<Pixel>, Vec<Depth>) {
        (
            vec![Pixel::BLACK; (W * H) as usize],
            vec![Depth::FAR; (W * H) as usize],
        )
    }

    fn projection() -> Mat4 {
        Mat4::perspective_lh(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0)
    }

    /// Single clockwise-wound triangle facing the camera at the given depth.
    fn facing_triangle(z: f32) -> Object {
        let mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(0.0, 1.0, z),
                Vec3::new(1.0, -1.0, z),
            ],
            vec![],
            vec![],
            vec![0, 1, 2],
            vec![],
            vec![],
        )
        .unwrap();
        Object::new(mesh.into_shared(), None)
    }

    fn lit_pixels(color: &[Pixel]) -> usize {
        color.iter().filter(|p| **p != Pixel::BLACK).count()
    }

    #[test]
    fn facing_triangle_fills_pixels() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let object = facing_triangle(5.0);

        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0)),
        );

        assert!(lit_pixels(&color) > 0);
        // The screen center lies inside the triangle and must carry depth.
        let center = ((H / 2) * W + W / 2) as usize;
        assert_ne!(depth[center], Depth::FAR);
    }

    #[test]
    fn pixels_stay_inside_screen_bounding_box() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let object = facing_triangle(5.0);

        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::default(),
        );

        // At z=5 with a 90 degree frustum the triangle spans 1/5 of NDC, so
        // nothing may land in the outer rows or columns.
        for x in 0..W {
            assert_eq!(color[x as usize], Pixel::BLACK);
            assert_eq!(color[((H - 1) * W + x) as usize], Pixel::BLACK);
        }
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        // Reverse the winding of the facing triangle.
        let mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 5.0),
                Vec3::new(0.0, 1.0, 5.0),
                Vec3::new(1.0, -1.0, 5.0),
            ],
            vec![],
            vec![],
            vec![2, 1, 0],
            vec![],
            vec![],
        )
        .unwrap();
        let object = Object::new(mesh.into_shared(), None);

        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::default(),
        );
        assert_eq!(lit_pixels(&color), 0);
    }

    #[test]
    fn degenerate_triangle_is_skipped() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, 0.0, 5.0),
                Vec3::new(0.0, 0.0, 5.0),
                Vec3::new(1.0, 0.0, 5.0),
            ],
            vec![],
            vec![],
            vec![0, 1, 2],
            vec![],
            vec![],
        )
        .unwrap();
        let object = Object::new(mesh.into_shared(), None);

        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::default(),
        );
        assert_eq!(lit_pixels(&color), 0);
    }

    #[test]
    fn vertex_on_near_plane_rejects_triangle() {
        // projection() has near = 1.0; a vertex exactly at view z = 1 maps to
        // NDC z = 0, where perspective-correct texcoord pre-division would
        // divide by zero. The whole triangle must be dropped instead.
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(0.0, 1.0, 5.0),
                Vec3::new(1.0, -1.0, 5.0),
            ],
            vec![],
            vec![],
            vec![0, 1, 2],
            vec![],
            vec![],
        )
        .unwrap();
        let object = Object::new(mesh.into_shared(), None);

        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::default(),
        );
        assert_eq!(lit_pixels(&color), 0);
        assert!(depth.iter().all(|d| *d == Depth::FAR));
    }

    #[test]
    fn triangle_behind_camera_is_rejected() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let object = facing_triangle(-5.0);

        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::default(),
        );
        assert_eq!(lit_pixels(&color), 0);
    }

    #[test]
    fn offscreen_triangle_touches_nothing() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let object = facing_triangle(5.0);

        // Push it far off to the right of the frustum.
        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::translation(100.0, 0.0, 0.0),
            Mat4::identity(),
            projection(),
            &DirectionalLight::default(),
        );
        assert_eq!(lit_pixels(&color), 0);
    }

    #[test]
    fn pixel_hook_overrides_default_write() {
        fn red_hook(fb: &mut FrameBuffer, pos: Vec2i, _color: Pixel, _illum: f32) {
            fb.set_pixel(pos, Pixel::from_rgba(255, 0, 0, 255));
        }

        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let object = facing_triangle(5.0);

        draw_object(
            &mut fb,
            Some(red_hook),
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::default(),
        );

        let center = ((H / 2) * W + W / 2) as usize;
        assert_eq!(color[center], Pixel::from_rgba(255, 0, 0, 255));
    }

    #[test]
    fn perspective_uv_interpolation_is_nonlinear() {
        // A quad receding in depth: near edge at z=2, far edge at z=12.
        // Affine interpolation would put v=0.5 at the screen midpoint of a
        // vertical edge; perspective-correct interpolation pulls it toward
        // the near edge.
        let mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 2.0),
                Vec3::new(-1.0, 1.0, 12.0),
                Vec3::new(1.0, 1.0, 12.0),
                Vec3::new(1.0, -1.0, 2.0),
            ],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
            ],
            vec![],
            vec![0, 1, 2, 0, 2, 3],
            vec![0, 1, 2, 0, 2, 3],
            vec![],
        )
        .unwrap();

        // Texture split into a dark lower half and bright upper half; with
        // perspective correction more than half the quad's screen area shows
        // the near (dark) half.
        let mut pixels = vec![Pixel::from_gray(32); 64 * 64];
        for y in 32..64 {
            for x in 0..64 {
                pixels[y * 64 + x] = Pixel::from_gray(224);
            }
        }
        let texture = Texture::new(Vec2i::new(64, 64), pixels).unwrap();
        let object = Object::new(
            mesh.into_shared(),
            Some(Material::new(texture)),
        );

        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        draw_object(
            &mut fb,
            None,
            &object,
            Mat4::identity(),
            Mat4::identity(),
            projection(),
            &DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0)),
        );

        let lit = lit_pixels(&color);
        assert!(lit > 0);
        let dark = color
            .iter()
            .filter(|p| **p != Pixel::BLACK && p.to_gray() < 128)
            .count();
        assert!(
            dark * 2 > lit,
            "expected the near texture half to dominate: {dark} of {lit}"
        );
    }

    #[test]
    fn blit_clips_to_frame() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let tex = Texture::solid(Vec2i::new(8, 8), Pixel::WHITE).unwrap();

        blit_image(&mut fb, &tex, Vec2i::new(W - 4, H - 4));
        assert_eq!(lit_pixels(&color), 16);
    }

    #[test]
    fn fast_path_only_for_pure_translations() {
        assert!(translation_only(&Mat4::translation(3.0, 4.0, 0.0)));
        assert!(!translation_only(&Mat4::rotation_z(0.3)));
        assert!(!translation_only(&Mat4::scaling(2.0, 1.0, 1.0)));
    }

    #[test]
    fn translated_sprite_lands_at_offset() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let tex = Texture::solid(Vec2i::new(2, 2), Pixel::WHITE).unwrap();
        let sprite = Sprite::new(tex, Mat4::translation(10.0, 12.0, 0.0));

        draw_sprite(&mut fb, &sprite, Mat4::identity());
        assert_eq!(fb.get_pixel(Vec2i::new(10, 12)), Some(Pixel::WHITE));
        assert_eq!(fb.get_pixel(Vec2i::new(11, 13)), Some(Pixel::WHITE));
        assert_eq!(fb.get_pixel(Vec2i::new(9, 12)), Some(Pixel::BLACK));
    }

    #[test]
    fn scaled_sprite_covers_scaled_area() {
        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, Vec2i::new(W, H));
        let tex = Texture::solid(Vec2i::new(4, 4), Pixel::WHITE).unwrap();
        let sprite = Sprite::new(tex, Mat4::scaling(3.0, 3.0, 1.0));

        draw_sprite(&mut fb, &sprite, Mat4::identity());
        let lit = lit_pixels(&color);
        assert!(lit >= 11 * 11 && lit <= 12 * 12, "got {lit}");
    }
}
