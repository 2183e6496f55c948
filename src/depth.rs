//! Depth buffer storage with build-time configurable precision.
//!
//! Each cell is a single unsigned integer (32-bit by default, 16 or 8 with
//! the `depth-16`/`depth-8` features). A normalized depth in [0, 1] maps
//! linearly onto the full integer range.
//!
//! Convention: **larger stored value = nearer to the camera**. The rasterizer
//! stores `1 - depth`, so a zero-filled buffer reads as infinitely far and
//! closer surfaces overwrite farther ones with a strict greater-than test.

#[cfg(all(feature = "depth-8", feature = "depth-16"))]
compile_error!("depth precision features are mutually exclusive");

#[cfg(feature = "depth-8")]
type DepthUnit = u8;
#[cfg(feature = "depth-16")]
type DepthUnit = u16;
#[cfg(not(any(feature = "depth-8", feature = "depth-16")))]
type DepthUnit = u32;

/// One depth buffer cell.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Depth {
    d: DepthUnit,
}

impl Depth {
    /// The value a cleared buffer holds: infinitely far.
    pub const FAR: Self = Self { d: 0 };
}

/// Quantizes a normalized depth in [0, 1] to the stored integer range.
#[inline]
fn quantize(value: f32) -> DepthUnit {
    (value.clamp(0.0, 1.0) as f64 * DepthUnit::MAX as f64) as DepthUnit
}

/// Resets every cell to infinitely far.
pub fn clear(buffer: &mut [Depth]) {
    buffer.fill(Depth::FAR);
}

/// Returns true if `value` is strictly nearer than the stored cell at `idx`.
///
/// `value` is expected in the inverted `1 - depth` convention, so nearer
/// surfaces carry larger values.
#[inline]
pub fn check(buffer: &[Depth], idx: usize, value: f32) -> bool {
    quantize(value) > buffer[idx].d
}

/// Stores `value` (inverted convention) at `idx`.
#[inline]
pub fn write(buffer: &mut [Depth], idx: usize, value: f32) {
    buffer[idx].d = quantize(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_buffer_is_infinitely_far() {
        let mut buf = vec![Depth::FAR; 4];
        write(&mut buf, 2, 0.5);
        clear(&mut buf);
        assert!(buf.iter().all(|d| *d == Depth::FAR));
    }

    #[test]
    fn nearer_value_passes_check() {
        let mut buf = vec![Depth::FAR; 1];
        assert!(check(&buf, 0, 0.5));
        write(&mut buf, 0, 0.5);
        // 0.8 is nearer under the inverted convention.
        assert!(check(&buf, 0, 0.8));
        // Equal or farther values fail the strict test.
        assert!(!check(&buf, 0, 0.5));
        assert!(!check(&buf, 0, 0.2));
    }

    #[test]
    fn values_clamp_to_unit_range() {
        let mut buf = vec![Depth::FAR; 1];
        write(&mut buf, 0, 2.0);
        assert!(!check(&buf, 0, 1.0));
    }
}
