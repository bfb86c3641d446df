//! Small vector helpers on top of euclid's 2D types.
//!
//! Every near-zero comparison in the crate goes through [`EPSILON`], and
//! every face alignment tie-break through [`FACE_TOLERANCE`], so that
//! tolerance decisions are made in one place.

use euclid::default::{Point2D, Transform2D, Vector2D};

pub type Vec2 = Vector2D<f32>;
pub type Matrix = Transform2D<f32>;

/// Tolerance used for every "is this basically zero" test.
pub const EPSILON: f32 = 1.0e-6;

/// How much better aligned with the MTV a face of the second shape must be
/// before it replaces the first shape's face as clipping reference.
pub const FACE_TOLERANCE: f32 = 1.0e-3;

#[inline]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

#[inline]
pub fn approx_zero(x: f32) -> bool {
    x.abs() <= EPSILON
}

#[inline]
pub fn approx_zero_vec(v: Vec2) -> bool {
    approx_zero(v.x) && approx_zero(v.y)
}

/// Unit vector along `v`, `None` when `v` is too short to have a direction.
#[inline]
pub fn try_normalize(v: Vec2) -> Option<Vec2> {
    let len = v.length();
    if len <= EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Scalar z component of the 3D cross product of `a` and `b`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// `(a × b) × c`, with both cross products taken in 3D and the result
/// projected back to the plane.
#[inline]
pub fn triple_cross(a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    let crs = cross(a, b);
    vec2(-c.y * crs, c.x * crs)
}

/// Right-hand perpendicular. For a counter-clockwise polygon this turns an
/// edge into its outward normal.
#[inline]
pub fn right_perp(v: Vec2) -> Vec2 {
    vec2(v.y, -v.x)
}

#[inline]
pub fn transform_point(m: &Matrix, p: Vec2) -> Vec2 {
    m.transform_point(Point2D::new(p.x, p.y)).to_vector()
}

#[inline]
pub fn transform_vector(m: &Matrix, v: Vec2) -> Vec2 {
    m.transform_vector(v)
}

/// Vector going from `p` to the closest point of the segment `[p1, p2]`.
pub fn towards_segment_from(p1: Vec2, p2: Vec2, p: Vec2) -> Vec2 {
    let seg = p2 - p1;
    let len2 = seg.square_length();
    let interp = if approx_zero(len2) {
        0.0
    } else {
        ((p - p1).dot(seg) / len2).clamp(0.0, 1.0)
    };
    p1 + seg * interp - p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_sign() {
        assert_eq!(cross(vec2(1.0, 0.0), vec2(0.0, 1.0)), 1.0);
        assert_eq!(cross(vec2(0.0, 1.0), vec2(1.0, 0.0)), -1.0);
    }

    #[test]
    fn triple_cross_points_to_origin() {
        // A = (1, 1) is the newest point, B = (1, -1)
        let ab = vec2(0.0, -2.0);
        let ao = vec2(-1.0, -1.0);
        let d = triple_cross(ab, ao, ab);
        assert!(d.x < 0.0);
        assert!(approx_zero(d.y));
    }

    #[test]
    fn segment_projection_clamps() {
        let a = vec2(0.0, 0.0);
        let b = vec2(2.0, 0.0);
        assert_eq!(towards_segment_from(a, b, vec2(1.0, 3.0)), vec2(0.0, -3.0));
        assert_eq!(towards_segment_from(a, b, vec2(-1.0, 0.0)), vec2(1.0, 0.0));
        assert_eq!(towards_segment_from(a, b, vec2(5.0, 1.0)), vec2(-3.0, -1.0));
        // degenerate segment
        assert_eq!(towards_segment_from(a, a, vec2(1.0, 1.0)), vec2(-1.0, -1.0));
    }
}
