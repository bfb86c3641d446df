use crate::math::{vec2, Vec2};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Axis-aligned bounding box.
///
/// `a + b` is the union of two boxes and `a - b` their intersection. The
/// intersection of two boxes that do not [`overlap`](AABB::overlaps) is not a
/// valid box (`min > max` on some axis), check before using it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    /// Lower left of the AABB
    pub min: Vec2,
    /// Upper right of the AABB
    pub max: Vec2,
}

impl Default for AABB {
    fn default() -> Self {
        Self::from_point(Vec2::zero())
    }
}

impl AABB {
    /// Builds a box from its corners. `min` must be componentwise lower or
    /// equal to `max`, a violation is reported and left as is.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        let bb = AABB { min, max };
        if !bb.is_valid() {
            log::warn!(
                "AABB min ({}, {}) is greater than max ({}, {})",
                min.x,
                min.y,
                max.x,
                max.y
            );
        }
        bb
    }

    /// Box spanned by any two opposite corners.
    pub fn from_corners(p1: Vec2, p2: Vec2) -> Self {
        AABB {
            min: p1.min(p2),
            max: p1.max(p2),
        }
    }

    /// Zero area box around a single point.
    pub fn from_point(p: Vec2) -> Self {
        AABB { min: p, max: p }
    }

    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        let mut bb = Self::from_point(center);
        bb.bound_circle(center, radius);
        bb
    }

    /// Smallest box holding every vertex, `None` if there are none.
    pub fn from_vertices(vertices: &[Vec2]) -> Option<Self> {
        let (first, _) = vertices.split_first()?;
        let mut bb = Self::from_point(*first);
        bb.bound_vertices(vertices);
        Some(bb)
    }

    /// Refits this box around `vertices`. An empty slice leaves it untouched.
    pub fn bound_vertices(&mut self, vertices: &[Vec2]) {
        let Some((first, rest)) = vertices.split_first() else {
            return;
        };
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        self.min = min;
        self.max = max;
    }

    pub fn bound_circle(&mut self, center: Vec2, radius: f32) {
        let r = vec2(radius, radius);
        self.min = center - r;
        self.max = center + r;
    }

    pub fn dimension(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }

    /// Inclusive: boxes sharing an edge or a corner overlap.
    pub fn overlaps(&self, b: &AABB) -> bool {
        let a = self;
        let df1 = b.min - a.max;
        let df2 = a.min - b.max;
        !(df1.x > 0.0 || df1.y > 0.0 || df2.x > 0.0 || df2.y > 0.0)
    }
}

impl Add for AABB {
    type Output = AABB;

    fn add(self, bb: AABB) -> AABB {
        AABB {
            min: self.min.min(bb.min),
            max: self.max.max(bb.max),
        }
    }
}

impl Sub for AABB {
    type Output = AABB;

    fn sub(self, bb: AABB) -> AABB {
        AABB {
            min: self.min.max(bb.min),
            max: self.max.min(bb.max),
        }
    }
}

impl AddAssign for AABB {
    fn add_assign(&mut self, bb: AABB) {
        *self = *self + bb;
    }
}

impl SubAssign for AABB {
    fn sub_assign(&mut self, bb: AABB) {
        *self = *self - bb;
    }
}

#[cfg(test)]
mod tests {
    use super::AABB;
    use crate::math::vec2;

    fn bb(x0: f32, y0: f32, x1: f32, y1: f32) -> AABB {
        AABB::new(vec2(x0, y0), vec2(x1, y1))
    }

    #[test]
    fn test_self_overlap() {
        let a = bb(-1.0, -2.0, 3.0, 4.0);
        assert!(a.overlaps(&a));
        let p = AABB::from_point(vec2(1.0, 1.0));
        assert!(p.overlaps(&p));
        assert!(p.is_valid());
    }

    #[test]
    fn test_touching_overlap() {
        let a = bb(0.0, 0.0, 1.0, 1.0);
        assert!(a.overlaps(&bb(1.0, 0.0, 2.0, 1.0)));
        assert!(a.overlaps(&bb(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.overlaps(&bb(1.01, 0.0, 2.0, 1.0)));
        assert!(!a.overlaps(&bb(0.0, -2.0, 1.0, -0.5)));
    }

    #[test]
    fn test_union() {
        let a = bb(0.0, 0.0, 1.0, 1.0);
        let b = bb(3.0, -1.0, 4.0, 0.5);
        let u = a + b;
        assert_eq!(u, b + a);
        assert_eq!(u, bb(0.0, -1.0, 4.0, 1.0));
        assert_eq!(u - a, a);
        assert_eq!(u - b, b);

        let mut c = a;
        c += b;
        assert_eq!(c, u);
    }

    #[test]
    fn test_intersection() {
        let a = bb(0.0, 0.0, 2.0, 2.0);
        let b = bb(1.0, 1.0, 3.0, 3.0);
        assert_eq!(a - b, bb(1.0, 1.0, 2.0, 2.0));

        let far = bb(5.0, 5.0, 6.0, 6.0);
        assert!(!a.overlaps(&far));
        assert!(!(a - far).is_valid());

        let mut c = a;
        c -= b;
        assert_eq!(c.dimension(), vec2(1.0, 1.0));
    }

    #[test]
    fn test_bounds() {
        let verts = [vec2(1.0, 2.0), vec2(-3.0, 0.5), vec2(0.0, -1.0)];
        let bb = AABB::from_vertices(&verts).unwrap();
        assert_eq!(bb.min, vec2(-3.0, -1.0));
        assert_eq!(bb.max, vec2(1.0, 2.0));
        assert!(AABB::from_vertices(&[]).is_none());

        let c = AABB::from_circle(vec2(1.0, 1.0), 2.0);
        assert_eq!(c.min, vec2(-1.0, -1.0));
        assert_eq!(c.dimension(), vec2(4.0, 4.0));
        assert!(c.contains(vec2(2.9, -0.9)));
    }
}
