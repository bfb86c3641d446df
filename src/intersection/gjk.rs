use super::{minkowski_support, SupportMap};
use crate::math::{approx_zero_vec, triple_cross, vec2, Vec2};

/// Up to three points of the Minkowski difference `A - B`, newest last.
///
/// When [`gjk`] reports an overlap the simplex is a triangle enclosing the
/// origin, ready to seed [`super::epa()`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Simplex {
    points: [Vec2; 3],
    len: usize,
}

impl Simplex {
    fn new(first: Vec2) -> Self {
        Self {
            points: [first, Vec2::zero(), Vec2::zero()],
            len: 1,
        }
    }

    fn push(&mut self, p: Vec2) {
        debug_assert!(self.len < 3);
        self.points[self.len] = p;
        self.len += 1;
    }

    fn erase(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.points.copy_within(index + 1..self.len, index);
        self.len -= 1;
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Boolean GJK on the Minkowski difference of `a` and `b`.
///
/// Returns the enclosing simplex when the shapes overlap. Touching shapes
/// count as separated. Gives up after `max_iterations` support evaluations,
/// which is reported as no overlap.
pub fn gjk<A, B>(a: &A, b: &B, max_iterations: usize) -> Option<Simplex>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let mut dir = b.centroid() - a.centroid();
    if approx_zero_vec(dir) {
        dir = vec2(1.0, 0.0);
    }

    let first = minkowski_support(a, b, dir);
    let mut simplex = Simplex::new(first);
    dir = -first;

    for _ in 0..max_iterations {
        let support = minkowski_support(a, b, dir);
        if support.dot(dir) <= 0.0 {
            return None;
        }
        simplex.push(support);
        match evolve(&mut simplex) {
            Some(next) => dir = next,
            None => return Some(simplex),
        }
    }
    log::debug!("gjk gave up after {} iterations", max_iterations);
    None
}

/// Next search direction, or `None` when the triangle encloses the origin.
fn evolve(simplex: &mut Simplex) -> Option<Vec2> {
    match simplex.len {
        2 => {
            let [b, a, _] = simplex.points;
            let ab = b - a;
            let ao = -a;
            let dir = triple_cross(ab, ao, ab);
            // origin on the segment's line, any side will do
            if approx_zero_vec(dir) {
                return Some(vec2(-ab.y, ab.x));
            }
            Some(dir)
        }
        3 => {
            let [c, b, a] = simplex.points;
            let ab = b - a;
            let ac = c - a;
            let ao = -a;

            let ab_perp = triple_cross(ac, ab, ab);
            if ab_perp.dot(ao) >= 0.0 {
                simplex.erase(0);
                return Some(ab_perp);
            }
            let ac_perp = triple_cross(ab, ac, ac);
            if ac_perp.dot(ao) >= 0.0 {
                simplex.erase(1);
                return Some(ac_perp);
            }
            None
        }
        _ => unreachable!("gjk simplex always holds 2 or 3 points when evolving"),
    }
}
