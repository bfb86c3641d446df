use super::gjk::Simplex;
use super::{minkowski_support, SupportMap};
use crate::math::{cross, right_perp, try_normalize, Vec2};

/// Minimum translation vector between two overlapping shapes.
///
/// Moving the first shape by `-vector()` (or the second by `vector()`)
/// separates them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mtv(Vec2);

impl Mtv {
    /// `None` for a zero vector, which cannot separate anything.
    pub fn new(vector: Vec2) -> Option<Self> {
        try_normalize(vector)?;
        Some(Self(vector))
    }

    pub fn vector(&self) -> Vec2 {
        self.0
    }

    /// Penetration depth.
    pub fn depth(&self) -> f32 {
        self.0.length()
    }

    /// Unit direction, pointing from the first shape towards the second.
    pub fn normal(&self) -> Vec2 {
        self.0 / self.depth()
    }
}

/// Expanding polytope algorithm, seeded with the simplex of a positive [`super::gjk()`].
///
/// The polytope grows towards its closest edge to the origin until a new
/// support point improves the distance by at most `threshold`. Running out
/// of `max_iterations`, or ending with a zero vector, gives `None`.
pub fn epa<A, B>(
    a: &A,
    b: &B,
    simplex: &Simplex,
    threshold: f32,
    max_iterations: usize,
) -> Option<Mtv>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let mut polytope = counter_clockwise(simplex.points());

    for iteration in 0..max_iterations {
        let (normal, distance, insert_at) = closest_edge(&polytope)?;

        let support = minkowski_support(a, b, normal);
        let support_distance = normal.dot(support);
        if (support_distance - distance).abs() <= threshold {
            log::trace!(
                "epa converged in {} iterations, depth {}",
                iteration,
                distance
            );
            return Mtv::new(normal * distance);
        }
        polytope.insert(insert_at, support);
    }
    log::debug!(
        "epa did not converge in {} iterations ({} vertices)",
        max_iterations,
        polytope.len()
    );
    None
}

/// Polytope seeded from `points`, reversed if they wind clockwise.
///
/// Splitting an edge in place keeps the winding, so every edge normal can be
/// taken on the right side, including edges passing through the origin.
fn counter_clockwise(points: &[Vec2]) -> Vec<Vec2> {
    let mut polytope = points.to_vec();
    let twice_area: f32 = (0..polytope.len())
        .map(|i| cross(polytope[i], polytope[(i + 1) % polytope.len()]))
        .sum();
    if twice_area < 0.0 {
        polytope.reverse();
    }
    polytope
}

/// Outward normal and distance of the polytope edge closest to the origin,
/// with the index a new vertex splitting that edge goes to.
/// The polytope must be counter-clockwise.
fn closest_edge(polytope: &[Vec2]) -> Option<(Vec2, f32, usize)> {
    let mut closest = None;
    let mut min_distance = f32::INFINITY;
    for i in 0..polytope.len() {
        let j = (i + 1) % polytope.len();
        let (p1, p2) = (polytope[i], polytope[j]);
        let Some(normal) = try_normalize(right_perp(p2 - p1)) else {
            continue;
        };
        let distance = normal.dot(p1).max(0.0);
        if distance < min_distance {
            min_distance = distance;
            closest = Some((normal, distance, j));
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    #[test]
    fn mtv_accessors() {
        let m = Mtv::new(vec2(0.0, -2.0)).unwrap();
        assert_eq!(m.depth(), 2.0);
        assert_eq!(m.normal(), vec2(0.0, -1.0));
        assert_eq!(m.vector(), vec2(0.0, -2.0));
        assert!(Mtv::new(Vec2::zero()).is_none());
    }

    #[test]
    fn closest_edge_of_shifted_square() {
        let ccw = [
            vec2(0.5, -1.0),
            vec2(0.5, 1.0),
            vec2(-1.5, 1.0),
            vec2(-1.5, -1.0),
        ];
        let (normal, distance, at) = closest_edge(&ccw).unwrap();
        assert_eq!(normal, vec2(1.0, 0.0));
        assert_eq!(distance, 0.5);
        assert_eq!(at, 1);
    }

    #[test]
    fn clockwise_simplex_is_reversed() {
        let cw = [vec2(0.5, 1.0), vec2(-1.0, -2.0), vec2(-1.0, 2.0)];
        let polytope = counter_clockwise(&cw);
        assert_eq!(
            polytope,
            vec![vec2(-1.0, 2.0), vec2(-1.0, -2.0), vec2(0.5, 1.0)]
        );
        assert_eq!(counter_clockwise(&polytope), polytope);
    }

    #[test]
    fn origin_on_edge_keeps_outward_normal() {
        // the origin lies on the edge from (-1, -2) to (0.5, 1)
        let polytope = counter_clockwise(&[vec2(0.5, 1.0), vec2(-1.0, -2.0), vec2(-1.0, 2.0)]);
        let (normal, distance, at) = closest_edge(&polytope).unwrap();
        assert_eq!(distance, 0.0);
        assert_eq!(at, 2);
        // outward: the third vertex is behind the edge
        assert!(normal.dot(vec2(-1.0, 2.0)) < 0.0);
        assert!(normal.x > 0.0 && normal.y < 0.0);
    }

    #[test]
    fn closest_edge_skips_degenerate() {
        let p = [vec2(1.0, 1.0), vec2(1.0, 1.0), vec2(-1.0, 0.0)];
        let (_, distance, _) = closest_edge(&p).unwrap();
        assert!(distance.is_finite());
        assert!(closest_edge(&[vec2(1.0, 1.0), vec2(1.0, 1.0)]).is_none());
    }
}
