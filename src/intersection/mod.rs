//! Narrow phase: AABB rejection, GJK, EPA and contact generation.
//!
//! [`collide`] runs the whole pipeline on a pair of shapes. The individual
//! stages are exposed too, for callers that want to stop early (a trigger
//! volume only needs [`test_overlap`]) or feed their own support maps to
//! [`gjk()`] and [`epa()`].
//!
//! Conventions: the MTV of a pair `(a, b)` separates them when `a` is moved
//! by `-mtv`, or `b` by `mtv`. Touching shapes do not intersect.

mod contact;
mod epa;
mod gjk;

pub use contact::*;
pub use epa::{epa, Mtv};
pub use gjk::{gjk, Simplex};

use crate::config::{ContactStrategy, NarrowPhaseConfig};
use crate::math::Vec2;
use crate::shape::{Circle, GenericShape, Polygon, ShapeKind, VertexStorage};

/// Something with a support function, the only thing GJK and EPA look at.
pub trait SupportMap {
    /// Farthest point along `direction`.
    fn support_point(&self, direction: Vec2) -> Vec2;

    /// Any point inside, used to seed the search direction.
    fn centroid(&self) -> Vec2;
}

impl<S: VertexStorage> SupportMap for GenericShape<S> {
    fn support_point(&self, direction: Vec2) -> Vec2 {
        GenericShape::support_point(self, direction)
    }

    fn centroid(&self) -> Vec2 {
        GenericShape::centroid(self)
    }
}

impl SupportMap for Circle {
    fn support_point(&self, direction: Vec2) -> Vec2 {
        Circle::support_point(self, direction)
    }

    fn centroid(&self) -> Vec2 {
        self.center()
    }
}

impl<S: VertexStorage> SupportMap for Polygon<S> {
    fn support_point(&self, direction: Vec2) -> Vec2 {
        Polygon::support_point(self, direction)
    }

    fn centroid(&self) -> Vec2 {
        Polygon::centroid(self)
    }
}

/// Support point of the Minkowski difference `a - b`.
#[inline]
pub(crate) fn minkowski_support<A, B>(a: &A, b: &B, direction: Vec2) -> Vec2
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    a.support_point(direction) - b.support_point(-direction)
}

/// Result of a positive [`collide`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Manifold {
    pub mtv: Mtv,
    pub contacts: ContactSet,
}

/// Broad phase: do the bounding boxes overlap.
pub fn may_intersect<S1, S2>(a: &GenericShape<S1>, b: &GenericShape<S2>) -> bool
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    a.bounding_box().overlaps(&b.bounding_box())
}

/// GJK on a pair of shapes, without any broad phase.
pub fn test_overlap<S1, S2>(
    a: &GenericShape<S1>,
    b: &GenericShape<S2>,
    config: &NarrowPhaseConfig,
) -> Option<Simplex>
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    gjk(a, b, config.gjk_max_iterations)
}

/// EPA seeded by the simplex of [`test_overlap`].
pub fn penetration<S1, S2>(
    a: &GenericShape<S1>,
    b: &GenericShape<S2>,
    simplex: &Simplex,
    config: &NarrowPhaseConfig,
) -> Option<Mtv>
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    epa(
        a,
        b,
        simplex,
        config.epa_threshold,
        config.epa_max_iterations,
    )
}

/// Full overlap test with the cheapest route for the pair: AABB rejection
/// first, then a distance check for two circles or GJK otherwise.
pub fn intersects<S1, S2>(
    a: &GenericShape<S1>,
    b: &GenericShape<S2>,
    config: &NarrowPhaseConfig,
) -> bool
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    if !may_intersect(a, b) {
        return false;
    }
    match (a.kind(), b.kind()) {
        (ShapeKind::Circle(c1), ShapeKind::Circle(c2)) => circles_intersect(c1, c2),
        _ => test_overlap(a, b, config).is_some(),
    }
}

/// MTV of the pair, `None` if they don't intersect.
pub fn mtv<S1, S2>(
    a: &GenericShape<S1>,
    b: &GenericShape<S2>,
    config: &NarrowPhaseConfig,
) -> Option<Mtv>
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    if !may_intersect(a, b) {
        return None;
    }
    match (a.kind(), b.kind()) {
        (ShapeKind::Circle(c1), ShapeKind::Circle(c2)) => circle_mtv(c1, c2),
        _ => {
            let simplex = test_overlap(a, b, config)?;
            penetration(a, b, &simplex, config)
        }
    }
}

/// Contact points of an intersecting pair whose MTV is `mtv`.
///
/// Circles get their single boundary point along the MTV. Two polygons go
/// through the configured [`ContactStrategy`]; clipping falls back to the
/// support point heuristic when it keeps no point.
pub fn contact_points<S1, S2>(
    a: &GenericShape<S1>,
    b: &GenericShape<S2>,
    mtv: &Mtv,
    config: &NarrowPhaseConfig,
) -> ContactSet
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    let m = mtv.vector();
    match (a.kind(), b.kind()) {
        (ShapeKind::Circle(c1), ShapeKind::Circle(c2)) => {
            ContactSet::single(circle_contact_points(c1, c2))
        }
        (ShapeKind::Circle(c), ShapeKind::Polygon(_)) => {
            let point_a = c.support_point(m);
            ContactSet::single(ContactPoint {
                point_a,
                point_b: point_a - m,
            })
        }
        (ShapeKind::Polygon(_), ShapeKind::Circle(c)) => {
            let point_b = c.support_point(-m);
            ContactSet::single(ContactPoint {
                point_a: point_b + m,
                point_b,
            })
        }
        (ShapeKind::Polygon(p1), ShapeKind::Polygon(p2)) => {
            if config.contact_strategy == ContactStrategy::Clipping {
                let set = clipping_manifold(p1, p2, mtv);
                if !set.is_empty() {
                    return set;
                }
                log::debug!("clipping kept no contact point, using support points");
            }
            ContactSet::single(support_contact_points(a, b, mtv))
        }
    }
}

/// Broad phase, narrow phase and contact generation in one call.
///
/// ```rust
/// use convex2d::{collide, NarrowPhaseConfig, Shape, Transform, math::vec2, shape::polygon};
///
/// let a = Shape::polygon(Transform::default(), &polygon::square(1.0));
/// let b = Shape::polygon(Transform::at(vec2(0.5, 0.0)), &polygon::square(1.0));
///
/// let manifold = collide(&a, &b, &NarrowPhaseConfig::default()).unwrap();
/// assert!((manifold.mtv.depth() - 0.5).abs() < 1e-3);
/// assert_eq!(manifold.contacts.len(), 2);
/// ```
pub fn collide<S1, S2>(
    a: &GenericShape<S1>,
    b: &GenericShape<S2>,
    config: &NarrowPhaseConfig,
) -> Option<Manifold>
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    let mtv = mtv(a, b, config)?;
    Some(Manifold {
        mtv,
        contacts: contact_points(a, b, &mtv, config),
    })
}
