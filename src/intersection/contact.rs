use super::epa::Mtv;
use crate::math::{try_normalize, vec2, Vec2, FACE_TOLERANCE};
use crate::shape::{Circle, GenericShape, Polygon, VertexStorage};

/// Maximum number of points in a [`ContactSet`].
pub const MAX_CONTACTS: usize = 2;

/// One point of contact, seen from both shapes.
///
/// `point_a` lies on the first shape and `point_b` on the second, with
/// `point_a - point_b` equal to the MTV of the pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactPoint {
    pub point_a: Vec2,
    pub point_b: Vec2,
}

impl ContactPoint {
    fn from_b(point_b: Vec2, mtv: Vec2) -> Self {
        Self {
            point_a: point_b + mtv,
            point_b,
        }
    }

    fn from_a(point_a: Vec2, mtv: Vec2) -> Self {
        Self {
            point_a,
            point_b: point_a - mtv,
        }
    }
}

/// Up to [`MAX_CONTACTS`] contact points, stored inline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSet {
    points: [ContactPoint; MAX_CONTACTS],
    len: usize,
}

impl Default for ContactSet {
    fn default() -> Self {
        let zero = ContactPoint {
            point_a: Vec2::zero(),
            point_b: Vec2::zero(),
        };
        Self {
            points: [zero; MAX_CONTACTS],
            len: 0,
        }
    }
}

impl ContactSet {
    pub fn single(point: ContactPoint) -> Self {
        let mut set = Self::default();
        set.push(point);
        set
    }

    /// Silently ignores points past [`MAX_CONTACTS`].
    fn push(&mut self, point: ContactPoint) {
        if self.len < MAX_CONTACTS {
            self.points[self.len] = point;
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<&ContactPoint> {
        self.as_slice().get(index)
    }

    pub fn as_slice(&self) -> &[ContactPoint] {
        &self.points[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContactPoint> + '_ {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a ContactSet {
    type Item = &'a ContactPoint;
    type IntoIter = std::slice::Iter<'a, ContactPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Strict: tangent circles do not intersect.
pub fn circles_intersect(c1: &Circle, c2: &Circle) -> bool {
    let r = c1.radius() + c2.radius();
    (c1.center() - c2.center()).square_length() < r * r
}

/// `None` when the circles do not intersect. Concentric circles are pushed
/// apart along x.
pub fn circle_mtv(c1: &Circle, c2: &Circle) -> Option<Mtv> {
    if !circles_intersect(c1, c2) {
        return None;
    }
    let dir = c1.center() - c2.center();
    let normal = try_normalize(dir).unwrap_or(vec2(1.0, 0.0));
    Mtv::new(dir - normal * (c1.radius() + c2.radius()))
}

/// Points of each circle that reach deepest into the other.
pub fn circle_contact_points(c1: &Circle, c2: &Circle) -> ContactPoint {
    let normal = try_normalize(c1.center() - c2.center()).unwrap_or(vec2(1.0, 0.0));
    ContactPoint {
        point_a: c1.center() - normal * c1.radius(),
        point_b: c2.center() + normal * c2.radius(),
    }
}

/// Single contact pair taken from the support points along the MTV.
///
/// Both shapes propose their deepest point, projected onto the other shape
/// with the MTV. The proposal landing closest to the other shape's boundary
/// wins.
pub fn support_contact_points<S1, S2>(
    a: &GenericShape<S1>,
    b: &GenericShape<S2>,
    mtv: &Mtv,
) -> ContactPoint
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    let mtv = mtv.vector();
    let sup_a = a.support_point(mtv);
    let sup_b = b.support_point(-mtv);

    let da = b.closest_direction_from(sup_a - mtv).square_length();
    let db = a.closest_direction_from(sup_b + mtv).square_length();
    if da < db {
        ContactPoint::from_a(sup_a, mtv)
    } else {
        ContactPoint::from_b(sup_b, mtv)
    }
}

/// Contact manifold of two overlapping polygons.
///
/// The reference edge is the one most aligned with the MTV, the incident edge
/// is the edge of the other polygon most opposed to it. The incident edge is
/// clipped to the side planes of the reference edge, and points in front of
/// the reference face are dropped. Can come back empty on degenerate input.
pub fn clipping_manifold<S1, S2>(a: &Polygon<S1>, b: &Polygon<S2>, mtv: &Mtv) -> ContactSet
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    let n = mtv.normal();
    let (ia, align_a) = most_aligned_edge(a.normals(), n);
    let (ib, align_b) = most_aligned_edge(b.normals(), -n);

    // near ties keep `a` as the reference
    let flip = align_b > align_a + FACE_TOLERANCE;
    let clipped = if flip {
        clip_incident(b, ib, a)
    } else {
        clip_incident(a, ia, b)
    };

    let mut set = ContactSet::default();
    for p in clipped.into_iter().flatten() {
        let point = if flip {
            // incident points lie on `a`
            ContactPoint::from_a(p, mtv.vector())
        } else {
            ContactPoint::from_b(p, mtv.vector())
        };
        set.push(point);
    }
    set
}

fn most_aligned_edge(normals: &[Vec2], dir: Vec2) -> (usize, f32) {
    let mut best = (0, f32::NEG_INFINITY);
    for (i, normal) in normals.iter().enumerate() {
        let d = normal.dot(dir);
        if d > best.1 {
            best = (i, d);
        }
    }
    best
}

/// Incident points behind the reference face `reference_edge` of `reference`.
fn clip_incident<S1, S2>(
    reference: &Polygon<S1>,
    reference_edge: usize,
    incident: &Polygon<S2>,
) -> [Option<Vec2>; MAX_CONTACTS]
where
    S1: VertexStorage,
    S2: VertexStorage,
{
    let mut out = [None; MAX_CONTACTS];

    let ref_normal = reference.normal(reference_edge);
    let v1 = reference.global(reference_edge);
    let v2 = reference.global(reference_edge + 1);
    let Some(tangent) = try_normalize(v2 - v1) else {
        return out;
    };

    let mut inc_edge = 0;
    let mut min_dot = f32::INFINITY;
    for (i, normal) in incident.normals().iter().enumerate() {
        let d = normal.dot(ref_normal);
        if d < min_dot {
            min_dot = d;
            inc_edge = i;
        }
    }
    let segment = [incident.global(inc_edge), incident.global(inc_edge + 1)];

    // side planes of the reference edge
    let Some(segment) = clip_segment(segment, -tangent, -tangent.dot(v1)) else {
        return out;
    };
    let Some(segment) = clip_segment(segment, tangent, tangent.dot(v2)) else {
        return out;
    };

    let front = ref_normal.dot(v1);
    let mut k = 0;
    for p in segment {
        if ref_normal.dot(p) - front <= 0.0 {
            out[k] = Some(p);
            k += 1;
        }
    }
    out
}

/// Keeps the part of `segment` where `dot(normal, p) <= offset`. `None` when
/// less than two points remain.
fn clip_segment(segment: [Vec2; 2], normal: Vec2, offset: f32) -> Option<[Vec2; 2]> {
    let [p1, p2] = segment;
    let d1 = normal.dot(p1) - offset;
    let d2 = normal.dot(p2) - offset;

    let mut out = [Vec2::zero(); 2];
    let mut len = 0;
    if d1 <= 0.0 {
        out[len] = p1;
        len += 1;
    }
    if d2 <= 0.0 {
        out[len] = p2;
        len += 1;
    }
    if d1 * d2 < 0.0 && len < 2 {
        out[len] = p1 + (p2 - p1) * (d1 / (d1 - d2));
        len += 1;
    }
    (len == 2).then_some(out)
}
