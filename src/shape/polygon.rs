use crate::error::GeometryError;
use crate::math::{
    approx_zero, cross, right_perp, towards_segment_from, transform_point, try_normalize, vec2,
    Matrix, Vec2, EPSILON,
};
use crate::shape::vertices::{VertexStorage, Vertices};
use std::cmp::Ordering;
use std::f32::consts::PI;

/// Polygon variant of a shape.
///
/// Vertices are kept counter-clockwise in four parallel containers, all
/// indexed modulo the vertex count:
/// - `locals`: vertices after the shape's own transform (parent excluded)
/// - `globals`: world space vertices
/// - `edges`: `globals[i + 1] - globals[i]`
/// - `normals`: outward unit normal of `edges[i]`
///
/// A fifth, private container holds the centroid-relative model the others
/// are derived from.
#[derive(Clone, Debug)]
pub struct Polygon<S: VertexStorage = Vec<Vec2>> {
    model: Vertices<S>,
    locals: Vertices<S>,
    globals: Vertices<S>,
    edges: Vertices<S>,
    normals: Vertices<S>,
    centroid: Vec2,
}

/// Derived scalars computed once per vertex set.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Properties {
    /// Center of mass of the input vertices, in the input's frame.
    pub centroid: Vec2,
    pub area: f32,
    pub inertia: f32,
    pub convex: bool,
}

impl<S: VertexStorage> Polygon<S> {
    pub(crate) fn new(vertices: &[Vec2]) -> Result<(Self, Properties), GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        let mut model = Vertices::<S>::from_slice(vertices)?;
        sort_counter_clockwise(model.as_mut_slice());

        let centroid = center_of_mass(model.as_slice());
        for v in model.as_mut_slice() {
            *v -= centroid;
        }

        let area = area(model.as_slice());
        let props = Properties {
            centroid,
            area,
            inertia: inertia(model.as_slice(), area),
            convex: is_convex(model.as_slice()),
        };

        let poly = Polygon {
            locals: model.clone(),
            globals: model.clone(),
            edges: model.clone(),
            normals: model.clone(),
            model,
            centroid: Vec2::zero(),
        };
        Ok((poly, props))
    }

    pub(crate) fn on_transform_update(&mut self, local: &Matrix, global: &Matrix) {
        self.centroid = transform_point(global, Vec2::zero());
        for i in 0..self.len() {
            let m = self.model[i];
            self.locals.set(i, transform_point(local, m));
            self.globals.set(i, transform_point(global, m));
        }
        for i in 0..self.len() {
            let edge = self.globals[i + 1] - self.globals[i];
            self.edges.set(i, edge);
            // zero length edges get a zero normal instead of NaNs
            self.normals
                .set(i, try_normalize(right_perp(edge)).unwrap_or(Vec2::zero()));
        }
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Maximum vertex count of the storage, `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        S::CAPACITY
    }

    /// Global centroid.
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    pub fn local(&self, index: usize) -> Vec2 {
        self.locals[index]
    }

    pub fn global(&self, index: usize) -> Vec2 {
        self.globals[index]
    }

    pub fn edge(&self, index: usize) -> Vec2 {
        self.edges[index]
    }

    pub fn normal(&self, index: usize) -> Vec2 {
        self.normals[index]
    }

    pub fn locals(&self) -> &[Vec2] {
        self.locals.as_slice()
    }

    pub fn globals(&self) -> &[Vec2] {
        self.globals.as_slice()
    }

    pub fn edges(&self) -> &[Vec2] {
        self.edges.as_slice()
    }

    pub fn normals(&self) -> &[Vec2] {
        self.normals.as_slice()
    }

    /// Index of the vertex farthest along `direction`. On ties the lowest
    /// index wins.
    pub fn support_index(&self, direction: Vec2) -> usize {
        let globals = self.globals();
        let mut support = 0;
        let mut max_dot = direction.dot(globals[0] - self.centroid);
        for (i, v) in globals.iter().enumerate().skip(1) {
            let dot = direction.dot(*v - self.centroid);
            if dot > max_dot {
                max_dot = dot;
                support = i;
            }
        }
        support
    }

    pub fn support_point(&self, direction: Vec2) -> Vec2 {
        self.globals[self.support_index(direction)]
    }

    /// Inclusive on the boundary. Only meaningful for convex polygons.
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.normals()
            .iter()
            .zip(self.globals())
            .all(|(normal, v)| normal.dot(p - *v) <= 0.0)
    }

    /// Vector from `p` to the closest point on the polygon's boundary.
    pub fn closest_direction_from(&self, p: Vec2) -> Vec2 {
        let mut min_dist = f32::MAX;
        let mut closest = Vec2::zero();
        for i in 0..self.len() {
            let towards = towards_segment_from(self.globals[i], self.globals[i + 1], p);
            let dist = towards.square_length();
            if min_dist > dist {
                min_dist = dist;
                closest = towards;
            }
        }
        closest
    }
}

/// Sorts vertices counter-clockwise around their average, starting from the
/// first one.
///
/// Directions are compared by their angle to `vertices[0] - center`; points
/// collinear with that reference are resolved with the dot product, so the
/// order is stable even for degenerate input.
pub fn sort_counter_clockwise(vertices: &mut [Vec2]) {
    if vertices.is_empty() {
        return;
    }
    let center = center_of_vertices(vertices);
    let reference = vertices[0] - center;

    let precedes = |v1: Vec2, v2: Vec2| {
        let dir1 = v1 - center;
        let dir2 = v2 - center;

        let det2 = cross(reference, dir2);
        if approx_zero(det2) && reference.dot(dir2) >= 0.0 {
            return false;
        }
        let det1 = cross(reference, dir1);
        if approx_zero(det1) && reference.dot(dir1) >= 0.0 {
            return true;
        }
        if det1 * det2 >= 0.0 {
            return cross(dir1, dir2) > 0.0;
        }
        det1 > 0.0
    };

    vertices.sort_by(|a, b| {
        if precedes(*a, *b) {
            Ordering::Less
        } else if precedes(*b, *a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
}

pub fn center_of_vertices(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::zero();
    }
    let sum = vertices.iter().fold(Vec2::zero(), |acc, v| acc + *v);
    sum / vertices.len() as f32
}

/// Area centroid of a sorted polygon, by fan triangulation from vertex 0.
/// Falls back to the vertex average when the polygon has no area, which
/// includes fewer than 3 vertices.
pub fn center_of_mass(vertices: &[Vec2]) -> Vec2 {
    if vertices.len() < 3 {
        return center_of_vertices(vertices);
    }
    let p1 = vertices[0];
    let mut num = Vec2::zero();
    let mut den = 0.0;
    for w in vertices[1..].windows(2) {
        let e1 = w[0] - p1;
        let e2 = w[1] - p1;
        let crs = cross(e1, e2).abs();
        num += (e1 + e2) * crs;
        den += crs;
    }
    if approx_zero(den) {
        return center_of_vertices(vertices);
    }
    p1 + num / (3.0 * den)
}

/// Zero for fewer than 3 vertices.
pub fn area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let p1 = vertices[0];
    let twice: f32 = vertices[1..]
        .windows(2)
        .map(|w| cross(w[0] - p1, w[1] - p1).abs())
        .sum();
    0.5 * twice
}

/// Rotational inertia per unit mass about the origin, which must be the
/// centroid of `vertices`.
///
/// Each fan triangle `(p1, p2, p3)` is split at the foot `p4` of the height
/// from `p3` into two right triangles whose inertia is known in closed form,
/// then moved to the origin with the parallel axis theorem. Right triangles
/// falling outside the fan triangle (obtuse angle at `p2`) are subtracted.
pub fn inertia(vertices: &[Vec2], area: f32) -> f32 {
    if vertices.len() < 3 || approx_zero(area) {
        return 0.0;
    }
    let p1 = vertices[0];
    let mut inertia = 0.0;
    for w in vertices[1..].windows(2) {
        let (p2, p3) = (w[0], w[1]);
        let e1 = p1 - p2;
        let e2 = p3 - p2;

        let w = e1.length();
        if w <= EPSILON {
            continue;
        }
        let w1 = (e1.dot(e2) / w).abs();
        let w2 = (w - w1).abs();

        let h = cross(e2, e1).abs() / w;
        let p4 = p2 + e1 * (w1 / w);

        let i1 = w1 * h * (w1 * w1 / 3.0 + h * h) / 4.0;
        let i2 = w2 * h * (w2 * w2 / 3.0 + h * h) / 4.0;

        let m1 = 0.5 * w1 * h;
        let m2 = 0.5 * w2 * h;

        let cm1 = (p2 + p3 + p4) / 3.0;
        let cm2 = (p1 + p3 + p4) / 3.0;

        let icm1 = i1 + m1 * (cm1.square_length() - (cm1 - p3).square_length());
        let icm2 = i2 + m2 * (cm2.square_length() - (cm2 - p3).square_length());

        if cross(p1 - p3, p4 - p3) < 0.0 {
            inertia += icm1;
        } else {
            inertia -= icm1;
        }
        if cross(p4 - p3, p2 - p3) < 0.0 {
            inertia += icm2;
        } else {
            inertia -= icm2;
        }
    }
    inertia.abs() / area
}

/// No right turn between consecutive edges of a counter-clockwise polygon.
pub fn is_convex(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    (0..n).all(|i| {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        cross(b - a, c - b) >= -EPSILON
    })
}

/// Vertices of an axis aligned square centered on the origin.
pub fn square(size: f32) -> Vec<Vec2> {
    rect(size, size)
}

pub fn rect(width: f32, height: f32) -> Vec<Vec2> {
    let hw = 0.5 * width;
    let hh = 0.5 * height;
    vec![
        vec2(-hw, -hh),
        vec2(hw, -hh),
        vec2(hw, hh),
        vec2(-hw, hh),
    ]
}

/// Regular polygon inscribed in a circle of `radius`, first vertex on +y.
pub fn ngon(radius: f32, sides: u32) -> Vec<Vec2> {
    let dangle = 2.0 * PI / sides as f32;
    (0..sides)
        .map(|i| {
            let rotation = i as f32 * dangle;
            vec2(radius * rotation.sin(), radius * rotation.cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::vertices::FixedVertices;
    use approx::assert_relative_eq;

    fn signed_area(vertices: &[Vec2]) -> f32 {
        let n = vertices.len();
        let twice: f32 = (0..n)
            .map(|i| cross(vertices[i], vertices[(i + 1) % n]))
            .sum();
        0.5 * twice
    }

    fn shoelace(vertices: &[Vec2]) -> f32 {
        signed_area(vertices).abs()
    }

    fn build(vertices: &[Vec2]) -> (Polygon, Properties) {
        let (mut poly, props) = Polygon::<Vec<Vec2>>::new(vertices).unwrap();
        let m = Matrix::translation(props.centroid.x, props.centroid.y);
        poly.on_transform_update(&m, &m);
        (poly, props)
    }

    #[test]
    fn test_sort_shuffled_square() {
        let mut v = vec![
            vec2(1.0, 1.0),
            vec2(-1.0, -1.0),
            vec2(1.0, -1.0),
            vec2(-1.0, 1.0),
        ];
        sort_counter_clockwise(&mut v);
        assert_eq!(
            v,
            vec![
                vec2(1.0, 1.0),
                vec2(-1.0, 1.0),
                vec2(-1.0, -1.0),
                vec2(1.0, -1.0)
            ]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut v = vec![
            vec2(3.0, 0.5),
            vec2(0.0, 2.0),
            vec2(-1.0, -1.0),
            vec2(2.0, -2.0),
            vec2(-2.0, 1.0),
            vec2(1.0, 3.0),
        ];
        sort_counter_clockwise(&mut v);
        let once = v.clone();
        sort_counter_clockwise(&mut v);
        assert_eq!(v, once);
        assert!(signed_area(&v) > 0.0);
    }

    #[test]
    fn test_sort_collinear_with_reference() {
        // (-1, 0) is collinear with the reference direction but points backwards
        let mut v = vec![
            vec2(1.0, 0.0),
            vec2(-1.0, 0.0),
            vec2(0.0, 1.0),
            vec2(0.0, -1.0),
        ];
        sort_counter_clockwise(&mut v);
        assert_eq!(
            v,
            vec![
                vec2(1.0, 0.0),
                vec2(0.0, 1.0),
                vec2(-1.0, 0.0),
                vec2(0.0, -1.0)
            ]
        );
    }

    #[test]
    fn test_square_properties() {
        let (poly, props) = build(&square(1.0));
        assert_relative_eq!(props.area, 1.0);
        assert_relative_eq!(props.inertia, 1.0 / 6.0, epsilon = 1e-6);
        assert!(props.convex);
        assert_eq!(props.centroid, Vec2::zero());
        assert_eq!(poly.len(), 4);
        assert_eq!(poly.capacity(), None);
    }

    #[test]
    fn test_triangle_properties() {
        let tri = [vec2(0.0, 0.0), vec2(4.0, 0.0), vec2(0.0, 3.0)];
        let (poly, props) = build(&tri);
        assert_relative_eq!(props.area, 6.0, epsilon = 1e-5);
        assert_relative_eq!(props.area, shoelace(&tri), epsilon = 1e-5);
        assert_relative_eq!(props.centroid.x, 4.0 / 3.0, epsilon = 1e-5);
        assert_relative_eq!(props.centroid.y, 1.0, epsilon = 1e-5);
        // (a² + b²) / 18 for a right triangle with legs a, b
        assert_relative_eq!(props.inertia, 25.0 / 18.0, epsilon = 1e-4);
        assert!(poly.contains_point(props.centroid));
    }

    #[test]
    fn test_rect_inertia() {
        let (_, props) = build(&rect(2.0, 1.0));
        assert_relative_eq!(props.inertia, 5.0 / 12.0, epsilon = 1e-5);
    }

    #[test]
    fn test_area_matches_shoelace() {
        let v = [
            vec2(3.0, 0.5),
            vec2(0.0, 2.0),
            vec2(-1.0, -1.0),
            vec2(2.0, -2.0),
        ];
        let (_, props) = build(&v);
        assert_relative_eq!(props.area, shoelace(&v), epsilon = 1e-4);
    }

    #[test]
    fn test_ngon_is_convex() {
        for sides in 3..12 {
            let (poly, props) = build(&ngon(2.0, sides));
            assert!(props.convex, "{} sides", sides);
            assert!(poly.contains_point(poly.centroid()));
        }
    }

    #[test]
    fn test_concave() {
        // arrow head, the notch at (0, -1) is a right turn
        let v = [
            vec2(0.0, 3.0),
            vec2(-2.0, -2.0),
            vec2(0.0, -1.0),
            vec2(2.0, -2.0),
        ];
        let (_, props) = build(&v);
        assert!(!props.convex);
    }

    #[test]
    fn test_too_few_vertices() {
        let err = Polygon::<Vec<Vec2>>::new(&[vec2(0.0, 0.0), vec2(1.0, 0.0)]).unwrap_err();
        assert_eq!(err, GeometryError::TooFewVertices { count: 2 });
    }

    #[test]
    fn test_properties_of_short_slices() {
        assert_eq!(center_of_vertices(&[]), Vec2::zero());
        assert_eq!(center_of_mass(&[]), Vec2::zero());
        assert_eq!(area(&[]), 0.0);
        assert_eq!(inertia(&[], 1.0), 0.0);

        let segment = [vec2(0.0, 0.0), vec2(2.0, 1.0)];
        assert_eq!(center_of_mass(&segment), vec2(1.0, 0.5));
        assert_eq!(area(&segment), 0.0);
        assert_eq!(inertia(&segment, 1.0), 0.0);
        assert_eq!(center_of_vertices(&segment[..1]), vec2(0.0, 0.0));
    }

    #[test]
    fn test_fixed_storage() {
        let (poly, _) = Polygon::<FixedVertices<8>>::new(&ngon(1.0, 6)).unwrap();
        assert_eq!(poly.len(), 6);
        assert_eq!(poly.capacity(), Some(8));
        assert!(Polygon::<FixedVertices<4>>::new(&ngon(1.0, 6)).is_err());
    }

    #[test]
    fn test_edges_and_normals() {
        let (poly, _) = build(&square(2.0));
        for i in 0..poly.len() {
            assert_eq!(poly.edge(i), poly.global(i + 1) - poly.global(i));
            assert_relative_eq!(poly.normal(i).length(), 1.0);
            // outward: the centroid is behind every edge
            assert!(poly.normal(i).dot(poly.centroid() - poly.global(i)) < 0.0);
        }
    }

    #[test]
    fn test_support_ties_pick_first() {
        let (poly, _) = build(&square(2.0));
        let first = poly.support_index(vec2(1.0, 0.0));
        for _ in 0..10 {
            assert_eq!(poly.support_index(vec2(1.0, 0.0)), first);
        }
        // vertices are (-1,-1), (1,-1), (1,1), (-1,1): both right ones tie
        assert_eq!(first, 1);
        assert_eq!(poly.support_point(vec2(1.0, 1.0)), vec2(1.0, 1.0));
    }

    #[test]
    fn test_contains() {
        let (poly, _) = build(&square(2.0));
        assert!(poly.contains_point(Vec2::zero()));
        assert!(poly.contains_point(vec2(1.0, 0.0)));
        assert!(!poly.contains_point(vec2(1.5, 0.0)));
    }

    #[test]
    fn test_closest_direction() {
        let (poly, _) = build(&square(2.0));
        let d = poly.closest_direction_from(vec2(3.0, 0.5));
        assert_relative_eq!(d.x, -2.0);
        assert_relative_eq!(d.y, 0.0);

        let d = poly.closest_direction_from(vec2(0.0, 0.75));
        assert_relative_eq!(d.x, 0.0);
        assert_relative_eq!(d.y, 0.25, epsilon = 1e-6);

        let d = poly.closest_direction_from(vec2(2.0, 2.0));
        assert_relative_eq!(d.x, -1.0);
        assert_relative_eq!(d.y, -1.0);
    }
}
