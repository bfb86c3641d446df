//! Convex shapes with cached world-space state.
//!
//! A shape owns a local [`Transform`] and keeps its global centroid, bounding
//! box, area, inertia and convexity in sync with it. Every mutator recomputes
//! the cache exactly once before returning; to apply several edits for the
//! price of one recompute, go through [`GenericShape::begin_update`].

use crate::error::GeometryError;
use crate::math::{transform_point, transform_vector, Matrix, Vec2};
use crate::transform::{Transform, TransformArena, TransformHandle};

mod aabb;
mod circle;
pub mod polygon;
mod vertices;

pub use aabb::*;
pub use circle::*;
pub use polygon::Polygon;
pub use vertices::*;

/// Shape with growable vertex storage.
pub type Shape = GenericShape<Vec<Vec2>>;
/// Shape whose polygon holds at most `N` vertices, without heap allocation.
pub type FixedShape<const N: usize> = GenericShape<FixedVertices<N>>;

/// The closed set of shape variants.
#[derive(Clone, Debug)]
pub enum ShapeKind<S: VertexStorage = Vec<Vec2>> {
    Circle(Circle),
    Polygon(Polygon<S>),
}

/// A circle or a convex polygon placed in the world.
///
/// ```rust
/// use convex2d::{Shape, Transform, math::vec2, shape::polygon};
///
/// let mut sq = Shape::polygon(Transform::at(vec2(1.0, 0.0)), &polygon::square(2.0));
/// assert_eq!(sq.bounding_box().max, vec2(2.0, 1.0));
///
/// sq.translate(vec2(1.0, 0.0));
/// assert_eq!(sq.centroid(), vec2(2.0, 0.0));
/// assert_eq!(sq.bounding_box().max, vec2(3.0, 1.0));
/// ```
#[derive(Clone, Debug)]
pub struct GenericShape<S: VertexStorage = Vec<Vec2>> {
    transform: Transform,
    /// Global matrix of the parent, as of the last `set_parent`/`sync_parent`.
    parent_matrix: Option<Matrix>,
    lcentroid: Vec2,
    gcentroid: Vec2,
    aabb: AABB,
    area: f32,
    inertia: f32,
    convex: bool,
    kind: ShapeKind<S>,
}

impl<S: VertexStorage> GenericShape<S> {
    fn with_kind(
        mut transform: Transform,
        kind: ShapeKind<S>,
        area: f32,
        inertia: f32,
        convex: bool,
    ) -> Self {
        if transform.parent.take().is_some() {
            log::warn!("parent of a shape's initial transform is ignored, use set_parent");
        }
        let mut shape = Self {
            transform,
            parent_matrix: None,
            lcentroid: Vec2::zero(),
            gcentroid: Vec2::zero(),
            aabb: AABB::default(),
            area,
            inertia,
            convex,
            kind,
        };
        shape.update();
        shape
    }

    pub fn try_circle(transform: Transform, radius: f32) -> Result<Self, GeometryError> {
        let circle = Circle::new(radius)?;
        let (area, inertia) = (circle.area(), circle.inertia());
        Ok(Self::with_kind(
            transform,
            ShapeKind::Circle(circle),
            area,
            inertia,
            true,
        ))
    }

    /// # Panics
    /// Panics if `radius` is not strictly positive.
    pub fn circle(transform: Transform, radius: f32) -> Self {
        Self::try_circle(transform, radius).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Polygon whose centroid sits at the transform's position. The input
    /// order of `vertices` does not matter, they get sorted counter-clockwise.
    pub fn try_polygon(transform: Transform, vertices: &[Vec2]) -> Result<Self, GeometryError> {
        let (poly, props) = Polygon::new(vertices)?;
        Ok(Self::with_kind(
            transform,
            ShapeKind::Polygon(poly),
            props.area,
            props.inertia,
            props.convex,
        ))
    }

    /// # Panics
    /// Panics with fewer than 3 vertices or more than the storage can hold.
    pub fn polygon(transform: Transform, vertices: &[Vec2]) -> Self {
        Self::try_polygon(transform, vertices).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Polygon left exactly where `vertices` are: its position is set to
    /// their center of mass.
    pub fn try_polygon_at_vertices(vertices: &[Vec2]) -> Result<Self, GeometryError> {
        let (poly, props) = Polygon::new(vertices)?;
        Ok(Self::with_kind(
            Transform::at(props.centroid),
            ShapeKind::Polygon(poly),
            props.area,
            props.inertia,
            props.convex,
        ))
    }

    /// # Panics
    /// Same as [`GenericShape::polygon`].
    pub fn polygon_at_vertices(vertices: &[Vec2]) -> Self {
        Self::try_polygon_at_vertices(vertices).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Recomputes every cached field from the current transform.
    fn update(&mut self) {
        let local = self.transform.to_matrix();
        let global = match &self.parent_matrix {
            Some(parent) => local.then(parent),
            None => local,
        };
        self.lcentroid = transform_point(&local, Vec2::zero());
        self.gcentroid = transform_point(&global, Vec2::zero());

        match &mut self.kind {
            ShapeKind::Circle(c) => {
                c.set_center(self.gcentroid);
                self.aabb.bound_circle(self.gcentroid, c.radius());
            }
            ShapeKind::Polygon(p) => {
                p.on_transform_update(&local, &global);
                self.aabb.bound_vertices(p.globals());
            }
        }
    }

    /// Starts a batch of transform edits. The cache is recomputed once, when
    /// the returned guard is dropped.
    ///
    /// ```rust
    /// use convex2d::{Shape, Transform, math::vec2};
    ///
    /// let mut c = Shape::circle(Transform::default(), 1.0);
    /// c.begin_update()
    ///     .translate(vec2(2.0, 0.0))
    ///     .set_scale(vec2(2.0, 2.0))
    ///     .rotate(0.5);
    /// assert_eq!(c.centroid(), vec2(2.0, 0.0));
    /// ```
    pub fn begin_update(&mut self) -> ShapeUpdate<'_, S> {
        ShapeUpdate { shape: self }
    }

    pub fn translate(&mut self, dpos: Vec2) {
        self.begin_update().translate(dpos);
    }

    /// Translation expressed in world space, even if the shape has a parent.
    pub fn translate_global(&mut self, dpos: Vec2) {
        self.begin_update().translate_global(dpos);
    }

    pub fn rotate(&mut self, drotation: f32) {
        self.begin_update().rotate(drotation);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.begin_update().set_position(position);
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.begin_update().set_rotation(rotation);
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.begin_update().set_scale(scale);
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.begin_update().set_origin(origin);
    }

    /// Moves the shape so that its centroid, relative to the parent, is `lcentroid`.
    pub fn set_local_centroid(&mut self, lcentroid: Vec2) {
        let d = lcentroid - self.lcentroid;
        self.translate(d);
    }

    /// Moves the shape so that its world centroid is `gcentroid`.
    pub fn set_centroid(&mut self, gcentroid: Vec2) {
        let d = gcentroid - self.gcentroid;
        self.translate_global(d);
    }

    /// Attaches the shape to a transform of `arena`, or detaches it with `None`.
    ///
    /// The parent's global matrix is read now; call [`GenericShape::sync_parent`]
    /// after the parent moves.
    pub fn set_parent(
        &mut self,
        arena: &TransformArena,
        parent: Option<TransformHandle>,
    ) -> Result<(), GeometryError> {
        let matrix = parent.map(|h| arena.global_matrix(h)).transpose()?;
        self.transform.parent = parent;
        self.parent_matrix = matrix;
        self.update();
        Ok(())
    }

    /// Re-reads the parent's global matrix from `arena`.
    pub fn sync_parent(&mut self, arena: &TransformArena) -> Result<(), GeometryError> {
        self.set_parent(arena, self.transform.parent)
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<(), GeometryError> {
        let ShapeKind::Circle(c) = &mut self.kind else {
            return Err(GeometryError::NotACircle);
        };
        c.set_radius(radius)?;
        self.area = c.area();
        self.inertia = c.inertia();
        self.update();
        Ok(())
    }

    /// Replaces the vertices of a polygon, keeping its transform. Sorting,
    /// centroid, area, inertia and convexity are derived again.
    pub fn set_vertices(&mut self, vertices: &[Vec2]) -> Result<(), GeometryError> {
        if !matches!(self.kind, ShapeKind::Polygon(_)) {
            return Err(GeometryError::NotAPolygon);
        }
        let (poly, props) = Polygon::new(vertices)?;
        self.kind = ShapeKind::Polygon(poly);
        self.area = props.area;
        self.inertia = props.inertia;
        self.convex = props.convex;
        self.update();
        Ok(())
    }

    pub fn support_point(&self, direction: Vec2) -> Vec2 {
        match &self.kind {
            ShapeKind::Circle(c) => c.support_point(direction),
            ShapeKind::Polygon(p) => p.support_point(direction),
        }
    }

    /// Circles exclude their boundary, polygons include it. The answer for a
    /// non convex polygon is unreliable.
    pub fn contains_point(&self, p: Vec2) -> bool {
        match &self.kind {
            ShapeKind::Circle(c) => c.contains_point(p),
            ShapeKind::Polygon(poly) => {
                if !self.convex {
                    log::warn!("point containment on a non convex polygon is unreliable");
                }
                poly.contains_point(p)
            }
        }
    }

    pub fn contains_origin(&self) -> bool {
        self.contains_point(Vec2::zero())
    }

    /// Vector from `p` to the closest point on the shape's boundary.
    pub fn closest_direction_from(&self, p: Vec2) -> Vec2 {
        match &self.kind {
            ShapeKind::Circle(c) => c.closest_direction_from(p),
            ShapeKind::Polygon(poly) => poly.closest_direction_from(p),
        }
    }

    pub fn bounding_box(&self) -> AABB {
        self.aabb
    }

    /// World space centroid.
    pub fn centroid(&self) -> Vec2 {
        self.gcentroid
    }

    /// Centroid in the parent's space (world space without a parent).
    pub fn local_centroid(&self) -> Vec2 {
        self.lcentroid
    }

    pub fn area(&self) -> f32 {
        self.area
    }

    /// Rotational inertia about the centroid, per unit mass.
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    pub fn is_convex(&self) -> bool {
        self.convex
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn parent(&self) -> Option<TransformHandle> {
        self.transform.parent
    }

    pub fn kind(&self) -> &ShapeKind<S> {
        &self.kind
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match &self.kind {
            ShapeKind::Circle(c) => Some(c),
            ShapeKind::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon<S>> {
        match &self.kind {
            ShapeKind::Polygon(p) => Some(p),
            ShapeKind::Circle(_) => None,
        }
    }

    pub fn radius(&self) -> Option<f32> {
        self.as_circle().map(Circle::radius)
    }
}

/// Pending transform edits on a shape, see [`GenericShape::begin_update`].
///
/// Holds the shape mutably borrowed, so nothing can look at it until the
/// edits are applied by dropping the guard (or calling [`ShapeUpdate::finish`]).
pub struct ShapeUpdate<'a, S: VertexStorage> {
    shape: &'a mut GenericShape<S>,
}

impl<'a, S: VertexStorage> ShapeUpdate<'a, S> {
    pub fn translate(&mut self, dpos: Vec2) -> &mut Self {
        self.shape.transform.position += dpos;
        self
    }

    pub fn translate_global(&mut self, dpos: Vec2) -> &mut Self {
        let dpos = match self.shape.parent_matrix.map(|m| m.inverse()) {
            Some(Some(inv)) => transform_vector(&inv, dpos),
            Some(None) => {
                log::warn!("parent transform is singular, translating in its space instead");
                dpos
            }
            None => dpos,
        };
        self.shape.transform.position += dpos;
        self
    }

    pub fn rotate(&mut self, drotation: f32) -> &mut Self {
        self.shape.transform.rotation += drotation;
        self
    }

    pub fn set_position(&mut self, position: Vec2) -> &mut Self {
        self.shape.transform.position = position;
        self
    }

    pub fn set_rotation(&mut self, rotation: f32) -> &mut Self {
        self.shape.transform.rotation = rotation;
        self
    }

    /// Scale components of opposite signs mirror the shape, which breaks the
    /// counter-clockwise order of polygon vertices.
    pub fn set_scale(&mut self, scale: Vec2) -> &mut Self {
        self.shape.transform.scale = scale;
        if self.shape.transform.is_mirrored() {
            log::warn!("mirroring scale ({}, {}) flips polygon winding", scale.x, scale.y);
        }
        self
    }

    pub fn set_origin(&mut self, origin: Vec2) -> &mut Self {
        self.shape.transform.origin = origin;
        self
    }

    /// Applies the edits. Same as dropping the guard.
    pub fn finish(self) {}
}

impl<'a, S: VertexStorage> Drop for ShapeUpdate<'a, S> {
    fn drop(&mut self) {
        self.shape.update();
    }
}
