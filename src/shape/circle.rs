use crate::error::GeometryError;
use crate::math::{try_normalize, vec2, Vec2};
use std::f32::consts::PI;

/// Circle variant of a shape. The center is the owning shape's global
/// centroid, kept in sync on every transform update.
///
/// The radius is not affected by the transform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    radius: f32,
    center: Vec2,
}

impl Circle {
    pub(crate) fn new(radius: f32) -> Result<Self, GeometryError> {
        check_radius(radius)?;
        Ok(Self {
            radius,
            center: Vec2::zero(),
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub(crate) fn set_radius(&mut self, radius: f32) -> Result<(), GeometryError> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    pub(crate) fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// Per unit mass, about the center.
    pub fn inertia(&self) -> f32 {
        0.5 * self.radius * self.radius
    }

    /// A zero direction picks the point to the right of the center.
    pub fn support_point(&self, direction: Vec2) -> Vec2 {
        let dir = try_normalize(direction).unwrap_or(vec2(1.0, 0.0));
        self.center + dir * self.radius
    }

    /// Strict: points on the circle are outside.
    pub fn contains_point(&self, p: Vec2) -> bool {
        (p - self.center).square_length() < self.radius * self.radius
    }

    pub fn closest_direction_from(&self, p: Vec2) -> Vec2 {
        let dir = self.center - p;
        dir - try_normalize(dir).unwrap_or(vec2(1.0, 0.0)) * self.radius
    }
}

fn check_radius(radius: f32) -> Result<(), GeometryError> {
    // also catches NaN
    if !(radius > 0.0) {
        return Err(GeometryError::NonPositiveRadius(radius));
    }
    Ok(())
}
