//!
//! convex2d is a crate dedicated to 2D convex shapes and narrow-phase collision detection
//! between them: overlap tests (GJK), penetration depth (EPA) and contact points for a solver.
//!
//! Shapes are either circles or convex polygons. Each one owns a [`Transform`] and keeps its
//! world-space geometry (vertices, edges, normals, centroid, bounding box) up to date as the
//! transform changes, so that intersection queries are read-only.
//!
//! ```rust
//! use convex2d::{collide, NarrowPhaseConfig, Shape, Transform, math::vec2, shape::polygon};
//!
//! let ball = Shape::circle(Transform::default(), 1.0);
//! let mut block = Shape::polygon(Transform::at(vec2(5.0, 0.0)), &polygon::square(2.0));
//! let config = NarrowPhaseConfig::default();
//!
//! assert!(collide(&ball, &block, &config).is_none());
//!
//! block.translate(vec2(-3.5, 0.0));
//! let manifold = collide(&ball, &block, &config).unwrap();
//! assert!((manifold.mtv.depth() - 0.5).abs() < 1e-2);
//! ```
//!

pub mod intersection;
pub mod math;
pub mod shape;

mod config;
mod error;
mod transform;

pub use config::{ContactStrategy, NarrowPhaseConfig};
pub use error::GeometryError;
pub use intersection::{collide, ContactPoint, ContactSet, Manifold, Mtv, SupportMap};
pub use shape::{Circle, FixedShape, GenericShape, Polygon, Shape, ShapeKind, ShapeUpdate, AABB};
pub use transform::{Transform, TransformArena, TransformHandle};
