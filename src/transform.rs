use crate::error::GeometryError;
use crate::math::{vec2, Matrix, Vec2};
use euclid::Angle;
use slotmapd::new_key_type;
use slotmapd::SlotMap;

new_key_type! {
    /// Non-owning reference to a transform living in a [`TransformArena`].
    /// It is returned by the _insert_ method of the arena.
    pub struct TransformHandle;
}

/// Position, rotation, scale and origin of something in the plane, optionally
/// expressed relative to a parent transform.
///
/// The matrix is built as `translate(position) * rotate(rotation) * scale(scale) * translate(-origin)`,
/// so the origin is the pivot for both rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec2,
    /// Counter-clockwise, in radians.
    pub rotation: f32,
    pub scale: Vec2,
    pub origin: Vec2,
    pub parent: Option<TransformHandle>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            rotation: 0.0,
            scale: vec2(1.0, 1.0),
            origin: Vec2::zero(),
            parent: None,
        }
    }
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
            ..Default::default()
        }
    }

    /// Local-to-parent matrix. The parent is not taken into account,
    /// see [`TransformArena::global_matrix`] for that.
    pub fn to_matrix(&self) -> Matrix {
        Matrix::translation(-self.origin.x, -self.origin.y)
            .then_scale(self.scale.x, self.scale.y)
            .then_rotate(Angle::radians(self.rotation))
            .then_translate(self.position)
    }

    /// `None` when a scale component is zero.
    pub fn inverse_matrix(&self) -> Option<Matrix> {
        self.to_matrix().inverse()
    }

    /// Mirroring (scale components of opposite signs) flips the winding of
    /// anything placed with this transform.
    pub fn is_mirrored(&self) -> bool {
        self.scale.x * self.scale.y < 0.0
    }
}

/// Externally owned storage for parent transforms.
///
/// Shapes only ever hold a [`TransformHandle`] into it, the arena owns the
/// transforms and decides their lifetime.
///
/// ```rust
/// use convex2d::{Transform, TransformArena, math::vec2};
///
/// let mut arena = TransformArena::new();
/// let root = arena.insert(Transform::at(vec2(10.0, 0.0)));
/// let child = arena.insert(Transform::at(vec2(1.0, 0.0)));
/// arena.set_parent(child, Some(root)).unwrap();
///
/// let m = arena.global_matrix(child).unwrap();
/// assert_eq!(m.transform_point(euclid::point2(0.0, 0.0)), euclid::point2(11.0, 0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransformArena {
    transforms: SlotMap<TransformHandle, Transform>,
}

impl TransformArena {
    pub fn new() -> Self {
        Self {
            transforms: SlotMap::with_key(),
        }
    }

    /// Inserts a transform. Its `parent` field is honored as is, use
    /// [`TransformArena::set_parent`] to get cycle checking.
    pub fn insert(&mut self, transform: Transform) -> TransformHandle {
        self.transforms.insert(transform)
    }

    /// Removes a transform. Children still pointing at it become stale and
    /// their global matrix can no longer be computed.
    pub fn remove(&mut self, handle: TransformHandle) -> Option<Transform> {
        self.transforms.remove(handle)
    }

    pub fn get(&self, handle: TransformHandle) -> Option<&Transform> {
        self.transforms.get(handle)
    }

    pub fn get_mut(&mut self, handle: TransformHandle) -> Option<&mut Transform> {
        self.transforms.get_mut(handle)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Re-parents `child`, refusing to close a loop in the hierarchy.
    pub fn set_parent(
        &mut self,
        child: TransformHandle,
        parent: Option<TransformHandle>,
    ) -> Result<(), GeometryError> {
        if !self.transforms.contains_key(child) {
            return Err(GeometryError::StaleTransform);
        }
        let mut cur = parent;
        while let Some(h) = cur {
            if h == child {
                return Err(GeometryError::TransformCycle);
            }
            cur = self
                .transforms
                .get(h)
                .ok_or(GeometryError::StaleTransform)?
                .parent;
        }
        self.transforms[child].parent = parent;
        Ok(())
    }

    /// Local-to-world matrix of `handle`, composed up to the root.
    pub fn global_matrix(&self, handle: TransformHandle) -> Result<Matrix, GeometryError> {
        let mut node = self.get(handle).ok_or(GeometryError::StaleTransform)?;
        let mut matrix = node.to_matrix();
        // a cycle can only come from `insert` with a hand-written parent, bail out instead of spinning
        let mut depth = self.transforms.len();
        while let Some(parent) = node.parent {
            if depth == 0 {
                return Err(GeometryError::TransformCycle);
            }
            depth -= 1;
            node = self.get(parent).ok_or(GeometryError::StaleTransform)?;
            matrix = matrix.then(&node.to_matrix());
        }
        Ok(matrix)
    }
}
