use crate::error::GeometryError;
use crate::math::Vec2;
use std::fmt::Debug;
use std::ops::Index;

/// Backing storage for the vertex containers of a polygon.
///
/// Implemented by `Vec<Vec2>` (no vertex limit) and by [`FixedVertices`]
/// (array backed, no heap allocation). Polygon algorithms only ever see
/// slices so they don't care which one is used.
pub trait VertexStorage: Clone + Debug {
    /// Maximum number of vertices, `None` if unbounded.
    const CAPACITY: Option<usize>;

    fn from_slice(vertices: &[Vec2]) -> Result<Self, GeometryError>;
    fn as_slice(&self) -> &[Vec2];
    fn as_mut_slice(&mut self) -> &mut [Vec2];
}

impl VertexStorage for Vec<Vec2> {
    const CAPACITY: Option<usize> = None;

    fn from_slice(vertices: &[Vec2]) -> Result<Self, GeometryError> {
        Ok(vertices.to_vec())
    }

    fn as_slice(&self) -> &[Vec2] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [Vec2] {
        self
    }
}

/// Array of at most `N` vertices with a runtime length.
#[derive(Clone, Copy, Debug)]
pub struct FixedVertices<const N: usize> {
    data: [Vec2; N],
    len: usize,
}

impl<const N: usize> VertexStorage for FixedVertices<N> {
    const CAPACITY: Option<usize> = Some(N);

    fn from_slice(vertices: &[Vec2]) -> Result<Self, GeometryError> {
        if vertices.len() > N {
            return Err(GeometryError::CapacityExceeded {
                count: vertices.len(),
                capacity: N,
            });
        }
        let mut data = [Vec2::zero(); N];
        data[..vertices.len()].copy_from_slice(vertices);
        Ok(Self {
            data,
            len: vertices.len(),
        })
    }

    fn as_slice(&self) -> &[Vec2] {
        &self.data[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [Vec2] {
        &mut self.data[..self.len]
    }
}

/// A vertex container indexed modulo its length, so that `v[i + 1]` is always
/// the next vertex around the polygon.
#[derive(Clone, Debug)]
pub struct Vertices<S: VertexStorage> {
    storage: S,
}

impl<S: VertexStorage> Vertices<S> {
    pub(crate) fn from_slice(vertices: &[Vec2]) -> Result<Self, GeometryError> {
        Ok(Self {
            storage: S::from_slice(vertices)?,
        })
    }

    pub fn len(&self) -> usize {
        self.storage.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[Vec2] {
        self.storage.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> + '_ {
        self.as_slice().iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Vec2] {
        self.storage.as_mut_slice()
    }

    pub(crate) fn set(&mut self, index: usize, v: Vec2) {
        let len = self.len();
        self.as_mut_slice()[index % len] = v;
    }
}

impl<S: VertexStorage> Index<usize> for Vertices<S> {
    type Output = Vec2;

    fn index(&self, index: usize) -> &Vec2 {
        let s = self.as_slice();
        &s[index % s.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2;

    #[test]
    fn modulo_indexing() {
        let v: Vertices<Vec<Vec2>> =
            Vertices::from_slice(&[vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)]).unwrap();
        assert_eq!(v[3], v[0]);
        assert_eq!(v[4], vec2(1.0, 0.0));
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn fixed_capacity() {
        let tri = [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)];
        let v: Vertices<FixedVertices<4>> = Vertices::from_slice(&tri).unwrap();
        assert_eq!(v.as_slice(), &tri);
        assert_eq!(v[5], tri[2]);

        let err = FixedVertices::<2>::from_slice(&tri).unwrap_err();
        assert_eq!(
            err,
            GeometryError::CapacityExceeded {
                count: 3,
                capacity: 2
            }
        );
    }
}
