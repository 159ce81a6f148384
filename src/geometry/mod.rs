// src/geometry/mod.rs
// Geometry primitives shared by the mesher, the STL writer and the STL reader
// RELEVANT FILES:src/heightmap/mod.rs,src/io/stl_ascii.rs,src/geometry/validate.rs

//! Triangle facets and normals.

mod validate;

pub use validate::{analyze_facets, MeshReport};

use glam::DVec3;

/// A mesh vertex in printable units.
pub type Vertex = DVec3;

/// Normal reported for triangles whose edges are collinear or zero-length.
pub const FALLBACK_NORMAL: DVec3 = DVec3::Z;

/// Unit normal of triangle `(a, b, c)` from `(b - a) × (c - a)`.
///
/// Degenerate triangles yield [`FALLBACK_NORMAL`] instead of dividing by
/// zero, so the result always has unit length.
pub fn compute_unit_normal(a: Vertex, b: Vertex, c: Vertex) -> DVec3 {
    let cross = (b - a).cross(c - a);
    let len = cross.length();
    if len > 0.0 && len.is_finite() {
        cross / len
    } else {
        FALLBACK_NORMAL
    }
}

/// One STL triangle: three vertices in winding order plus its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: DVec3,
    pub vertices: [Vertex; 3],
}

impl Facet {
    /// Build a facet, deriving the normal from the winding order.
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            normal: compute_unit_normal(a, b, c),
            vertices: [a, b, c],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_clockwise_points_up() {
        let n = compute_unit_normal(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        );
        assert_eq!(n, DVec3::Z);
    }

    #[test]
    fn reversed_winding_points_down() {
        let n = compute_unit_normal(
            DVec3::new(2.0, 2.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
        );
        assert!((n - DVec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn sloped_normal_is_unit() {
        let n = compute_unit_normal(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 7.5),
            DVec3::new(3.0, 3.0, 1.25),
        );
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n.z > 0.0);
    }

    #[test]
    fn degenerate_triangle_uses_fallback() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(compute_unit_normal(p, p, p), FALLBACK_NORMAL);

        let collinear = compute_unit_normal(
            DVec3::ZERO,
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(collinear, FALLBACK_NORMAL);
        assert_eq!(collinear.length(), 1.0);
    }
}
