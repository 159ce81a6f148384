// src/geometry/validate.rs
// Topology and extent report for a stream of facets
// Exists to make open perimeters and non-manifold edges visible without storing the mesh twice
// RELEVANT FILES:src/geometry/mod.rs,src/convert.rs

use std::collections::HashMap;

use serde::Serialize;

use super::{Facet, Vertex};

/// Quantization step used to weld coincident vertices.
const WELD_EPSILON: f64 = 1e-6;

/// Extent and edge-sharing statistics for a facet stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshReport {
    pub facet_count: usize,
    pub bbox_min: [f64; 3],
    pub bbox_max: [f64; 3],
    /// Edges used by exactly one facet.
    pub boundary_edges: usize,
    /// Edges used by more than two facets.
    pub non_manifold_edges: usize,
}

impl Default for MeshReport {
    fn default() -> Self {
        Self {
            facet_count: 0,
            bbox_min: [0.0; 3],
            bbox_max: [0.0; 3],
            boundary_edges: 0,
            non_manifold_edges: 0,
        }
    }
}

impl MeshReport {
    /// Every edge shared by exactly two facets.
    pub fn is_watertight(&self) -> bool {
        self.facet_count > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

type VertexKey = (i64, i64, i64);

fn quantize(v: Vertex) -> VertexKey {
    (
        (v.x / WELD_EPSILON).round() as i64,
        (v.y / WELD_EPSILON).round() as i64,
        (v.z / WELD_EPSILON).round() as i64,
    )
}

fn edge_key(a: VertexKey, b: VertexKey) -> (VertexKey, VertexKey) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Walk a facet stream once, collecting bounds and edge usage.
///
/// Vertices are welded by position, so this works on the unindexed facets
/// produced by the mesher or parsed back from STL.
pub fn analyze_facets<I>(facets: I) -> MeshReport
where
    I: IntoIterator<Item = Facet>,
{
    let mut min = Vertex::splat(f64::INFINITY);
    let mut max = Vertex::splat(f64::NEG_INFINITY);
    let mut facet_count = 0usize;
    let mut edge_counts: HashMap<(VertexKey, VertexKey), u32> = HashMap::new();

    for facet in facets {
        facet_count += 1;
        let keys = facet.vertices.map(|v| {
            min = min.min(v);
            max = max.max(v);
            quantize(v)
        });
        if keys[0] == keys[1] || keys[1] == keys[2] || keys[0] == keys[2] {
            continue;
        }
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            *edge_counts.entry(edge_key(keys[a], keys[b])).or_insert(0) += 1;
        }
    }

    if facet_count == 0 {
        return MeshReport::default();
    }

    let boundary_edges = edge_counts.values().filter(|&&c| c == 1).count();
    let non_manifold_edges = edge_counts.values().filter(|&&c| c > 2).count();

    MeshReport {
        facet_count,
        bbox_min: min.to_array(),
        bbox_max: max.to_array(),
        boundary_edges,
        non_manifold_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vertex {
        Vertex::new(x, y, z)
    }

    #[test]
    fn empty_stream_reports_nothing() {
        let report = analyze_facets(Vec::<Facet>::new());
        assert_eq!(report, MeshReport::default());
        assert!(!report.is_watertight());
    }

    #[test]
    fn tetrahedron_is_watertight() {
        let a = v(0.0, 0.0, 0.0);
        let b = v(1.0, 0.0, 0.0);
        let c = v(0.0, 1.0, 0.0);
        let d = v(0.0, 0.0, 1.0);
        let facets = vec![
            Facet::new(a, c, b),
            Facet::new(a, b, d),
            Facet::new(b, c, d),
            Facet::new(c, a, d),
        ];
        let report = analyze_facets(facets);
        assert_eq!(report.facet_count, 4);
        assert_eq!(report.boundary_edges, 0);
        assert_eq!(report.non_manifold_edges, 0);
        assert!(report.is_watertight());
        assert_eq!(report.bbox_min, [0.0, 0.0, 0.0]);
        assert_eq!(report.bbox_max, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn single_quad_has_open_perimeter() {
        let facets = vec![
            Facet::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0)),
            Facet::new(v(0.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0)),
        ];
        let report = analyze_facets(facets);
        assert_eq!(report.boundary_edges, 4);
        assert!(!report.is_watertight());
    }
}
