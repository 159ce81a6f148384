//! Height-field mesher: RGBA8 pixels to a printable STL solid.
//!
//! Each pixel is one height sample. For every cell between four neighbouring
//! pixels the mesher emits two top-surface triangles split along the
//! `v00`-`v11` diagonal and two base triangles at `z = 0` with reversed
//! winding, giving exactly `4 * (W - 1) * (H - 1)` facets. Positions:
//!   x = gx * planar_scale, y = gy * planar_scale
//!   z = (gray / 255) * max_height on top, 0 on the base
//! The perimeter has no side walls; see `geometry::analyze_facets` for the
//! resulting open edges.

use std::io::{self, Write};

use crate::error::HeightmapResult;
use crate::geometry::{Facet, Vertex};
use crate::io::stl_ascii::{write_ascii_stl, FACET_RECORD_SIZE_HINT, SOLID_NAME};
use crate::params::MeshParameters;
use crate::pixels::PixelBuffer;

/// Streams the facets of one pixel buffer.
#[derive(Debug, Clone, Copy)]
pub struct HeightmapMesher<'a> {
    pixels: PixelBuffer<'a>,
    params: MeshParameters,
}

impl<'a> HeightmapMesher<'a> {
    pub fn new(pixels: PixelBuffer<'a>, params: MeshParameters) -> HeightmapResult<Self> {
        params.validate()?;
        Ok(Self { pixels, params })
    }

    /// Fewer than two rows or columns: no cell exists.
    pub fn is_degenerate(&self) -> bool {
        self.pixels.width() < 2 || self.pixels.height() < 2
    }

    pub fn facet_count(&self) -> usize {
        if self.is_degenerate() {
            return 0;
        }
        let cells = (self.pixels.width() as usize - 1) * (self.pixels.height() as usize - 1);
        cells * 4
    }

    #[inline]
    fn planar(&self, gx: u32, gy: u32) -> (f64, f64) {
        let s = self.params.planar_scale;
        (gx as f64 * s, gy as f64 * s)
    }

    /// Top-surface vertex above pixel `(gx, gy)`.
    fn top_vertex(&self, gx: u32, gy: u32) -> Vertex {
        let (x, y) = self.planar(gx, gy);
        let z = (self.pixels.gray(gx, gy) / 255.0) * self.params.max_height;
        Vertex::new(x, y, z)
    }

    /// Base vertex below pixel `(gx, gy)`.
    fn base_vertex(&self, gx: u32, gy: u32) -> Vertex {
        let (x, y) = self.planar(gx, gy);
        Vertex::new(x, y, 0.0)
    }

    /// The four facets of cell `(x, y)`: two top, then two base.
    /// `x + 1` and `y + 1` must be inside the buffer.
    fn cell_facets(&self, x: u32, y: u32) -> [Facet; 4] {
        let v00 = self.top_vertex(x, y);
        let v10 = self.top_vertex(x + 1, y);
        let v01 = self.top_vertex(x, y + 1);
        let v11 = self.top_vertex(x + 1, y + 1);

        let b00 = self.base_vertex(x, y);
        let b10 = self.base_vertex(x + 1, y);
        let b01 = self.base_vertex(x, y + 1);
        let b11 = self.base_vertex(x + 1, y + 1);

        [
            Facet::new(v00, v10, v11),
            Facet::new(v00, v11, v01),
            Facet::new(b11, b10, b00),
            Facet::new(b01, b11, b00),
        ]
    }

    /// All facets in output order: rows outer, columns inner.
    pub fn facets(self) -> impl Iterator<Item = Facet> + 'a {
        let rows = if self.is_degenerate() {
            0
        } else {
            self.pixels.height() - 1
        };
        let cols = self.pixels.width().saturating_sub(1);
        (0..rows)
            .flat_map(move |y| (0..cols).map(move |x| self.cell_facets(x, y)))
            .flatten()
    }

    /// Serialize the mesh as an ASCII STL string.
    pub fn to_stl_string(&self) -> HeightmapResult<String> {
        let mut buf = Vec::with_capacity(64 + self.facet_count() * FACET_RECORD_SIZE_HINT);
        self.write_stl(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    /// Stream the mesh as ASCII STL, returning the number of facets written.
    pub fn write_stl<W: Write>(&self, w: &mut W) -> HeightmapResult<usize> {
        if self.is_degenerate() {
            log::debug!(
                "{}x{} image has no grid cells; emitting empty solid",
                self.pixels.width(),
                self.pixels.height()
            );
            return write_ascii_stl(w, SOLID_NAME, std::iter::empty());
        }
        write_ascii_stl(w, SOLID_NAME, self.facets())
    }
}

/// Convert a tightly packed RGBA8 buffer into ASCII STL text.
///
/// Fails without producing output if the buffer length is not
/// `4 * width * height`, if either dimension is zero, or if a parameter is
/// not a positive finite number. Images narrower or shorter than two pixels
/// yield an empty solid.
pub fn generate_heightmap_stl(
    pixels: &[u8],
    width: u32,
    height: u32,
    max_height: f64,
    planar_scale: f64,
) -> HeightmapResult<String> {
    let buffer = PixelBuffer::new(pixels, width, height)?;
    let params = MeshParameters::new(max_height, planar_scale)?;
    HeightmapMesher::new(buffer, params)?.to_stl_string()
}

/// Streaming counterpart of [`generate_heightmap_stl`] writing the same
/// bytes to `w`.
pub fn write_heightmap_stl<W: Write>(
    w: &mut W,
    pixels: PixelBuffer<'_>,
    params: &MeshParameters,
) -> HeightmapResult<usize> {
    HeightmapMesher::new(pixels, *params)?.write_stl(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeightmapError;

    fn uniform(width: u32, height: u32, value: u8) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&[value, value, value, 255]);
        }
        data
    }

    #[test]
    fn cell_winding_matches_layout() {
        let data = uniform(2, 2, 255);
        let px = PixelBuffer::new(&data, 2, 2).unwrap();
        let mesher = HeightmapMesher::new(px, MeshParameters::new(2.0, 3.0).unwrap()).unwrap();
        let [t0, t1, b0, b1] = mesher.cell_facets(0, 0);

        assert_eq!(t0.vertices[0], Vertex::new(0.0, 0.0, 2.0));
        assert_eq!(t0.vertices[1], Vertex::new(3.0, 0.0, 2.0));
        assert_eq!(t0.vertices[2], Vertex::new(3.0, 3.0, 2.0));
        assert_eq!(t1.vertices[2], Vertex::new(0.0, 3.0, 2.0));
        assert!(t0.normal.z > 0.999 && t1.normal.z > 0.999);

        assert_eq!(b0.vertices[0], Vertex::new(3.0, 3.0, 0.0));
        assert_eq!(b1.vertices[0], Vertex::new(0.0, 3.0, 0.0));
        assert!(b0.normal.z < -0.999 && b1.normal.z < -0.999);
    }

    #[test]
    fn facet_iteration_is_row_major() {
        let data = uniform(3, 2, 0);
        let px = PixelBuffer::new(&data, 3, 2).unwrap();
        let mesher = HeightmapMesher::new(px, MeshParameters::default()).unwrap();
        let facets: Vec<Facet> = mesher.facets().collect();
        assert_eq!(facets.len(), mesher.facet_count());
        assert_eq!(facets.len(), 8);
        // second cell starts at x = 1
        assert_eq!(facets[4].vertices[0], Vertex::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn last_cell_reaches_far_corner() {
        let data = uniform(3, 2, 255);
        let px = PixelBuffer::new(&data, 3, 2).unwrap();
        let mesher = HeightmapMesher::new(px, MeshParameters::default()).unwrap();
        let last = mesher.facets().last().unwrap();
        assert_eq!(last.vertices[1], Vertex::new(2.0, 1.0, 0.0));
        let facets: Vec<Facet> = mesher.facets().collect();
        assert!(facets
            .iter()
            .flat_map(|f| f.vertices)
            .all(|v| v.x <= 2.0 && v.y <= 1.0));
    }

    #[test]
    fn degenerate_yields_empty_solid() {
        let data = uniform(1, 4, 200);
        let stl = generate_heightmap_stl(&data, 1, 4, 5.0, 1.0).unwrap();
        assert_eq!(stl, "solid image_heightmap\nendsolid image_heightmap\n");
    }

    #[test]
    fn rejects_bad_parameters_before_output() {
        let data = uniform(2, 2, 10);
        let err = generate_heightmap_stl(&data, 2, 2, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, HeightmapError::InvalidParameter { .. }));
        let err = generate_heightmap_stl(&data, 2, 2, 1.0, f64::NAN).unwrap_err();
        assert!(matches!(err, HeightmapError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        let data = uniform(2, 2, 10);
        let err = generate_heightmap_stl(&data[..12], 2, 2, 1.0, 1.0).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn streaming_matches_string() {
        let data: Vec<u8> = (0..4 * 4 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let px = PixelBuffer::new(&data, 4, 3).unwrap();
        let params = MeshParameters::new(7.5, 0.4).unwrap();
        let mut buf = Vec::new();
        let written = write_heightmap_stl(&mut buf, px, &params).unwrap();
        assert_eq!(written, 4 * 3 * 2);
        let text = generate_heightmap_stl(&data, 4, 3, 7.5, 0.4).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), text);
    }
}
