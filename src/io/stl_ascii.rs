//! ASCII STL writer for 3D print export.
//!
//! Emits the `solid` / `facet normal` / `outer loop` grammar line by line.
//! Numbers use the shortest decimal form that parses back to the same
//! `f64`; negative zero is written as `0`.

use std::fmt;
use std::io::Write;

use crate::error::HeightmapResult;
use crate::geometry::{Facet, Vertex};

/// Solid name used in the header and footer of generated files.
pub const SOLID_NAME: &str = "image_heightmap";
/// MIME type conventionally used for ASCII STL downloads.
pub const STL_MIME_TYPE: &str = "application/sla";
/// Suggested filename for generated meshes.
pub const DEFAULT_STL_FILENAME: &str = "image_heightmap.stl";

/// Bytes taken by one facet record for typical coordinates.
pub const FACET_RECORD_SIZE_HINT: usize = 192;

struct StlFloat(f64);

impl fmt::Display for StlFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn fmt_triple(v: Vertex) -> String {
    format!("{} {} {}", StlFloat(v.x), StlFloat(v.y), StlFloat(v.z))
}

fn solid_header(name: &str) -> String {
    format!("solid {}\n", name)
}

fn solid_footer(name: &str) -> String {
    format!("endsolid {}\n", name)
}

/// Format a facet record, including its trailing newline.
pub fn format_facet_record(facet: &Facet) -> String {
    let [a, b, c] = facet.vertices;
    format!(
        "facet normal {}\nouter loop\nvertex {}\nvertex {}\nvertex {}\nendloop\nendfacet\n",
        fmt_triple(facet.normal),
        fmt_triple(a),
        fmt_triple(b),
        fmt_triple(c)
    )
}

/// Format triangle `(a, b, c)` as a facet record with its computed normal.
pub fn format_facet(a: Vertex, b: Vertex, c: Vertex) -> String {
    format_facet_record(&Facet::new(a, b, c))
}

/// Stream an ASCII STL document to `w`, returning the number of facets
/// written.
pub fn write_ascii_stl<W, I>(w: &mut W, name: &str, facets: I) -> HeightmapResult<usize>
where
    W: Write,
    I: IntoIterator<Item = Facet>,
{
    w.write_all(solid_header(name).as_bytes())?;
    let mut count = 0usize;
    for facet in facets {
        w.write_all(format_facet_record(&facet).as_bytes())?;
        count += 1;
    }
    w.write_all(solid_footer(name).as_bytes())?;
    w.flush()?;
    Ok(count)
}
