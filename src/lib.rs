//! Image to height-map STL conversion.
//!
//! Turns a PNG/JPEG (or any RGBA8 buffer) into a printable relief: one height
//! sample per pixel from the average of its red, green and blue channels,
//! written as ASCII STL.
//!
//! ```
//! let pixels = vec![128u8; 2 * 2 * 4];
//! let stl = image_heightmap::generate_heightmap_stl(&pixels, 2, 2, 10.0, 1.0)?;
//! assert!(stl.starts_with("solid image_heightmap"));
//! # Ok::<(), image_heightmap::HeightmapError>(())
//! ```

pub mod cli;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod heightmap;
pub mod io;
pub mod params;
pub mod pixels;

pub use convert::{convert_image_file, ConversionSummary};
pub use error::{HeightmapError, HeightmapResult};
pub use geometry::{analyze_facets, compute_unit_normal, Facet, MeshReport, Vertex};
pub use heightmap::{generate_heightmap_stl, write_heightmap_stl, HeightmapMesher};
pub use io::stl_ascii::{format_facet, DEFAULT_STL_FILENAME, STL_MIME_TYPE};
pub use io::stl_read::{read_ascii_stl, StlSolid};
pub use params::{resolve_parameters, MeshParameters};
pub use pixels::PixelBuffer;
