// src/convert.rs
// File-level conversion: decode an image, stream its height-map STL to disk
// Stands in for the upload form's convert button and download link

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{HeightmapError, HeightmapResult};
use crate::geometry::{analyze_facets, MeshReport};
use crate::heightmap::HeightmapMesher;
use crate::io::image_read::load_rgba_image;
use crate::io::stl_ascii::STL_MIME_TYPE;
use crate::params::MeshParameters;
use crate::pixels::PixelBuffer;

/// Outcome of a successful file conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub facet_count: usize,
    pub params: MeshParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology: Option<MeshReport>,
}

/// Convert the PNG/JPEG at `input` into an ASCII STL file at `output`.
///
/// Nothing touches `output` until the image has decoded and the parameters
/// validated, and the STL is staged through [`replace_file_with`], so a
/// failed call leaves any previous output in place. With `with_report` the facet stream is walked a second time to
/// collect a [`MeshReport`].
pub fn convert_image_file(
    input: &Path,
    output: &Path,
    params: &MeshParameters,
    with_report: bool,
) -> HeightmapResult<ConversionSummary> {
    params.validate()?;
    let image = load_rgba_image(input)?;
    let pixels = PixelBuffer::from_image(&image)?;
    let mesher = HeightmapMesher::new(pixels, *params)?;

    log::info!(
        "converting {} ({}x{}) with max_height={} planar_scale={}",
        input.display(),
        pixels.width(),
        pixels.height(),
        params.max_height,
        params.planar_scale
    );
    if mesher.is_degenerate() {
        log::warn!(
            "{} is {}x{}; at least 2x2 pixels are needed for any facets",
            input.display(),
            pixels.width(),
            pixels.height()
        );
    }

    let facet_count = replace_file_with(output, |w| mesher.write_stl(w))?;
    log::info!("wrote {} facets to {}", facet_count, output.display());

    let topology = with_report.then(|| analyze_facets(mesher.facets()));
    if let Some(report) = &topology {
        log::debug!(
            "topology: {} boundary edges, {} non-manifold edges",
            report.boundary_edges,
            report.non_manifold_edges
        );
    }

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        mime_type: STL_MIME_TYPE,
        width: pixels.width(),
        height: pixels.height(),
        facet_count,
        params: *params,
        topology,
    })
}

fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

/// Write `output` through a temporary sibling file that is renamed over it
/// only once `write` and the final flush succeed. On error the temporary
/// file is removed and `output` is untouched.
pub fn replace_file_with<T, F>(output: &Path, write: F) -> HeightmapResult<T>
where
    F: FnOnce(&mut BufWriter<File>) -> HeightmapResult<T>,
{
    let staging = staging_path(output);
    let result = File::create(&staging)
        .map_err(HeightmapError::from)
        .and_then(|file| {
            let mut w = BufWriter::new(file);
            let value = write(&mut w)?;
            let file = w.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
            Ok(value)
        })
        .and_then(|value| {
            fs::rename(&staging, output)?;
            Ok(value)
        });

    if result.is_err() {
        match fs::remove_file(&staging) {
            Ok(()) => log::debug!("removed partial output {}", staging.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => log::warn!("could not remove {}: {}", staging.display(), e),
        }
    }
    result
}
