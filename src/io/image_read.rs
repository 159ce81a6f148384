//! PNG/JPEG decoding into tightly packed RGBA8 buffers.
//!
//! The format is detected from file content, not the extension. Anything
//! other than PNG or JPEG is rejected before decoding.

use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::{HeightmapError, HeightmapResult};

fn check_format(format: Option<ImageFormat>) -> HeightmapResult<ImageFormat> {
    match format {
        Some(f @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(f),
        Some(other) => Err(HeightmapError::UnsupportedFormat(format!("{other:?}"))),
        None => Err(HeightmapError::UnsupportedFormat("unrecognized data".to_string())),
    }
}

fn decode<R: BufRead + Seek>(reader: ImageReader<R>) -> HeightmapResult<RgbaImage> {
    let format = check_format(reader.format())?;
    let img = reader.decode()?.to_rgba8();
    log::info!(
        "decoded {:?} image: {}x{}",
        format,
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Load a PNG or JPEG file as RGBA8.
pub fn load_rgba_image<P: AsRef<Path>>(path: P) -> HeightmapResult<RgbaImage> {
    let path = path.as_ref();
    log::debug!("loading image {}", path.display());
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    decode(reader)
}

/// Decode an in-memory PNG or JPEG as RGBA8.
pub fn decode_rgba_image(bytes: &[u8]) -> HeightmapResult<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    decode(reader)
}
