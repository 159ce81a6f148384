//! IO module aggregating image import and STL import/export helpers.

pub mod image_read;
pub mod stl_ascii;
pub mod stl_read;
