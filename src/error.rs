//! Central error handling for image-heightmap
//!
//! Provides a unified HeightmapError enum covering contract violations,
//! parameter validation, image decoding and STL I/O.

/// Centralized error type for all conversion operations
#[derive(thiserror::Error, Debug)]
pub enum HeightmapError {
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("image dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("image dimensions overflow when computing buffer size: {width}x{height}")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("invalid {name} '{value}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("unsupported image format: {0} (only PNG or JPEG allowed)")]
    UnsupportedFormat(String),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("STL parse error at line {line}: {message}")]
    StlParse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeightmapError {
    /// True for caller bugs: malformed buffers or dimensions.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            HeightmapError::BufferSizeMismatch { .. }
                | HeightmapError::ZeroDimension { .. }
                | HeightmapError::DimensionOverflow { .. }
        )
    }

    pub fn invalid_parameter(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        HeightmapError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub fn stl_parse<T: ToString>(line: usize, msg: T) -> Self {
        HeightmapError::StlParse {
            line,
            message: msg.to_string(),
        }
    }
}

/// Result type alias for conversion operations
pub type HeightmapResult<T> = Result<T, HeightmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violations_are_classified() {
        let err = HeightmapError::BufferSizeMismatch {
            expected: 16,
            actual: 12,
        };
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("expected 16 bytes, got 12"));

        let err = HeightmapError::invalid_parameter("max height", "-1", "must be greater than zero");
        assert!(!err.is_contract_violation());
        assert_eq!(
            err.to_string(),
            "invalid max height '-1': must be greater than zero"
        );
    }
}
