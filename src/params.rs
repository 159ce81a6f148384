// src/params.rs
// Mesh parameters and resolution of user-supplied parameter strings
// Blank fields fall back to documented defaults; anything else must parse and be positive

use serde::Serialize;

use crate::error::{HeightmapError, HeightmapResult};

/// Default maximum extrusion height in printable units.
pub const DEFAULT_MAX_HEIGHT: f64 = 5.0;
/// Default planar scale expressed as a percentage.
pub const DEFAULT_SCALE_PERCENT: f64 = 100.0;

/// Validated extrusion parameters for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshParameters {
    /// Height reached by a pure white pixel.
    pub max_height: f64,
    /// Planar units per pixel.
    pub planar_scale: f64,
}

impl Default for MeshParameters {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            planar_scale: DEFAULT_SCALE_PERCENT / 100.0,
        }
    }
}

impl MeshParameters {
    pub fn new(max_height: f64, planar_scale: f64) -> HeightmapResult<Self> {
        let params = Self {
            max_height,
            planar_scale,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reject zero, negative and non-finite values.
    pub fn validate(&self) -> HeightmapResult<()> {
        check_positive("max height", self.max_height)?;
        check_positive("planar scale", self.planar_scale)?;
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> HeightmapResult<f64> {
    if !value.is_finite() {
        return Err(HeightmapError::invalid_parameter(name, value, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(HeightmapError::invalid_parameter(
            name,
            value,
            "must be greater than zero",
        ));
    }
    Ok(value)
}

/// Parse an optional numeric field. `None` and blank strings mean "absent".
fn parse_optional(name: &'static str, raw: Option<&str>) -> HeightmapResult<Option<f64>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let value = raw
        .parse::<f64>()
        .map_err(|_| HeightmapError::invalid_parameter(name, raw, "not a number"))?;
    check_positive(name, value).map(Some)
}

/// Build parameters from the raw height and scale-percent fields.
///
/// Absent or blank fields use [`DEFAULT_MAX_HEIGHT`] and
/// [`DEFAULT_SCALE_PERCENT`]; present fields must parse as positive finite
/// numbers. The scale is a percentage, so `"50"` yields a planar scale of
/// `0.5`.
pub fn resolve_parameters(
    max_height: Option<&str>,
    scale_percent: Option<&str>,
) -> HeightmapResult<MeshParameters> {
    let max_height = parse_optional("max height", max_height)?.unwrap_or(DEFAULT_MAX_HEIGHT);
    let percent = parse_optional("scale percent", scale_percent)?.unwrap_or(DEFAULT_SCALE_PERCENT);
    let params = MeshParameters::new(max_height, percent / 100.0)?;
    log::debug!(
        "resolved mesh parameters: max_height={} planar_scale={}",
        params.max_height,
        params.planar_scale
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_use_defaults() {
        let params = resolve_parameters(None, None).unwrap();
        assert_eq!(params, MeshParameters::default());
        assert_eq!(params.max_height, 5.0);
        assert_eq!(params.planar_scale, 1.0);
    }

    #[test]
    fn blank_fields_count_as_absent() {
        let params = resolve_parameters(Some("  "), Some("")).unwrap();
        assert_eq!(params, MeshParameters::default());
    }

    #[test]
    fn scale_is_a_percentage() {
        let params = resolve_parameters(Some("2.5"), Some("50")).unwrap();
        assert_eq!(params.max_height, 2.5);
        assert_eq!(params.planar_scale, 0.5);
    }

    #[test]
    fn non_numeric_is_rejected_not_defaulted() {
        let err = resolve_parameters(Some("tall"), None).unwrap_err();
        assert_eq!(err.to_string(), "invalid max height 'tall': not a number");
    }

    #[test]
    fn zero_and_negative_are_rejected() {
        for raw in ["0", "-3", "NaN", "inf"] {
            let err = resolve_parameters(None, Some(raw)).unwrap_err();
            assert!(
                matches!(err, HeightmapError::InvalidParameter { name: "scale percent", .. }),
                "{raw} should be rejected, got {err}"
            );
        }
        assert!(MeshParameters::new(0.0, 1.0).is_err());
        assert!(MeshParameters::new(1.0, -1.0).is_err());
    }
}
