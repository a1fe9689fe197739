//! Canvas configuration: scene bounds, zoom limits, element footprint.

use crate::error::{GardenError, Result};
use crate::model::SceneBounds;
use serde::{Deserialize, Serialize};

/// Configuration for a canvas editing session.
///
/// Every field has a default, so hosts may load a partial JSON object and
/// only override what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Logical scene size. Default: **500 × 400**.
    pub bounds: SceneBounds,

    /// Smallest allowed zoom factor. Default: **0.5**.
    pub min_zoom: f64,

    /// Largest allowed zoom factor. Default: **3.0**.
    pub max_zoom: f64,

    /// Multiplier applied by one zoom-in step (divisor for zoom-out). Default: **1.2**.
    pub zoom_step: f64,

    /// Side length, in scene units, of an element's hit footprint at scale 1.
    /// Default: **40**.
    pub element_extent: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            bounds: SceneBounds::default(),
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_step: 1.2,
            element_extent: 40.0,
        }
    }
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON configuration.
    ///
    /// # Errors
    /// Returns `GardenError::Codec` on malformed JSON or an inconsistent
    /// zoom range.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| GardenError::Codec(e.to_string()))?;
        if !(config.min_zoom > 0.0
            && config.min_zoom <= config.max_zoom
            && config.max_zoom.is_finite())
        {
            return Err(GardenError::Codec(format!(
                "invalid zoom range [{}, {}]",
                config.min_zoom, config.max_zoom
            )));
        }
        if !(config.zoom_step.is_finite() && config.zoom_step > 1.0) {
            return Err(GardenError::Codec(format!(
                "zoom step must exceed 1, got {}",
                config.zoom_step
            )));
        }
        if !config.bounds.is_valid() {
            return Err(GardenError::Codec(format!(
                "scene bounds must be positive, got {} x {}",
                config.bounds.width, config.bounds.height
            )));
        }
        if !(config.element_extent.is_finite() && config.element_extent > 0.0) {
            return Err(GardenError::Codec(format!(
                "element extent must be positive, got {}",
                config.element_extent
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json(r#"{ "maxZoom": 4.0 }"#).unwrap();
        assert_eq!(
            config,
            CanvasConfig {
                max_zoom: 4.0,
                ..CanvasConfig::default()
            }
        );
    }

    #[test]
    fn rejects_inverted_zoom_range() {
        let err = CanvasConfig::from_json(r#"{ "minZoom": 2.0, "maxZoom": 1.0 }"#).unwrap_err();
        assert!(matches!(err, GardenError::Codec(_)));
    }

    #[test]
    fn rejects_shrinking_zoom_step() {
        assert!(CanvasConfig::from_json(r#"{ "zoomStep": 0.8 }"#).is_err());
    }

    #[test]
    fn rejects_non_positive_bounds() {
        for json in [
            r#"{ "bounds": { "width": -10, "height": 400 } }"#,
            r#"{ "bounds": { "width": 500, "height": 0 } }"#,
        ] {
            let err = CanvasConfig::from_json(json).unwrap_err();
            assert!(matches!(err, GardenError::Codec(_)), "{json}");
        }
    }

    #[test]
    fn rejects_non_positive_extent() {
        assert!(CanvasConfig::from_json(r#"{ "elementExtent": 0 }"#).is_err());
        assert!(CanvasConfig::from_json(r#"{ "elementExtent": -4.5 }"#).is_err());
    }
}
