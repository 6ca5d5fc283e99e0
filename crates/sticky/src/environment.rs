//! Host environment shared by every sticky panel.
//!
//! The viewport height and the transform capability are computed once by the
//! host and handed to each positioner. Configuration can be loaded from
//! environment variables or constructed programmatically.

use serde::{Deserialize, Serialize};
use std::env;

/// Viewport height assumed when the host does not report one.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 768.0;

/// Values a positioner reads from its host instead of from globals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Viewport height in pixels
    pub viewport_height: f64,
    /// Whether the host can render `translate3d` offsets
    pub transforms_supported: bool,
}

impl Environment {
    /// Construct an `Environment` with explicit values.
    ///
    /// # Arguments
    ///
    /// * `viewport_height` - Viewport height in pixels (negative values clamp to 0)
    /// * `transforms_supported` - Whether 3D transforms are available
    #[inline]
    #[must_use]
    pub fn new(viewport_height: f64, transforms_supported: bool) -> Self {
        Self {
            viewport_height: viewport_height.max(0.0),
            transforms_supported,
        }
    }

    /// Load the environment from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `STICKY_VIEWPORT_HEIGHT`: Viewport height in pixels (default: 768)
    /// - `STICKY_TRANSFORMS`: Set to "0" to disable transforms (default: enabled)
    ///
    /// # Returns
    ///
    /// A new `Environment` populated from environment variables
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load the environment through `lookup`, which maps a variable name to its value.
    ///
    /// Unparsable or non-finite heights fall back to the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let viewport_height = lookup("STICKY_VIEWPORT_HEIGHT")
            .and_then(|val| val.trim().parse::<f64>().ok())
            .filter(|height| height.is_finite())
            .unwrap_or(DEFAULT_VIEWPORT_HEIGHT);
        let transforms_supported = lookup("STICKY_TRANSFORMS").as_deref() != Some("0");
        Self::new(viewport_height, transforms_supported)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_HEIGHT, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Negative viewport heights are clamped.
    #[test]
    fn negative_height_clamps_to_zero() {
        let environment = Environment::new(-5.0, false);
        assert!(environment.viewport_height.abs() < f64::EPSILON);
        assert!(!environment.transforms_supported);
    }

    /// Variables override the defaults; bad values fall back.
    #[test]
    fn lookup_reads_variables() {
        let environment = Environment::from_lookup(|name| match name {
            "STICKY_VIEWPORT_HEIGHT" => Some("900".to_owned()),
            "STICKY_TRANSFORMS" => Some("0".to_owned()),
            _ => None,
        });
        assert_eq!(environment, Environment::new(900.0, false));

        let fallback = Environment::from_lookup(|name| {
            (name == "STICKY_VIEWPORT_HEIGHT").then(|| "tall".to_owned())
        });
        assert_eq!(fallback, Environment::default());

        let clamped = Environment::from_lookup(|name| {
            (name == "STICKY_VIEWPORT_HEIGHT").then(|| "-20".to_owned())
        });
        assert!(clamped.viewport_height.abs() < f64::EPSILON);
    }

    /// The default matches the common desktop viewport.
    #[test]
    fn default_viewport() {
        let environment = Environment::default();
        assert!((environment.viewport_height - DEFAULT_VIEWPORT_HEIGHT).abs() < f64::EPSILON);
        assert!(environment.transforms_supported);
    }
}
