//! Geometry cache for a sticky panel.
//!
//! All vertical values are CSS pixels. `top` and `bottom_limit` are measured
//! from the viewport top; the origin and boundaries are document coordinates.

use serde::{Deserialize, Serialize};

/// A viewport-relative box, as reported by `getBoundingClientRect`-style APIs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingRect {
    /// Top edge in pixels from the viewport top.
    pub top: f64,
    /// Bottom edge in pixels from the viewport top.
    pub bottom: f64,
    /// Left edge in pixels from the viewport left.
    pub left: f64,
    /// Right edge in pixels from the viewport left.
    pub right: f64,
    /// Reported width, may be zero for boxes that only expose edges.
    pub width: f64,
    /// Reported height, may be zero for boxes that only expose edges.
    pub height: f64,
}

impl BoundingRect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn from_origin(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            left,
            right: left + width,
            width,
            height,
        }
    }

    /// Width, falling back to the horizontal edge span when none was reported.
    pub fn resolved_width(&self) -> f64 {
        non_zero_or(self.width, self.right - self.left)
    }

    /// Height, falling back to the vertical edge span when none was reported.
    pub fn resolved_height(&self) -> f64 {
        non_zero_or(self.height, self.bottom - self.top)
    }
}

fn non_zero_or(value: f64, fallback: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        fallback
    } else {
        value
    }
}

/// Measured dimensions and boundaries of a sticky panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Resolved top-stick offset from the viewport top.
    pub top: f64,
    /// `min(top + height, viewport_height)`: where the panel bottom pins when scrolling down.
    pub bottom_limit: f64,
    /// Natural panel width.
    pub width: f64,
    /// Natural panel height.
    pub height: f64,
    /// Natural document x of the panel.
    pub origin_x: f64,
    /// Natural document y of the panel.
    pub origin_y: f64,
    /// Document-space start of the stickable region.
    pub top_boundary: f64,
    /// Document-space end of the stickable region, `+inf` when unbounded.
    pub bottom_boundary: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom_limit: 0.0,
            width: 0.0,
            height: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
            top_boundary: 0.0,
            bottom_boundary: f64::INFINITY,
        }
    }
}

impl Geometry {
    /// Whether the panel has a box at all; an unmeasured panel is `0 x 0`.
    pub fn is_measured(&self) -> bool {
        self.width != 0.0 || self.height != 0.0
    }

    /// The stickable region cannot hold the panel, so sticking never applies.
    pub fn region_too_short(&self) -> bool {
        self.bottom_boundary - self.top_boundary <= self.height
    }

    /// Viewport offset at which the panel's bottom edge meets `bottom_limit`.
    pub fn bottom_pin(&self) -> f64 {
        self.bottom_limit - self.height
    }

    /// The panel is taller than the band between the top offset and the viewport bottom.
    pub fn exceeds_band(&self, viewport_height: f64) -> bool {
        self.height > viewport_height - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rectangles that only report edges still yield a usable size.
    #[test]
    fn edge_only_rect_resolves_size() {
        let rect = BoundingRect {
            top: 10.0,
            bottom: 310.0,
            left: 5.0,
            right: 105.0,
            width: 0.0,
            height: 0.0,
        };
        assert!((rect.resolved_width() - 100.0).abs() < f64::EPSILON);
        assert!((rect.resolved_height() - 300.0).abs() < f64::EPSILON);
    }

    /// A default geometry is unmeasured and unbounded below.
    #[test]
    fn default_geometry_is_unmeasured() {
        let geometry = Geometry::default();
        assert!(!geometry.is_measured());
        assert!(geometry.bottom_boundary.is_infinite());
        assert!(!geometry.region_too_short());
    }

    /// A region exactly as tall as the panel counts as too short.
    #[test]
    fn region_equal_to_height_is_too_short() {
        let geometry = Geometry {
            height: 200.0,
            top_boundary: 0.0,
            bottom_boundary: 200.0,
            ..Geometry::default()
        };
        assert!(geometry.region_too_short());
    }
}
