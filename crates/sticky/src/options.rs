//! Configuration surface of a sticky panel.

use serde::{Deserialize, Serialize};

/// Where the panel sticks relative to the viewport top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopOffset {
    /// A literal pixel offset.
    Px(f64),
    /// A selector; the referenced element's height is the offset.
    Selector(String),
}

impl Default for TopOffset {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

/// Document-space end of the stickable region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BottomBoundary {
    /// A literal document y. Zero or negative means unbounded.
    Px(f64),
    /// A selector; the referenced element's bottom edge is the boundary.
    Selector(String),
}

impl Default for BottomBoundary {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

/// Options recognised by [`crate::StickyPositioner`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickyOptions {
    /// Disabling forces the panel back to its original position.
    pub enabled: bool,
    /// Top-stick offset.
    pub top: TopOffset,
    /// Bottom of the stickable region.
    pub bottom_boundary: BottomBoundary,
    /// Allow `translate3d` offsets when the environment supports them.
    pub enable_transforms: bool,
    /// `z-index` of the inner box, left unset when `None`.
    pub inner_z: Option<i64>,
}

impl Default for StickyOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            top: TopOffset::default(),
            bottom_boundary: BottomBoundary::default(),
            enable_transforms: true,
            inner_z: None,
        }
    }
}

/// One-shot replacements for the configured offsets during a measurement.
///
/// A literal `0` override counts as absent and the configured value is used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureOverrides {
    pub top: Option<TopOffset>,
    pub bottom_boundary: Option<BottomBoundary>,
}

impl MeasureOverrides {
    /// The top override, if it carries a meaningful value.
    pub(crate) fn effective_top(&self) -> Option<&TopOffset> {
        self.top.as_ref().filter(|top| match top {
            TopOffset::Px(px) => *px != 0.0 && !px.is_nan(),
            TopOffset::Selector(selector) => !selector.is_empty(),
        })
    }

    /// The boundary override, if it carries a meaningful value.
    pub(crate) fn effective_bottom_boundary(&self) -> Option<&BottomBoundary> {
        self.bottom_boundary.as_ref().filter(|boundary| match boundary {
            BottomBoundary::Px(px) => *px != 0.0 && !px.is_nan(),
            BottomBoundary::Selector(selector) => !selector.is_empty(),
        })
    }
}
