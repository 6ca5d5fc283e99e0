//! Measurement seam between the positioner and the host document.
//!
//! Unresolved references never fail: a missing top element counts as a zero
//! offset and a missing boundary element as no boundary at all.

use crate::geometry::{BoundingRect, Geometry};
use crate::options::{BottomBoundary, MeasureOverrides, StickyOptions, TopOffset};
use log::trace;

/// The two boxes a sticky panel is made of.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelRects {
    /// Wrapper that stays in document flow and reserves the panel's space.
    pub outer: BoundingRect,
    /// Box that actually moves when the panel is released or fixed.
    pub inner: BoundingRect,
}

/// Read-only view of the host document's layout.
pub trait MeasurementProvider {
    /// Viewport-relative boxes of the panel, or `None` while it is not laid out.
    fn panel_rects(&self) -> Option<PanelRects>;

    /// Offset height of the element matching `selector`.
    fn element_height(&self, selector: &str) -> Option<f64>;

    /// Viewport-relative box of the element matching `selector`.
    fn element_rect(&self, selector: &str) -> Option<BoundingRect>;
}

impl<M: MeasurementProvider + ?Sized> MeasurementProvider for &M {
    fn panel_rects(&self) -> Option<PanelRects> {
        (**self).panel_rects()
    }

    fn element_height(&self, selector: &str) -> Option<f64> {
        (**self).element_height(selector)
    }

    fn element_rect(&self, selector: &str) -> Option<BoundingRect> {
        (**self).element_rect(selector)
    }
}

/// Resolve the top-stick offset to pixels.
pub fn resolve_top<M: MeasurementProvider + ?Sized>(
    provider: &M,
    configured: &TopOffset,
    top_override: Option<&TopOffset>,
) -> f64 {
    match top_override.unwrap_or(configured) {
        TopOffset::Px(px) if px.is_nan() => 0.0,
        TopOffset::Px(px) => *px,
        TopOffset::Selector(selector) => provider
            .element_height(selector)
            .filter(|height| !height.is_nan())
            .unwrap_or(0.0),
    }
}

/// Resolve the bottom boundary to a document y, `+inf` when unbounded.
pub fn resolve_bottom_boundary<M: MeasurementProvider + ?Sized>(
    provider: &M,
    scroll_top: f64,
    configured: &BottomBoundary,
    boundary_override: Option<&BottomBoundary>,
) -> f64 {
    let boundary = match boundary_override.unwrap_or(configured) {
        BottomBoundary::Px(px) => *px,
        BottomBoundary::Selector(selector) => provider
            .element_rect(selector)
            .map_or(-1.0, |rect| scroll_top + rect.bottom),
    };
    if boundary > 0.0 {
        boundary
    } else {
        f64::INFINITY
    }
}

/// Build a fresh geometry cache, or `None` when the panel has no boxes yet.
pub fn measure_geometry<M: MeasurementProvider + ?Sized>(
    provider: &M,
    options: &StickyOptions,
    overrides: &MeasureOverrides,
    scroll_top: f64,
    viewport_height: f64,
) -> Option<Geometry> {
    let rects = provider.panel_rects()?;

    let width = rects.outer.resolved_width();
    let height = rects.inner.resolved_height();
    let outer_y = rects.outer.top + scroll_top;
    let top = resolve_top(provider, &options.top, overrides.effective_top());
    let bottom_boundary = resolve_bottom_boundary(
        provider,
        scroll_top,
        &options.bottom_boundary,
        overrides.effective_bottom_boundary(),
    );

    let geometry = Geometry {
        top,
        bottom_limit: (top + height).min(viewport_height),
        width,
        height,
        origin_x: rects.outer.left,
        origin_y: outer_y,
        top_boundary: outer_y,
        bottom_boundary,
    };
    trace!("measured sticky geometry: {geometry:?}");
    Some(geometry)
}
