//! In-memory document for hosts without a live layout engine.

use crate::geometry::BoundingRect;
use crate::measure::{MeasurementProvider, PanelRects};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DocumentBox {
    /// The same box seen through a viewport scrolled to `scroll_top`.
    pub fn viewport_rect(&self, scroll_top: f64) -> BoundingRect {
        BoundingRect::from_origin(self.x, self.y - scroll_top, self.width, self.height)
    }
}

/// Scroll offset, panel box and named elements of a static page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticDocument {
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// The sticky panel, `None` while it is not laid out.
    pub panel: Option<DocumentBox>,
    /// Elements addressable by selector.
    pub elements: HashMap<String, DocumentBox>,
}

impl StaticDocument {
    /// A document holding only the panel.
    #[must_use]
    pub fn with_panel(panel: DocumentBox) -> Self {
        Self {
            panel: Some(panel),
            ..Self::default()
        }
    }

    /// Add an element reachable through `selector`.
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, element: DocumentBox) -> Self {
        self.elements.insert(selector.into(), element);
        self
    }

    /// Resize the panel, as a content change would.
    pub fn set_panel_height(&mut self, height: f64) {
        if let Some(panel) = self.panel.as_mut() {
            panel.height = height;
        }
    }
}

impl MeasurementProvider for StaticDocument {
    fn panel_rects(&self) -> Option<PanelRects> {
        let rect = self.panel?.viewport_rect(self.scroll_top);
        Some(PanelRects {
            outer: rect,
            inner: rect,
        })
    }

    fn element_height(&self, selector: &str) -> Option<f64> {
        self.elements.get(selector).map(|element| element.height)
    }

    fn element_rect(&self, selector: &str) -> Option<BoundingRect> {
        self.elements
            .get(selector)
            .map(|element| element.viewport_rect(self.scroll_top))
    }
}
