//! Notifications delivered by the host's scroll/resize source.

use serde::{Deserialize, Serialize};

/// One notification from the scroll/resize source.
///
/// A `ScrollStart` for a position must reach the panel before the `Scroll`
/// carrying the delta to that position, so updates always see geometry
/// measured at the scroll offset they are given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollEvent {
    /// Scrolling began (or a new frame of scrolling began) at `scroll_top`.
    ScrollStart { scroll_top: f64 },
    /// The document scrolled to `scroll_top`, `delta` pixels since the last sample.
    Scroll { scroll_top: f64, delta: f64 },
    /// The viewport was resized to `viewport_height`.
    Resize { viewport_height: f64 },
}
