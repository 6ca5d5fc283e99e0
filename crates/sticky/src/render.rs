//! Render-side view of a sticky panel.
//!
//! The positioner hands a [`RenderFrame`] to whatever draws the panel. This
//! module derives the inline style a DOM-like sink would apply and the
//! equality check used to skip redundant renders.

use crate::status::StickyStatus;
use serde::{Deserialize, Serialize};

/// What the render sink receives after every update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderFrame {
    pub status: StickyStatus,
    pub pos: f64,
    pub width: f64,
    pub height: f64,
    pub activated: bool,
}

/// Whether a sink that last drew `previous` has to redraw for `next`.
pub fn needs_render(previous: Option<&RenderFrame>, next: &RenderFrame) -> bool {
    previous != Some(next)
}

/// CSS `position` of the moving inner box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    Fixed,
    Relative,
}

impl Positioning {
    const fn as_css(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Relative => "relative",
        }
    }
}

/// Inline style for the panel's outer and inner boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    /// `position` of the inner box.
    pub position: Positioning,
    /// `top` of the inner box in pixels, `None` when left unset.
    pub top: Option<f64>,
    /// Vertical `translate3d` offset in whole pixels, when transforms are used.
    pub translate_y: Option<i64>,
    /// Pinned inner width while the panel is out of flow.
    pub width: Option<f64>,
    /// Pinned outer height while the panel is out of flow, keeping its slot open.
    pub outer_height: Option<f64>,
    /// `z-index` of the inner box.
    pub z_index: Option<i64>,
}

impl PanelStyle {
    /// Derive the style for `frame`.
    ///
    /// `transforms` is the combined capability and option flag; it only takes
    /// effect once the panel is activated, so nothing is translated before the
    /// first measurement.
    pub fn from_frame(frame: &RenderFrame, transforms: bool) -> Self {
        let fixed = frame.status == StickyStatus::Fixed;
        let position = if fixed {
            Positioning::Fixed
        } else {
            Positioning::Relative
        };
        let (top, translate_y) = if transforms && frame.activated {
            (fixed.then_some(0.0), Some(round_half_up(frame.pos)))
        } else {
            (Some(frame.pos), None)
        };
        let out_of_flow = frame.status != StickyStatus::Original;
        Self {
            position,
            top,
            translate_y,
            width: out_of_flow.then_some(frame.width),
            outer_height: out_of_flow.then_some(frame.height),
            z_index: None,
        }
    }

    /// Stack the inner box at `z_index`.
    #[must_use]
    pub const fn with_z_index(mut self, z_index: Option<i64>) -> Self {
        self.z_index = z_index;
        self
    }

    /// Declarations for the inner box, e.g. `position: fixed; top: 0px; transform: translate3d(0,-432px,0)`.
    pub fn inner_css(&self) -> String {
        let mut css = format!("position: {}", self.position.as_css());
        if let Some(top) = self.top {
            css.push_str(&format!("; top: {top}px"));
        }
        if let Some(translate_y) = self.translate_y {
            css.push_str(&format!("; transform: translate3d(0,{translate_y}px,0)"));
        }
        if let Some(width) = self.width {
            css.push_str(&format!("; width: {width}px"));
        }
        if let Some(z_index) = self.z_index {
            css.push_str(&format!("; z-index: {z_index}"));
        }
        css
    }

    /// Declarations for the outer box; empty while the panel is in flow.
    pub fn outer_css(&self) -> String {
        self.outer_height
            .map(|height| format!("height: {height}px"))
            .unwrap_or_default()
    }
}

/// Round to the nearest integer, ties towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(status: StickyStatus, pos: f64, activated: bool) -> RenderFrame {
        RenderFrame {
            status,
            pos,
            width: 100.0,
            height: 300.0,
            activated,
        }
    }

    /// A fixed panel is pinned to the viewport top and translated.
    #[test]
    fn fixed_frame_uses_transform() {
        let style = PanelStyle::from_frame(&frame(StickyStatus::Fixed, -432.0, true), true);
        assert_eq!(style.position, Positioning::Fixed);
        assert_eq!(
            style.inner_css(),
            "position: fixed; top: 0px; transform: translate3d(0,-432px,0); width: 100px"
        );
        assert_eq!(style.outer_css(), "height: 300px");
    }

    /// Before activation the offset goes through `top` instead of a transform.
    #[test]
    fn inactive_frame_uses_top() {
        let style = PanelStyle::from_frame(&frame(StickyStatus::Released, 80.0, false), true);
        assert_eq!(style.position, Positioning::Relative);
        assert_eq!(style.translate_y, None);
        assert_eq!(style.inner_css(), "position: relative; top: 80px; width: 100px");
    }

    /// An original panel stays in flow without pinned dimensions.
    #[test]
    fn original_frame_is_in_flow() {
        let style = PanelStyle::from_frame(&frame(StickyStatus::Original, 0.0, true), true);
        assert_eq!(style.inner_css(), "position: relative; transform: translate3d(0,0px,0)");
        assert!(style.outer_css().is_empty());
    }

    /// The inner z-index applies in every status.
    #[test]
    fn z_index_is_appended() {
        let style = PanelStyle::from_frame(&frame(StickyStatus::Original, 0.0, false), true)
            .with_z_index(Some(5));
        assert_eq!(style.inner_css(), "position: relative; top: 0px; z-index: 5");
    }

    /// Ties round towards positive infinity.
    #[test]
    fn translate_rounding() {
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-432.4), -432);
    }

    /// Identical frames do not need a redraw.
    #[test]
    fn render_gating() {
        let current = frame(StickyStatus::Fixed, 0.0, true);
        assert!(needs_render(None, &current));
        assert!(!needs_render(Some(&current), &current));
        assert!(needs_render(
            Some(&current),
            &frame(StickyStatus::Released, 0.0, true)
        ));
    }
}
