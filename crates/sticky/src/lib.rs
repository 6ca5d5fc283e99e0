//! Sticky panel positioning.
//!
//! This crate decides, on every scroll or resize notification, whether a panel
//! renders at its natural position (ORIGINAL), at a computed document offset
//! (RELEASED), or pinned to the viewport (FIXED). The host supplies layout
//! measurements through [`MeasurementProvider`] and draws whatever
//! [`RenderFrame`] comes out.

pub mod document;
pub mod environment;
pub mod event;
pub mod geometry;
pub mod measure;
pub mod options;
pub mod panel;
pub mod positioner;
pub mod render;
pub mod scheduler;
pub mod status;

pub use document::{DocumentBox, StaticDocument};
pub use environment::Environment;
pub use event::ScrollEvent;
pub use geometry::{BoundingRect, Geometry};
pub use measure::{MeasurementProvider, PanelRects};
pub use options::{BottomBoundary, MeasureOverrides, StickyOptions, TopOffset};
pub use panel::StickyPanel;
pub use positioner::{PositionState, StickyPositioner};
pub use render::{PanelStyle, Positioning, RenderFrame, needs_render};
pub use scheduler::FrameCoalescer;
pub use status::{StatusChange, StickyStatus};
