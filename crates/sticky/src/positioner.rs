//! The sticky positioning state machine.
//!
//! Every scroll or resize notification runs [`StickyPositioner::update`], which
//! is a deterministic function of the cached geometry, the scroll position and
//! the previous state. Two rules keep the panel from drifting:
//!
//! 1. Reset to the original position once the projected top reaches the top boundary.
//! 2. Release at the bottom boundary once the projected bottom reaches it.
//!
//! Between the boundaries a panel that fits below the top offset is always
//! fixed there. A taller panel alternates between RELEASED (scrolling with the
//! page) and FIXED (pinned at the top offset or at the viewport bottom),
//! depending on scroll direction.

use crate::environment::Environment;
use crate::geometry::Geometry;
use crate::measure::{self, MeasurementProvider};
use crate::options::{BottomBoundary, MeasureOverrides, StickyOptions, TopOffset};
use crate::render::RenderFrame;
use crate::status::{StatusChange, StickyStatus};
use log::{debug, trace};

/// Mutable positioning state, owned by one panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionState {
    /// Current status.
    pub status: StickyStatus,
    /// Render offset: viewport-relative when FIXED, relative to the origin when RELEASED.
    pub pos: f64,
    /// Document y of the panel top while resolving tall-panel transitions.
    pub sticky_top: f64,
    /// Document y of the panel bottom while resolving tall-panel transitions.
    pub sticky_bottom: f64,
    /// Signed scroll delta of the most recent update, positive when scrolling down.
    pub last_delta: f64,
    /// Set once geometry has been measured; gates transform-based rendering.
    pub activated: bool,
}

/// Which edge of a FIXED panel is pinned to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinnedEdge {
    Top,
    Bottom,
}

/// Geometry cache, status register and update algorithm for one panel.
#[derive(Debug, Clone)]
pub struct StickyPositioner {
    options: StickyOptions,
    environment: Environment,
    geometry: Geometry,
    state: PositionState,
}

impl StickyPositioner {
    /// Create a positioner in the ORIGINAL state with unmeasured geometry.
    #[must_use]
    pub fn new(options: StickyOptions, environment: Environment) -> Self {
        Self {
            options,
            environment,
            geometry: Geometry::default(),
            state: PositionState::default(),
        }
    }

    #[inline]
    pub const fn options(&self) -> &StickyOptions {
        &self.options
    }

    #[inline]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub const fn state(&self) -> &PositionState {
        &self.state
    }

    #[inline]
    pub const fn status(&self) -> StickyStatus {
        self.state.status
    }

    #[inline]
    pub const fn pos(&self) -> f64 {
        self.state.pos
    }

    /// Replace the geometry cache with values measured elsewhere.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Store a new viewport height, as reported by a resize notification.
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.environment.viewport_height = viewport_height.max(0.0);
    }

    pub fn set_activated(&mut self, activated: bool) {
        self.state.activated = activated;
    }

    /// Toggle the panel. Disabling resets it to ORIGINAL immediately.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<StatusChange> {
        self.options.enabled = enabled;
        if enabled { None } else { self.reset() }
    }

    /// Returns `true` when the configured top offset actually changed.
    pub fn set_top(&mut self, top: TopOffset) -> bool {
        if self.options.top == top {
            return false;
        }
        self.options.top = top;
        true
    }

    /// Returns `true` when the configured bottom boundary actually changed.
    pub fn set_bottom_boundary(&mut self, bottom_boundary: BottomBoundary) -> bool {
        if self.options.bottom_boundary == bottom_boundary {
            return false;
        }
        self.options.bottom_boundary = bottom_boundary;
        true
    }

    /// Whether offsets should be rendered as transforms.
    pub fn use_transforms(&self) -> bool {
        self.environment.transforms_supported && self.options.enable_transforms
    }

    /// Recompute the geometry cache from the host document.
    ///
    /// Leaves the previous geometry in place and returns `false` when the panel
    /// is not laid out yet.
    pub fn measure<M: MeasurementProvider + ?Sized>(
        &mut self,
        provider: &M,
        scroll_top: f64,
        overrides: &MeasureOverrides,
    ) -> bool {
        match measure::measure_geometry(
            provider,
            &self.options,
            overrides,
            scroll_top,
            self.environment.viewport_height,
        ) {
            Some(geometry) => {
                self.geometry = geometry;
                true
            }
            None => false,
        }
    }

    /// Snapshot handed to the render sink.
    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            status: self.state.status,
            pos: self.state.pos,
            width: self.geometry.width,
            height: self.geometry.height,
            activated: self.state.activated,
        }
    }

    /// Force the ORIGINAL state.
    pub fn reset(&mut self) -> Option<StatusChange> {
        let from = self.state.status;
        self.reset_state();
        self.observe(from)
    }

    /// Recompute status and offset for the given scroll position and delta.
    ///
    /// Returns the status change when this call ends in a different status
    /// than it started with.
    pub fn update(&mut self, scroll_top: f64, delta: f64) -> Option<StatusChange> {
        let from = self.state.status;
        self.step(scroll_top, delta);
        self.state.last_delta = delta;
        trace!(
            "sticky update scroll_top={scroll_top} delta={delta} -> {} pos={}",
            self.state.status,
            self.state.pos
        );
        self.observe(from)
    }

    fn observe(&self, from: StickyStatus) -> Option<StatusChange> {
        let to = self.state.status;
        if from == to {
            return None;
        }
        debug!("sticky panel {from} -> {to} at {}", self.state.pos);
        Some(StatusChange { from, to })
    }

    fn is_disabled(&self) -> bool {
        !self.options.enabled || self.geometry.region_too_short() || !self.geometry.is_measured()
    }

    fn step(&mut self, scroll_top: f64, delta: f64) {
        if self.is_disabled() {
            if self.state.status != StickyStatus::Original {
                self.reset_state();
            }
            return;
        }

        let geometry = self.geometry;
        // Viewport anchors projected onto the document.
        let top = scroll_top + geometry.top;
        let bottom = scroll_top + geometry.bottom_limit;

        if top <= geometry.top_boundary {
            self.reset_state();
        } else if bottom >= geometry.bottom_boundary {
            self.state.sticky_bottom = geometry.bottom_boundary;
            self.state.sticky_top = self.state.sticky_bottom - geometry.height;
            self.release(self.state.sticky_top);
        } else if !geometry.exceeds_band(self.environment.viewport_height) {
            self.fix(geometry.top);
        } else {
            match self.state.status {
                StickyStatus::Original => {
                    // A single jump (e.g. a programmatic scroll) may carry the
                    // panel straight on to FIXED, so RELEASED runs in the same call.
                    self.release_at_origin();
                    self.follow_released(top, bottom, delta);
                }
                StickyStatus::Released => self.follow_released(top, bottom, delta),
                StickyStatus::Fixed => self.follow_fixed(top, bottom, delta),
            }
        }
    }

    fn release_at_origin(&mut self) {
        let origin_y = self.geometry.origin_y;
        self.release(origin_y);
        self.state.sticky_top = origin_y;
        self.state.sticky_bottom = origin_y + self.geometry.height;
    }

    /// RELEASED: stay put until the viewport edge in the scroll direction passes the panel edge.
    fn follow_released(&mut self, top: f64, bottom: f64, delta: f64) {
        self.state.sticky_bottom = self.state.sticky_top + self.geometry.height;
        if delta > 0.0 && bottom > self.state.sticky_bottom {
            self.fix(self.geometry.bottom_pin());
        } else if delta < 0.0 && top < self.state.sticky_top {
            self.fix(self.geometry.top);
        }
    }

    /// FIXED: release once scrolling away from the pinned edge, or when the height changed.
    fn follow_fixed(&mut self, top: f64, bottom: f64, delta: f64) {
        let height = self.geometry.height;
        let (sticky_top, sticky_bottom) = match self.pinned_edge() {
            Some(PinnedEdge::Top) if delta > 0.0 => {
                let sticky_top = top - delta;
                (sticky_top, sticky_top + height)
            }
            Some(PinnedEdge::Bottom) if delta < 0.0 => {
                let sticky_bottom = bottom - delta;
                (sticky_bottom - height, sticky_bottom)
            }
            Some(_) => return,
            None => {
                // Pinned to neither edge: the panel height changed while fixed.
                let delta_height = self.state.pos + height - self.geometry.bottom_limit;
                let sticky_bottom = bottom - delta + delta_height;
                (sticky_bottom - height, sticky_bottom)
            }
        };
        self.state.sticky_top = sticky_top;
        self.state.sticky_bottom = sticky_bottom;
        self.release(sticky_top);
    }

    #[allow(
        clippy::float_cmp,
        reason = "FIXED offsets are copied verbatim from the geometry, so exact equality identifies the pinned edge"
    )]
    fn pinned_edge(&self) -> Option<PinnedEdge> {
        if self.state.pos == self.geometry.top {
            Some(PinnedEdge::Top)
        } else if self.state.pos == self.geometry.bottom_pin() {
            Some(PinnedEdge::Bottom)
        } else {
            None
        }
    }

    fn reset_state(&mut self) {
        self.state.status = StickyStatus::Original;
        self.state.pos = 0.0;
    }

    fn release(&mut self, document_y: f64) {
        self.state.status = StickyStatus::Released;
        self.state.pos = document_y - self.geometry.origin_y;
    }

    fn fix(&mut self, viewport_y: f64) {
        self.state.status = StickyStatus::Fixed;
        self.state.pos = viewport_y;
    }
}
