//! Host-facing wiring for one sticky panel.
//!
//! [`StickyPanel`] receives notifications from the scroll/resize source,
//! decides when geometry has to be re-measured, drives the positioner and
//! reports status changes back to the host.

use crate::environment::Environment;
use crate::event::ScrollEvent;
use crate::measure::MeasurementProvider;
use crate::options::{BottomBoundary, MeasureOverrides, StickyOptions, TopOffset};
use crate::positioner::StickyPositioner;
use crate::render::{PanelStyle, RenderFrame, needs_render};
use crate::status::{StatusChange, StickyStatus};
use log::debug;
use tracing::trace_span;

/// Host predicate polled before every notification is handled.
pub type FreezePredicate = Box<dyn Fn() -> bool>;
/// Host callback run once per observed status change.
pub type StateChangeCallback = Box<dyn FnMut(StickyStatus)>;

/// One sticky panel bound to the document it measures.
pub struct StickyPanel<M> {
    provider: M,
    positioner: StickyPositioner,
    /// Last scroll offset seen, `None` until the first sample.
    scroll_top: Option<f64>,
    /// Set when a scroll start reported an unchanged offset.
    skip_next_scroll: bool,
    should_freeze: Option<FreezePredicate>,
    on_state_change: Option<StateChangeCallback>,
    last_rendered: Option<RenderFrame>,
}

impl<M: MeasurementProvider> StickyPanel<M> {
    #[must_use]
    pub fn new(provider: M, options: StickyOptions, environment: Environment) -> Self {
        Self {
            provider,
            positioner: StickyPositioner::new(options, environment),
            scroll_top: None,
            skip_next_scroll: false,
            should_freeze: None,
            on_state_change: None,
            last_rendered: None,
        }
    }

    /// Attach the host's freeze predicate.
    #[must_use]
    pub fn with_freeze(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.should_freeze = Some(Box::new(predicate));
        self
    }

    /// Attach the host's status-change callback.
    #[must_use]
    pub fn with_state_change(mut self, callback: impl FnMut(StickyStatus) + 'static) -> Self {
        self.on_state_change = Some(Box::new(callback));
        self
    }

    #[inline]
    pub const fn positioner(&self) -> &StickyPositioner {
        &self.positioner
    }

    #[inline]
    pub const fn provider(&self) -> &M {
        &self.provider
    }

    /// Mutable access to the measured document, e.g. to mirror layout changes.
    #[inline]
    pub const fn provider_mut(&mut self) -> &mut M {
        &mut self.provider
    }

    #[inline]
    pub const fn status(&self) -> StickyStatus {
        self.positioner.status()
    }

    /// Last scroll offset the panel has seen.
    #[inline]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top.unwrap_or(0.0)
    }

    /// Whether the host currently asks the panel not to react.
    pub fn is_frozen(&self) -> bool {
        self.should_freeze.as_ref().is_some_and(|predicate| predicate())
    }

    /// Attach to the document at its current scroll offset.
    pub fn mount(&mut self, scroll_top: f64) {
        let _span = trace_span!("sticky.mount").entered();
        self.scroll_top = Some(scroll_top);
        if self.positioner.options().enabled {
            self.positioner.set_activated(true);
            self.measure_and_update();
        }
    }

    /// Dispatch one notification from the scroll/resize source.
    pub fn handle(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::ScrollStart { scroll_top } => self.on_scroll_start(scroll_top),
            ScrollEvent::Scroll { scroll_top, delta } => self.on_scroll(scroll_top, delta),
            ScrollEvent::Resize { viewport_height } => self.on_resize(viewport_height),
        }
    }

    /// Scrolling began: re-measure unless the offset did not move.
    pub fn on_scroll_start(&mut self, scroll_top: f64) {
        let _span = trace_span!("sticky.scroll_start", scroll_top).entered();
        if self.is_frozen() {
            return;
        }
        if self.scroll_top == Some(scroll_top) {
            self.skip_next_scroll = true;
        } else {
            self.skip_next_scroll = false;
            self.scroll_top = Some(scroll_top);
            self.measure(&MeasureOverrides::default());
        }
    }

    /// The document scrolled: run the state machine.
    pub fn on_scroll(&mut self, scroll_top: f64, delta: f64) {
        let _span = trace_span!("sticky.scroll", scroll_top, delta).entered();
        if self.is_frozen() {
            return;
        }
        if self.skip_next_scroll {
            self.skip_next_scroll = false;
            return;
        }
        self.scroll_top = Some(scroll_top);
        let change = self.positioner.update(scroll_top, delta);
        self.notify(change);
    }

    /// The viewport was resized.
    pub fn on_resize(&mut self, viewport_height: f64) {
        let _span = trace_span!("sticky.resize", viewport_height).entered();
        if self.is_frozen() {
            return;
        }
        self.positioner.set_viewport_height(viewport_height);
        self.measure_and_update();
    }

    /// The bottom-boundary element changed size.
    pub fn on_boundary_resize(&mut self) {
        let _span = trace_span!("sticky.boundary_resize").entered();
        if self.is_frozen() {
            return;
        }
        self.measure_and_update();
    }

    /// The panel's content changed, so its box may have too.
    pub fn on_content_change(&mut self) {
        let _span = trace_span!("sticky.content_change").entered();
        if self.is_frozen() {
            return;
        }
        self.measure_and_update();
    }

    /// Turn sticking on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.positioner.options().enabled == enabled {
            return;
        }
        debug!("sticky panel enabled: {enabled}");
        self.positioner.set_activated(enabled);
        let change = self.positioner.set_enabled(enabled);
        if enabled {
            self.measure_and_update();
        } else {
            self.notify(change);
        }
    }

    /// Change the top offset, re-measuring when it differs.
    pub fn set_top(&mut self, top: TopOffset) {
        if self.positioner.set_top(top) {
            self.measure_and_update();
        }
    }

    /// Change the bottom boundary, re-measuring when it differs.
    pub fn set_bottom_boundary(&mut self, bottom_boundary: BottomBoundary) {
        if self.positioner.set_bottom_boundary(bottom_boundary) {
            self.measure_and_update();
        }
    }

    /// Re-measure geometry at the current scroll offset. Returns `false` when the panel is not laid out.
    pub fn measure(&mut self, overrides: &MeasureOverrides) -> bool {
        let scroll_top = self.scroll_top();
        self.positioner.measure(&self.provider, scroll_top, overrides)
    }

    /// The frame to draw, or `None` when nothing changed since the last one or the panel is frozen.
    pub fn render(&mut self) -> Option<RenderFrame> {
        if self.is_frozen() {
            return None;
        }
        let frame = self.positioner.frame();
        if !needs_render(self.last_rendered.as_ref(), &frame) {
            return None;
        }
        self.last_rendered = Some(frame);
        Some(frame)
    }

    /// Inline style for the current frame.
    pub fn style(&self) -> PanelStyle {
        PanelStyle::from_frame(&self.positioner.frame(), self.positioner.use_transforms())
            .with_z_index(self.positioner.options().inner_z)
    }

    fn measure_and_update(&mut self) {
        self.measure(&MeasureOverrides::default());
        let delta = self.positioner.state().last_delta;
        let change = self.positioner.update(self.scroll_top(), delta);
        self.notify(change);
    }

    fn notify(&mut self, change: Option<StatusChange>) {
        let Some(change) = change else {
            return;
        };
        if let Some(callback) = self.on_state_change.as_mut() {
            callback(change.to);
        }
    }
}
