//! Shared helpers for sticky panel integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use sticky::{
    DocumentBox, Environment, Positioning, StaticDocument, StickyOptions, StickyPanel, StickyStatus,
};

pub const PANEL_WIDTH: f64 = 100.0;
pub const VIEWPORT_HEIGHT: f64 = 768.0;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A panel at document y `origin_y`, mounted at scroll offset 0.
pub fn mounted_panel(
    height: f64,
    origin_y: f64,
    options: StickyOptions,
) -> StickyPanel<StaticDocument> {
    mounted_in(document(height, origin_y), options)
}

pub fn document(height: f64, origin_y: f64) -> StaticDocument {
    StaticDocument::with_panel(DocumentBox {
        x: 0.0,
        y: origin_y,
        width: PANEL_WIDTH,
        height,
    })
}

pub fn mounted_in(document: StaticDocument, options: StickyOptions) -> StickyPanel<StaticDocument> {
    init_logging();
    let mut panel = StickyPanel::new(document, options, Environment::new(VIEWPORT_HEIGHT, true));
    panel.mount(0.0);
    panel
}

/// Scroll the document the way a browser notifier reports it: start, then delta.
pub fn scroll_to(panel: &mut StickyPanel<StaticDocument>, scroll_top: f64) {
    let delta = scroll_top - panel.provider().scroll_top;
    panel.provider_mut().scroll_top = scroll_top;
    panel.on_scroll_start(scroll_top);
    panel.on_scroll(scroll_top, delta);
}

fn assert_pos(panel: &StickyPanel<StaticDocument>, pos: f64) {
    let actual = panel.positioner().pos();
    assert!((actual - pos).abs() < 1e-9, "expected pos {pos}, got {actual}");
}

pub fn assert_fixed_at(panel: &StickyPanel<StaticDocument>, pos: i64) {
    assert_eq!(panel.status(), StickyStatus::Fixed);
    assert_pos(panel, pos as f64);
    let style = panel.style();
    assert_eq!(style.position, Positioning::Fixed);
    assert_eq!(style.top, Some(0.0));
    assert_eq!(style.translate_y, Some(pos));
    assert_eq!(style.width, Some(PANEL_WIDTH));
}

pub fn assert_released_at(panel: &StickyPanel<StaticDocument>, pos: i64) {
    assert_eq!(panel.status(), StickyStatus::Released);
    assert_pos(panel, pos as f64);
    let style = panel.style();
    assert_eq!(style.position, Positioning::Relative);
    assert_eq!(style.top, None);
    assert_eq!(style.translate_y, Some(pos));
    assert_eq!(style.width, Some(PANEL_WIDTH));
}

pub fn assert_reset(panel: &StickyPanel<StaticDocument>) {
    assert_eq!(panel.status(), StickyStatus::Original);
    assert_pos(panel, 0.0);
    let style = panel.style();
    assert_eq!(style.position, Positioning::Relative);
    assert_eq!(style.width, None);
}
