//! Drives a [`StickyPanel`] through a script and records what it renders.

use crate::script::{Script, Step};
use anyhow::Error;
use log::{debug, info};
use serde::Serialize;
use std::io::Write;
use sticky::{Environment, ScrollEvent, StaticDocument, StickyPanel, StickyStatus};

/// The panel as seen after one step. Step 0 is the mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayLine {
    pub step: usize,
    pub action: &'static str,
    pub status: StickyStatus,
    pub pos: f64,
    pub inner_css: String,
    pub outer_css: String,
}

impl ReplayLine {
    fn capture(step: usize, action: &'static str, panel: &StickyPanel<StaticDocument>) -> Self {
        let style = panel.style();
        Self {
            step,
            action,
            status: panel.status(),
            pos: panel.positioner().pos(),
            inner_css: style.inner_css(),
            outer_css: style.outer_css(),
        }
    }
}

/// Mount the scripted panel and apply every step in order.
///
/// # Arguments
/// * `script` - Document, options and steps to play.
///
/// # Returns
/// One line for the mount followed by one line per step.
pub fn replay(script: Script) -> Vec<ReplayLine> {
    let Script {
        environment,
        options,
        document,
        steps,
    } = script;

    let environment = environment.unwrap_or_else(Environment::from_env);
    let initial_scroll = document.scroll_top;
    let mut panel = StickyPanel::new(document, options, environment)
        .with_state_change(|status| info!("panel status changed to {status}"));
    panel.mount(initial_scroll);

    let mut lines = Vec::with_capacity(steps.len() + 1);
    lines.push(ReplayLine::capture(0, "mount", &panel));
    for (index, step) in steps.into_iter().enumerate() {
        let action = step.label();
        debug!("step {}: {action}", index + 1);
        apply(&mut panel, step);
        lines.push(ReplayLine::capture(index + 1, action, &panel));
    }
    lines
}

fn apply(panel: &mut StickyPanel<StaticDocument>, step: Step) {
    match step {
        Step::ScrollTo(scroll_top) => {
            let delta = scroll_top - panel.provider().scroll_top;
            panel.provider_mut().scroll_top = scroll_top;
            panel.handle(ScrollEvent::ScrollStart { scroll_top });
            panel.handle(ScrollEvent::Scroll { scroll_top, delta });
        }
        Step::Resize(viewport_height) => panel.handle(ScrollEvent::Resize { viewport_height }),
        Step::SetPanelHeight(height) => panel.provider_mut().set_panel_height(height),
        Step::SetEnabled(enabled) => panel.set_enabled(enabled),
        Step::SetTop(top) => panel.set_top(top),
        Step::SetBottomBoundary(bottom_boundary) => panel.set_bottom_boundary(bottom_boundary),
        Step::SetElement(selector, element) => {
            panel.provider_mut().elements.insert(selector, element);
        }
        Step::BoundaryResized => panel.on_boundary_resize(),
        Step::ContentChanged => panel.on_content_change(),
    }
}

/// Write each line as one JSON object per line.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_lines<W: Write>(lines: &[ReplayLine], mut writer: W) -> Result<(), Error> {
    for line in lines {
        serde_json::to_writer(&mut writer, line)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(json: &str) -> Script {
        Script::from_json(json).expect("valid script")
    }

    /// The tall panel walk produces the same positions as driving the panel directly.
    ///
    /// # Panics
    /// Panics if a recorded line does not match.
    #[test]
    fn tall_panel_walk() {
        let lines = replay(script(
            r#"{
                "environment": {},
                "document": {"panel": {"width": 100, "height": 1200}},
                "steps": [{"scroll_to": 10}, {"scroll_to": 1500}, {"scroll_to": 1300}]
            }"#,
        ));
        let summary: Vec<_> = lines
            .iter()
            .map(|line| (line.step, line.action, line.status, line.pos))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, "mount", StickyStatus::Original, 0.0),
                (1, "scroll_to", StickyStatus::Released, 0.0),
                (2, "scroll_to", StickyStatus::Fixed, -432.0),
                (3, "scroll_to", StickyStatus::Released, 1068.0),
            ]
        );
        assert_eq!(
            lines[2].inner_css,
            "position: fixed; top: 0px; transform: translate3d(0,-432px,0); width: 100px"
        );
        assert_eq!(lines[2].outer_css, "height: 1200px");
        assert_eq!(lines[0].outer_css, "");
    }

    /// Moving the boundary element only takes effect once the resize is reported.
    #[test]
    fn boundary_element_moves_on_resize() {
        let lines = replay(script(
            r##"{
                "environment": {},
                "options": {"bottom_boundary": "#footer"},
                "document": {
                    "panel": {"width": 100, "height": 300},
                    "elements": {"#footer": {"y": 900, "height": 100}}
                },
                "steps": [
                    {"scroll_to": 100},
                    {"set_element": ["#footer", {"y": 300, "height": 100}]},
                    "boundary_resized"
                ]
            }"##,
        ));
        assert_eq!(lines[1].status, StickyStatus::Fixed);
        assert_eq!(lines[2].status, StickyStatus::Fixed);
        assert_eq!(lines[3].status, StickyStatus::Released);
        assert!((lines[3].pos - 100.0).abs() < f64::EPSILON);
    }

    /// Disabling resets the panel and re-enabling re-measures it.
    #[test]
    fn enabled_toggle() {
        let lines = replay(script(
            r#"{
                "document": {"panel": {"width": 100, "height": 300}},
                "steps": [{"scroll_to": 10}, {"set_enabled": false}, {"scroll_to": 20}, {"set_enabled": true}]
            }"#,
        ));
        let statuses: Vec<_> = lines.iter().map(|line| line.status).collect();
        assert_eq!(
            statuses,
            vec![
                StickyStatus::Original,
                StickyStatus::Fixed,
                StickyStatus::Original,
                StickyStatus::Original,
                StickyStatus::Fixed,
            ]
        );
    }

    /// Output is newline-delimited JSON with snake-case statuses.
    ///
    /// The script leaves the environment to the process variables.
    #[test]
    fn writes_json_lines() {
        let lines = replay(script(
            r#"{"document": {"panel": {"width": 100, "height": 300}}, "steps": [{"scroll_to": 10}]}"#,
        ));
        let mut out = Vec::new();
        write_lines(&lines, &mut out).expect("write to memory");
        let text = String::from_utf8(out).expect("utf-8 output");
        let rows: Vec<serde_json::Value> = text
            .lines()
            .map(|row| serde_json::from_str(row).expect("json row"))
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["status"], "fixed");
        assert_eq!(rows[1]["action"], "scroll_to");
    }
}
