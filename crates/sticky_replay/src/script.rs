//! Replay script format.

use anyhow::{Context as _, Error, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use sticky::{BottomBoundary, DocumentBox, Environment, StaticDocument, StickyOptions, TopOffset};

/// A page, a panel configuration and the interactions to play against them.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Host environment; read from `STICKY_*` variables when omitted.
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub options: StickyOptions,
    pub document: StaticDocument,
    pub steps: Vec<Step>,
}

/// One interaction with the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Scroll the document to an absolute offset.
    ScrollTo(f64),
    /// Resize the viewport to a new height.
    Resize(f64),
    /// Change the panel's content height.
    SetPanelHeight(f64),
    SetEnabled(bool),
    SetTop(TopOffset),
    SetBottomBoundary(BottomBoundary),
    /// Move or resize a named element in the document.
    SetElement(String, DocumentBox),
    /// The boundary element changed size without a scroll.
    BoundaryResized,
    /// The panel content changed without a scroll.
    ContentChanged,
}

impl Step {
    /// Short label used in log lines and output.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ScrollTo(_) => "scroll_to",
            Self::Resize(_) => "resize",
            Self::SetPanelHeight(_) => "set_panel_height",
            Self::SetEnabled(_) => "set_enabled",
            Self::SetTop(_) => "set_top",
            Self::SetBottomBoundary(_) => "set_bottom_boundary",
            Self::SetElement(..) => "set_element",
            Self::BoundaryResized => "boundary_resized",
            Self::ContentChanged => "content_changed",
        }
    }
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a step carries an impossible value.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let script: Self = serde_json::from_str(text).context("parsing replay script")?;
        script.validate()?;
        Ok(script)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid script.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading replay script {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> Result<(), Error> {
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::ScrollTo(offset) if *offset < 0.0 => {
                    bail!("step {index}: scroll offset {offset} is negative")
                }
                Step::Resize(height) | Step::SetPanelHeight(height) if *height < 0.0 => {
                    bail!("step {index}: {} height {height} is negative", step.label())
                }
                _ => {}
            }
        }
        Ok(())
    }
}
