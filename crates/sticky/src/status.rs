//! Positioning status register.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Where a sticky panel is currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickyStatus {
    /// Rendered at its natural position in document flow.
    #[default]
    Original,
    /// Rendered at a computed document offset and scrolls with the page.
    Released,
    /// Pinned to a viewport-relative offset.
    Fixed,
}

impl StickyStatus {
    /// Stable numeric code handed to host callbacks (0, 1, 2).
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::Original => 0,
            Self::Released => 1,
            Self::Fixed => 2,
        }
    }
}

impl fmt::Display for StickyStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Original => "original",
            Self::Released => "released",
            Self::Fixed => "fixed",
        };
        formatter.write_str(name)
    }
}

/// A status transition observed across one `update()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the call.
    pub from: StickyStatus,
    /// Status after the call.
    pub to: StickyStatus,
}
