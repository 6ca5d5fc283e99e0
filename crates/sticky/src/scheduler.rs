//! Per-frame coalescing of scroll and resize notifications.
//!
//! Hosts that receive many notifications per frame push them into a
//! [`FrameCoalescer`] and hand each drained batch to the panel.

use crate::event::ScrollEvent;
use core::time::Duration;
use std::time::Instant;

/// Frame budget matching a 60 Hz display.
pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Coalesces scroll and resize notifications so panels update at most once per frame.
///
/// Notifications pushed within the budget window are buffered. When a new
/// window opens, the buffer drains as one batch: a `ScrollStart` at the final
/// scroll position, then a single `Scroll` whose delta is the sum of the
/// buffered deltas, then the latest resize. A resize always measures at the
/// scroll position the batch has already delivered.
pub struct FrameCoalescer {
    /// The minimum time interval between drained batches.
    budget: Duration,
    /// Timestamp of the most recent frame start that was allowed.
    last_frame_start: Option<Instant>,
    /// Number of drain attempts refused because the frame budget had not elapsed.
    deferred_count: u64,
    /// Latest viewport height reported since the last drain.
    pending_resize: Option<f64>,
    /// Final scroll position and accumulated delta since the last drain.
    pending_scroll: Option<(f64, f64)>,
    /// A scroll start was reported without a following scroll.
    pending_start: Option<f64>,
}

impl FrameCoalescer {
    /// Creates a new coalescer with the specified time budget.
    ///
    /// # Arguments
    ///
    /// * `budget` - The minimum duration between drained batches.
    #[inline]
    #[must_use]
    pub const fn new(budget: Duration) -> Self {
        Self {
            budget,
            last_frame_start: None,
            deferred_count: 0,
            pending_resize: None,
            pending_scroll: None,
            pending_start: None,
        }
    }

    /// Returns the configured frame budget duration.
    #[inline]
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Returns the number of refused drains since creation.
    #[inline]
    #[must_use]
    pub const fn deferred(&self) -> u64 {
        self.deferred_count
    }

    /// Whether anything is waiting for the next frame.
    #[inline]
    pub const fn has_pending(&self) -> bool {
        self.pending_resize.is_some() || self.pending_scroll.is_some() || self.pending_start.is_some()
    }

    /// Buffer a notification until the next frame.
    pub fn push(&mut self, event: ScrollEvent) {
        match event {
            ScrollEvent::Resize { viewport_height } => self.pending_resize = Some(viewport_height),
            ScrollEvent::ScrollStart { scroll_top } => {
                if self.pending_scroll.is_none() {
                    self.pending_start = Some(scroll_top);
                }
            }
            ScrollEvent::Scroll { scroll_top, delta } => {
                let accumulated = self.pending_scroll.map_or(0.0, |(_, sum)| sum);
                self.pending_scroll = Some((scroll_top, accumulated + delta));
                self.pending_start = None;
            }
        }
    }

    /// Drain the buffer if a new frame has started.
    pub fn drain(&mut self) -> Vec<ScrollEvent> {
        self.drain_at(Instant::now())
    }

    /// Drain the buffer if a new frame has started at `now`.
    ///
    /// Returns an empty batch, and counts a deferral, while the current frame
    /// budget has not expired.
    pub fn drain_at(&mut self, now: Instant) -> Vec<ScrollEvent> {
        if !self.has_pending() {
            return Vec::new();
        }
        if !self.allow_at(now) {
            self.deferred_count = self.deferred_count.saturating_add(1);
            return Vec::new();
        }

        let mut batch = Vec::with_capacity(3);
        if let Some((scroll_top, delta)) = self.pending_scroll.take() {
            batch.push(ScrollEvent::ScrollStart { scroll_top });
            batch.push(ScrollEvent::Scroll { scroll_top, delta });
        } else if let Some(scroll_top) = self.pending_start.take() {
            batch.push(ScrollEvent::ScrollStart { scroll_top });
        }
        if let Some(viewport_height) = self.pending_resize.take() {
            batch.push(ScrollEvent::Resize { viewport_height });
        }
        batch
    }

    fn allow_at(&mut self, now: Instant) -> bool {
        match self.last_frame_start {
            Some(start) if now.duration_since(start) < self.budget => false,
            _ => {
                self.last_frame_start = Some(now);
                true
            }
        }
    }
}

impl Default for FrameCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Several scrolls inside one frame collapse into a start plus one summed scroll.
    #[test]
    fn scrolls_collapse_into_one_batch() {
        let mut coalescer = FrameCoalescer::default();
        let start = Instant::now();
        coalescer.push(ScrollEvent::ScrollStart { scroll_top: 0.0 });
        coalescer.push(ScrollEvent::Scroll { scroll_top: 10.0, delta: 10.0 });
        coalescer.push(ScrollEvent::Scroll { scroll_top: 25.0, delta: 15.0 });
        coalescer.push(ScrollEvent::Resize { viewport_height: 900.0 });

        let batch = coalescer.drain_at(start);
        assert_eq!(
            batch,
            vec![
                ScrollEvent::ScrollStart { scroll_top: 25.0 },
                ScrollEvent::Scroll { scroll_top: 25.0, delta: 25.0 },
                ScrollEvent::Resize { viewport_height: 900.0 },
            ]
        );
        assert!(!coalescer.has_pending());
    }

    /// Drains inside the budget window are deferred and counted.
    #[test]
    fn drains_respect_frame_budget() {
        let mut coalescer = FrameCoalescer::new(Duration::from_millis(16));
        let start = Instant::now();
        coalescer.push(ScrollEvent::Scroll { scroll_top: 5.0, delta: 5.0 });
        assert_eq!(coalescer.drain_at(start).len(), 2);

        coalescer.push(ScrollEvent::Scroll { scroll_top: 9.0, delta: 4.0 });
        assert!(coalescer.drain_at(start + Duration::from_millis(4)).is_empty());
        assert_eq!(coalescer.deferred(), 1);

        let batch = coalescer.drain_at(start + Duration::from_millis(20));
        assert_eq!(batch.last(), Some(&ScrollEvent::Scroll { scroll_top: 9.0, delta: 4.0 }));
    }

    /// A lone scroll start still precedes the resize reported in the same frame.
    #[test]
    fn lone_start_precedes_resize() {
        let mut coalescer = FrameCoalescer::default();
        coalescer.push(ScrollEvent::Resize { viewport_height: 700.0 });
        coalescer.push(ScrollEvent::ScrollStart { scroll_top: 40.0 });
        assert_eq!(
            coalescer.drain_at(Instant::now()),
            vec![
                ScrollEvent::ScrollStart { scroll_top: 40.0 },
                ScrollEvent::Resize { viewport_height: 700.0 },
            ]
        );
    }

    /// An empty buffer never consumes a frame.
    #[test]
    fn empty_buffer_drains_nothing() {
        let mut coalescer = FrameCoalescer::default();
        assert!(coalescer.drain().is_empty());
        assert_eq!(coalescer.deferred(), 0);
    }
}
