//! Resize debounce
//!
//! A cancellable delayed task driven by the host's millisecond clock. Each
//! new signal cancels the pending task and reschedules it, so a burst of
//! resize events collapses into one repopulation timed from the last event.

use serde::{Deserialize, Serialize};

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    due_ms: f64,
    viewport: Viewport,
}

#[derive(Debug, Clone)]
pub struct ResizeDebounce {
    delay_ms: f64,
    pending: Option<Pending>,
}

impl ResizeDebounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Record a resize at `now_ms`. Returns true if a pending task was cancelled.
    pub fn signal(&mut self, now_ms: f64, viewport: Viewport) -> bool {
        let cancelled = self.pending.is_some();
        let due_ms = now_ms + self.delay_ms;
        log::debug!(
            "Resize to {}x{} scheduled for t={:.1}ms{}",
            viewport.width,
            viewport.height,
            due_ms,
            if cancelled { " (rescheduled)" } else { "" }
        );
        self.pending = Some(Pending { due_ms, viewport });
        cancelled
    }

    /// Fire the pending task if its deadline has passed; fires at most once
    pub fn poll(&mut self, now_ms: f64) -> Option<Viewport> {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                Some(p.viewport)
            }
            _ => None,
        }
    }

    /// Drop the pending task, if any
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending task
    pub fn due_ms(&self) -> Option<f64> {
        self.pending.map(|p| p.due_ms)
    }
}
