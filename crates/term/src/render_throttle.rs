//! Frame pacing for the host loop.
//!
//! The duel only changes on a step or an accepted command, so most loop
//! iterations would redraw an identical frame. The throttle compares a
//! fingerprint of the snapshot and only lets unchanged frames through once
//! per refresh period.

use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_refresh_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    dirty: bool,
}

impl RenderThrottle {
    pub fn new(idle_refresh_ms: u64) -> Self {
        Self {
            idle_refresh_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            dirty: true,
        }
    }

    /// Force the next call to render (first frame, terminal resize).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Decide whether to render a frame with this fingerprint.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let due = self.dirty
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.idle_refresh_ms;
        if due {
            self.dirty = false;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }
}

/// Stable-within-process fingerprint of any hashable frame source.
pub fn fingerprint<T: Hash>(value: &T) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
