use crate::core::MachineSnapshot;

/// Skips redundant redraws while the machine is at rest.
///
/// A machine that is rolling, or counting down to an autoplay spin, is
/// "live" and drawn every frame. At rest it is redrawn when its fingerprint
/// changes, plus a periodic refresh so a garbled terminal recovers.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_refresh_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(idle_refresh_ms: u64) -> Self {
        Self {
            idle_refresh_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    /// Decide whether to draw a frame for `snap` at `now_ms`.
    pub fn should_render(&mut self, now_ms: u64, snap: &MachineSnapshot) -> bool {
        let live = snap.spinning || snap.autoplay.next_spin_in_ms.is_some();
        self.should_render_raw(now_ms, snap.fingerprint(), live)
    }

    /// Same as [`should_render`](Self::should_render) with the inputs spelled out.
    pub fn should_render_raw(&mut self, now_ms: u64, fingerprint: u64, live: bool) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.idle_refresh_ms;

        if live || changed || stale {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    /// Forget the last frame so the next call renders.
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }
}
