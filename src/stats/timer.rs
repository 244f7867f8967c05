//! Level timer
//!
//! A pausable wall-clock measurement the host samples on a ~100 ms cadence
//! (see [`crate::consts::TIMER_SAMPLE_MS`]). Restart always cancels the
//! previous measurement first; since the timer is a single anchor + running
//! flag, two concurrent measurements for one level are unrepresentable.

/// Running/paused elapsed-time measurement anchored to a wall-clock instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelTimer {
    start_ms: Option<f64>,
    elapsed_ms: f64,
    running: bool,
}

impl LevelTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds measured so far (as of the last sample or pin).
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cancel any previous measurement and start fresh from `now`.
    pub fn restart(&mut self, now_ms: f64) {
        self.start_ms = Some(now_ms);
        self.elapsed_ms = 0.0;
        self.running = true;
    }

    /// Restore a measurement that already has `elapsed_ms` on the clock:
    /// the anchor is back-dated so sampling continues seamlessly.
    pub fn resume_with_elapsed(&mut self, now_ms: f64, elapsed_ms: f64) {
        self.start_ms = Some(now_ms - elapsed_ms);
        self.elapsed_ms = elapsed_ms;
        self.running = true;
    }

    /// Stop sampling, keeping the elapsed value.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Continue after [`pause`](Self::pause), re-anchoring so the paused
    /// span does not count.
    pub fn resume(&mut self, now_ms: f64) {
        if self.start_ms.is_some() && !self.running {
            self.start_ms = Some(now_ms - self.elapsed_ms);
            self.running = true;
        }
    }

    /// Periodic sampling tick; a no-op unless running.
    pub fn sample(&mut self, now_ms: f64) {
        if self.running {
            if let Some(start) = self.start_ms {
                self.elapsed_ms = now_ms - start;
            }
        }
    }

    /// Elapsed time measured directly from the anchor, bypassing the last
    /// sample. Used at completion so the result does not depend on whether
    /// the periodic tick has fired recently.
    pub fn measure(&self, now_ms: f64) -> f64 {
        match self.start_ms {
            Some(start) => now_ms - start,
            None => self.elapsed_ms,
        }
    }

    /// Pin the elapsed value and stop. Completion uses this to freeze the
    /// exact measured level time.
    pub fn stop_at(&mut self, elapsed_ms: f64) {
        self.elapsed_ms = elapsed_ms;
        self.running = false;
    }

    /// Full reset to the never-started state.
    pub fn clear(&mut self) {
        self.start_ms = None;
        self.elapsed_ms = 0.0;
        self.running = false;
    }
}
