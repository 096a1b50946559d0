/// Lets through at most one event per fixed window; the rest are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    window_ms: f64,
    open_at: f64,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self { window_ms, open_at: f64::NEG_INFINITY }
    }

    /// Whether an event arriving at `now_ms` should be applied. Admitting an
    /// event closes the window for the next `window_ms`.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if now_ms < self.open_at {
            return false;
        }
        self.open_at = now_ms + self.window_ms;
        true
    }
}
