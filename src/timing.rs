//! Rate-limited callbacks.
//!
//! Scroll and resize fire far more often than the engine needs to react, and
//! settle detection needs to know when they *stop* firing. Both are the same
//! abstraction with a different edge:
//!
//! - [`Edge::Leading`] (throttle): the first call fires immediately, further
//!   calls are dropped until the window has elapsed.
//! - [`Edge::Trailing`] (debounce): every call re-arms a deadline; the limiter
//!   fires once, when [`RateLimiter::poll`] observes that the deadline passed
//!   with no further calls.
//!
//! Time is supplied by the caller as a `Duration` since an arbitrary origin,
//! so the limiter is deterministic and needs no runtime.

use std::time::Duration;

/// Which edge of a burst of calls fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Leading,
    Trailing,
}

/// A throttle or debounce gate.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    edge: Edge,
    window: Duration,
    /// Leading: end of the window in which calls are dropped.
    /// Trailing: time at which the pending call fires.
    deadline: Option<Duration>,
    fired: u64,
}

impl RateLimiter {
    pub fn new(edge: Edge, window: Duration) -> Self {
        Self {
            edge,
            window,
            deadline: None,
            fired: 0,
        }
    }

    /// Leading-edge limiter.
    pub fn throttle(window: Duration) -> Self {
        Self::new(Edge::Leading, window)
    }

    /// Trailing-edge limiter.
    pub fn debounce(window: Duration) -> Self {
        Self::new(Edge::Trailing, window)
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Register a call at `now`.
    ///
    /// Returns `true` when the wrapped action should run right away, which
    /// only ever happens on the leading edge.
    pub fn call(&mut self, now: Duration) -> bool {
        match self.edge {
            Edge::Leading => {
                if let Some(until) = self.deadline
                    && now < until
                {
                    return false;
                }
                self.deadline = Some(now + self.window);
                self.fired += 1;
                true
            }
            Edge::Trailing => {
                self.deadline = Some(now + self.window);
                false
            }
        }
    }

    /// Advance time to `now`.
    ///
    /// Returns `true` exactly once per armed trailing deadline that has
    /// elapsed. Leading limiters only expire their window here.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.deadline = None;
        match self.edge {
            Edge::Leading => false,
            Edge::Trailing => {
                self.fired += 1;
                true
            }
        }
    }

    /// When a trailing limiter will fire, if armed.
    pub fn pending_deadline(&self) -> Option<Duration> {
        match self.edge {
            Edge::Leading => None,
            Edge::Trailing => self.deadline,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_deadline().is_some()
    }

    /// Drop any pending firing and reopen a leading window.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// How many times the limiter has let the action through.
    pub fn fire_count(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_throttle_fires_leading_edge_once_per_window() {
        let mut throttle = RateLimiter::throttle(ms(50));
        assert!(throttle.call(ms(0)));
        assert!(!throttle.call(ms(10)));
        assert!(!throttle.call(ms(49)));
        assert!(throttle.call(ms(50)));
        assert!(!throttle.call(ms(60)));
        assert!(throttle.call(ms(200)));
        assert_eq!(throttle.fire_count(), 3);
        assert_eq!(throttle.pending_deadline(), None);
    }

    #[test]
    fn test_throttle_cancel_reopens_window() {
        let mut throttle = RateLimiter::throttle(ms(50));
        assert!(throttle.call(ms(0)));
        throttle.cancel();
        assert!(throttle.call(ms(1)));
    }

    #[test]
    fn test_debounce_fires_after_quiet_window() {
        let mut debounce = RateLimiter::debounce(ms(50));
        assert!(!debounce.call(ms(0)));
        assert!(!debounce.call(ms(30)));
        assert_eq!(debounce.pending_deadline(), Some(ms(80)));

        assert!(!debounce.poll(ms(79)));
        assert!(debounce.poll(ms(80)));
        // Fires once per burst
        assert!(!debounce.poll(ms(500)));
        assert!(!debounce.is_pending());
        assert_eq!(debounce.fire_count(), 1);
    }

    #[test]
    fn test_debounce_cancel() {
        let mut debounce = RateLimiter::debounce(ms(50));
        debounce.call(ms(0));
        debounce.cancel();
        assert!(!debounce.poll(ms(100)));
        assert_eq!(debounce.fire_count(), 0);
    }
}
