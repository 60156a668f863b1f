//! Trailing-edge debounce bookkeeping.
//!
//! The timer itself lives in the frontend; this type only decides whether
//! a fired timer is still the latest one.

#[derive(Debug, Default, Clone)]
pub struct Debouncer {
    latest: u64,
    pending: bool,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new keystroke; earlier tickets become obsolete.
    pub fn schedule(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.pending = true;
        self.latest
    }

    /// A timer for `ticket` elapsed. Returns `true` if it should commit.
    pub fn fire(&mut self, ticket: u64) -> bool {
        if self.pending && ticket == self.latest {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Drop the pending commit, e.g. when the component unmounts or the
    /// URL changed underneath the input.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_fires() {
        let mut d = Debouncer::new();
        let first = d.schedule();
        let second = d.schedule();
        assert!(!d.fire(first));
        assert!(d.fire(second));
        assert!(!d.fire(second));
    }

    #[test]
    fn test_cancel_suppresses_commit() {
        let mut d = Debouncer::new();
        let t = d.schedule();
        d.cancel();
        assert!(!d.is_pending());
        assert!(!d.fire(t));
    }
}
