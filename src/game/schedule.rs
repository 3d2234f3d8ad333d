//! Cancel-and-replace spawn timer bookkeeping.
//!
//! The core never owns a real timer. Each reschedule hands out a fresh
//! [`SpawnTicket`]; only the most recent one may fire. The browser layer keeps
//! one `setTimeout` handle per ticket and clears the old one on replacement.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpawnTicket {
    pub generation: u64,
    pub delay_ms: u32,
}

#[derive(Debug, Default)]
pub struct SpawnSchedule {
    generation: u64,
    pending: Option<SpawnTicket>,
}

impl SpawnSchedule {
    /// Invalidate any pending ticket and issue a new one.
    pub fn reschedule(&mut self, delay_ms: u32) -> SpawnTicket {
        self.generation += 1;
        let ticket = SpawnTicket {
            generation: self.generation,
            delay_ms,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Returns true if a ticket was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consume the pending ticket if `generation` matches it. Stale or
    /// cancelled generations return false.
    pub fn fire(&mut self, generation: u64) -> bool {
        match self.pending {
            Some(t) if t.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> Option<SpawnTicket> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reschedule_replaces_previous_ticket() {
        let mut s = SpawnSchedule::default();
        let first = s.reschedule(1000);
        let second = s.reschedule(995);
        assert_ne!(first.generation, second.generation);
        assert_eq!(s.pending(), Some(second));
        assert!(!s.fire(first.generation));
        assert!(s.fire(second.generation));
        assert!(s.pending().is_none());
        // a ticket fires at most once
        assert!(!s.fire(second.generation));
    }

    #[test]
    fn cancel_drops_pending() {
        let mut s = SpawnSchedule::default();
        let t = s.reschedule(500);
        assert!(s.cancel());
        assert!(!s.cancel());
        assert!(!s.fire(t.generation));
    }
}
