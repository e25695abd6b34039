use serde::Serialize;

use crate::scheduler::Performed;

/// Running counters over a scheduler's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    pub iterations: u64,
    pub asks: u64,
    pub answers: u64,
    pub votes: u64,
    /// Iterations that drew the idle action.
    pub idles: u64,
    /// Iterations whose action had nothing to act on.
    pub skipped: u64,
    /// Iterations whose remote call or composition failed.
    pub failed: u64,
}

impl ActivityStats {
    pub fn record(&mut self, performed: &Performed) {
        self.iterations += 1;
        match performed {
            Performed::Asked { .. } => self.asks += 1,
            Performed::Answered { .. } => self.answers += 1,
            Performed::Voted { .. } => self.votes += 1,
            Performed::Idle => self.idles += 1,
            Performed::Skipped(_) => self.skipped += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.iterations += 1;
        self.failed += 1;
    }

    /// Iterations that reached the remote service successfully.
    pub fn actions(&self) -> u64 {
        self.asks + self.answers + self.votes
    }
}
