//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services, so
//! that no request-handling code reads process-wide environment variables. The
//! caps below bound how much of each clinical collection the store is asked for;
//! the store applies them together with its own ordering contract
//! (most-recent-first).

/// Per-collection caps for the history aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryLimits {
    pub encounters: usize,
    pub observations: usize,
    pub conditions: usize,
    pub allergies: usize,
    pub procedures: usize,
    pub medications: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            encounters: 10,
            observations: 50,
            conditions: 20,
            allergies: 20,
            procedures: 20,
            medications: 20,
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    limits: HistoryLimits,
}

impl CoreConfig {
    pub fn new(limits: HistoryLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> HistoryLimits {
        self.limits
    }
}
