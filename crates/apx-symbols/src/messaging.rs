//! Diagnostics sink for non-fatal, user-facing notices.
//!
//! An explicit handle rather than a process-wide singleton: the analysis
//! run creates one sink and passes it to the resolution entry points that
//! need it (target matching only). Appends must be safe from concurrent
//! path-exploration workers.

use std::sync::{Mutex, MutexGuard};

/// The notices this core emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKey {
    WarningNoMethodTargetMatches,
    WarningMultipleMethodTargetMatches,
}

/// Append-only sink for analysis notices.
pub trait DiagnosticsSink {
    fn record(&self, context: &str, key: EventKey, args: &[&str]);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedEvent {
    pub context: String,
    pub key: EventKey,
    pub args: Vec<String>,
}

/// In-memory sink; the orchestration layer drains it after a run.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.lock().clone()
    }

    // A worker that panicked mid-append leaves nothing half-written, so a
    // poisoned lock is still readable.
    fn lock(&self) -> MutexGuard<'_, Vec<RecordedEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticsSink for CollectingSink {
    fn record(&self, context: &str, key: EventKey, args: &[&str]) {
        self.lock()
            .push(RecordedEvent {
                context: context.to_string(),
                key,
                args: args.iter().map(|a| a.to_string()).collect(),
            });
    }
}
