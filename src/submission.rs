//! Submission gate
//!
//! Allows at most one in-flight submission per form. A second attempt while one is
//! in flight is refused outright; nothing queues.

use std::sync::atomic::{AtomicBool, Ordering};

/// Guards a form against concurrent submissions.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    in_flight: AtomicBool,
}

impl SubmissionGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission, or `None` if one is already in flight.
    ///
    /// The gate re-opens when the returned guard is dropped.
    #[must_use]
    pub fn try_begin(&self) -> Option<SubmissionGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_previous| SubmissionGuard { gate: self })
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of a submission.
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    gate: &'a SubmissionGate,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}
