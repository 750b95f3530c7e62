//! In-flight submission tracking.
//!
//! Two guarantees for the detection screen: a submission cannot be triggered
//! twice while one is pending, and a late response from a superseded request
//! never clobbers a newer result.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Identity of one submission, compared at apply time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Busy gate plus monotonically increasing request identity.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    busy: AtomicBool,
    latest: AtomicU64,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a submission. Returns `None` while a prior one is pending.
    pub fn try_begin(&self) -> Option<RequestToken> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        let token = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        Some(RequestToken(token))
    }

    /// Mark the submission finished, releasing the busy gate.
    pub fn finish(&self, _token: RequestToken) {
        self.busy.store(false, Ordering::Release);
    }

    /// Whether a response for this token may still be applied.
    ///
    /// A token issued before the latest one identifies a superseded request;
    /// its response must be ignored rather than applied.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Holds the displayed value for a screen, applying responses
/// last-issued-wins.
#[derive(Debug, Default)]
pub struct DisplaySlot<T> {
    value: Option<T>,
}

impl<T> DisplaySlot<T> {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Apply a response if its request is still current. Returns whether the
    /// displayed value changed.
    pub fn apply(&mut self, tracker: &SubmissionTracker, token: RequestToken, value: T) -> bool {
        if !tracker.is_current(token) {
            tracing::debug!("Dropping stale response for superseded request");
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
