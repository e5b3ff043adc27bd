//! Soft-fail reporting for merge checks.

use tracing::*;

use crate::errors::MergeInvariantViolation;

/// Collects the outcome of assertions without interrupting control flow.
///
/// Implementations keep the first violation they're told about.  Later ones
/// still mark the sink as failed but must not replace it.
pub trait FailureSink {
    /// Records `violation` if `cond` doesn't hold.
    fn do_assert(&mut self, cond: bool, violation: MergeInvariantViolation);

    /// Whether any assertion has failed so far.
    fn failed(&self) -> bool;

    /// The first violation that was reported, if any.
    fn first_failure(&self) -> Option<&MergeInvariantViolation>;
}

/// Per-invocation sink that only remembers the first failure.
#[derive(Clone, Debug)]
pub struct SoftFailSink {
    name: String,
    failed: bool,
    first_failure: Option<MergeInvariantViolation>,
}

impl SoftFailSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failed: false,
            first_failure: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_first_failure(self) -> Option<MergeInvariantViolation> {
        self.first_failure
    }
}

impl FailureSink for SoftFailSink {
    fn do_assert(&mut self, cond: bool, violation: MergeInvariantViolation) {
        if cond {
            return;
        }

        self.failed = true;
        match self.first_failure {
            None => {
                warn!(sink = %self.name, %violation, "merge check failed");
                self.first_failure = Some(violation);
            }
            Some(first) => {
                debug!(sink = %self.name, %violation, %first, "additional merge check failed");
            }
        }
    }

    fn failed(&self) -> bool {
        self.failed
    }

    fn first_failure(&self) -> Option<&MergeInvariantViolation> {
        self.first_failure.as_ref()
    }
}
