//! Invocation report: everything one scheduler run decided.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::decision::{Decision, DispatchStatus, Outcome};
use crate::id::InvocationId;
use crate::time::Timestamp;

/// The ordered decision list of one invocation plus its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationReport {
    pub id: InvocationId,
    /// Instant the rules were evaluated at, in UTC.
    pub evaluated_at: Timestamp,
    /// Same instant in the operating timezone.
    pub local_time: DateTime<FixedOffset>,
    /// When the resource snapshot was taken.
    pub snapshot_taken_at: Timestamp,
    pub dry_run: bool,
    pub decisions: Vec<Decision>,
}

impl InvocationReport {
    /// Number of fire decisions.
    #[must_use]
    pub fn fired(&self) -> usize {
        self.count(Outcome::Fire)
    }

    /// Number of skip decisions.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skip)
    }

    /// Number of fire decisions whose dispatch failed or timed out.
    #[must_use]
    pub fn dispatch_failures(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| {
                matches!(
                    d.dispatch,
                    DispatchStatus::Failed { .. } | DispatchStatus::TimedOut
                )
            })
            .count()
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.outcome == outcome)
            .count()
    }
}
