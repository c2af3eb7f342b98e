//! Driving port for repairing daily counters from the record log.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CreatorId, Error};

/// Result of recounting one creator's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOutcome {
    pub creator_id: CreatorId,
    pub date: NaiveDate,
    /// Counter value before the repair, if a counter existed.
    pub previous_count: Option<u32>,
    /// Counter value after the repair.
    pub count: u32,
}

impl ReconciliationOutcome {
    /// Whether the stored counter disagreed with the record log.
    #[must_use]
    pub fn corrected(&self) -> bool {
        self.previous_count != Some(self.count)
    }
}

/// Inbound contract for aggregate reconciliation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregateReconciliationCommand: Send + Sync {
    /// Recount distinct fans for the creator's day and store the result.
    async fn reconcile_day(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<ReconciliationOutcome, Error>;
}
