//! Repairs daily counters that drifted from the check-in log.
//!
//! A check-in whose counter increment failed leaves the day's aggregate one
//! short. Recounting distinct fans from the record store and overwriting the
//! counter brings the two stores back in line.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::ports::{
    AggregateReconciliationCommand, CheckinRepository, CheckinRepositoryError,
    DailyAggregateRepository, DailyAggregateRepositoryError, ReconciliationOutcome,
};
use crate::domain::{CreatorId, Error};

/// Reconciliation service over the two check-in stores.
#[derive(Clone)]
pub struct AggregateReconciliationService<C, A> {
    checkins: Arc<C>,
    aggregates: Arc<A>,
}

impl<C, A> AggregateReconciliationService<C, A> {
    /// Create a new service with the given stores.
    pub fn new(checkins: Arc<C>, aggregates: Arc<A>) -> Self {
        Self {
            checkins,
            aggregates,
        }
    }
}

fn map_checkin_error(error: CheckinRepositoryError) -> Error {
    match error {
        CheckinRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("checkin repository unavailable: {message}"))
        }
        CheckinRepositoryError::Query { message }
        | CheckinRepositoryError::DuplicateCheckin { message } => {
            Error::internal(format!("checkin repository error: {message}"))
        }
    }
}

fn map_aggregate_error(error: DailyAggregateRepositoryError) -> Error {
    match error {
        DailyAggregateRepositoryError::Connection { message } => Error::service_unavailable(
            format!("daily aggregate repository unavailable: {message}"),
        ),
        DailyAggregateRepositoryError::Query { message } => {
            Error::internal(format!("daily aggregate repository error: {message}"))
        }
    }
}

#[async_trait]
impl<C, A> AggregateReconciliationCommand for AggregateReconciliationService<C, A>
where
    C: CheckinRepository,
    A: DailyAggregateRepository,
{
    async fn reconcile_day(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<ReconciliationOutcome, Error> {
        let previous_count = self
            .aggregates
            .find(creator_id, date)
            .await
            .map_err(map_aggregate_error)?
            .map(|aggregate| aggregate.count);
        let count = self
            .checkins
            .count_for_creator_day(creator_id, date)
            .await
            .map_err(map_checkin_error)?;

        let outcome = ReconciliationOutcome {
            creator_id: *creator_id,
            date,
            previous_count,
            count,
        };
        if !outcome.corrected() {
            info!(%creator_id, %date, count, "daily aggregate already consistent");
            return Ok(outcome);
        }

        self.aggregates
            .overwrite(creator_id, date, count)
            .await
            .map_err(map_aggregate_error)?;
        warn!(
            %creator_id,
            %date,
            previous = ?previous_count,
            count,
            "daily aggregate corrected from check-in log"
        );
        Ok(outcome)
    }
}
