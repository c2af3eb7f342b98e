//! Port for per-creator daily check-in counters.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{CreatorId, DailyAggregate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by daily aggregate store adapters.
    pub enum DailyAggregateRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "daily aggregate repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "daily aggregate repository query failed: {message}",
    }
}

/// Counter store keyed by creator and calendar day.
///
/// Both mutations are single upserts so concurrent callers for the same key
/// never lose an update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyAggregateRepository: Send + Sync {
    /// Add one to the counter, creating it at 1 when absent.
    async fn increment(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError>;

    /// Every counter for the creator, newest date first.
    async fn list_by_creator(
        &self,
        creator_id: &CreatorId,
    ) -> Result<Vec<DailyAggregate>, DailyAggregateRepositoryError>;

    /// The counter for one day, if it exists.
    async fn find(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<Option<DailyAggregate>, DailyAggregateRepositoryError>;

    /// Replace the counter with a recomputed value, creating it when absent.
    async fn overwrite(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
        count: u32,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError>;
}

/// Stateless fixture used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDailyAggregateRepository;

#[async_trait]
impl DailyAggregateRepository for FixtureDailyAggregateRepository {
    async fn increment(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError> {
        Ok(DailyAggregate {
            id: Uuid::new_v4(),
            creator_id: *creator_id,
            date,
            count: 1,
        })
    }

    async fn list_by_creator(
        &self,
        _creator_id: &CreatorId,
    ) -> Result<Vec<DailyAggregate>, DailyAggregateRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(
        &self,
        _creator_id: &CreatorId,
        _date: NaiveDate,
    ) -> Result<Option<DailyAggregate>, DailyAggregateRepositoryError> {
        Ok(None)
    }

    async fn overwrite(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
        count: u32,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError> {
        Ok(DailyAggregate {
            id: Uuid::new_v4(),
            creator_id: *creator_id,
            date,
            count,
        })
    }
}
