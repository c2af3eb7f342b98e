//! Port for the append-only check-in record store.
//!
//! Adapters must enforce at most one record per user, creator, and calendar
//! day at the storage level. A rejected concurrent insert surfaces as
//! [`CheckinRepositoryError::DuplicateCheckin`] so the service can report it
//! as an ordinary "already checked in" conflict.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{CheckinId, CheckinRecord, CreatorId, NewCheckin, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by check-in record store adapters.
    pub enum CheckinRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "checkin repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "checkin repository query failed: {message}",
        /// The per-day uniqueness guarantee rejected the insert.
        DuplicateCheckin { message: String } =>
            "duplicate check-in rejected: {message}",
    }
}

/// Durable log of check-in events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Whether the user has a record for `creator_id` timestamped within `day`.
    async fn has_checked_in(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
        day: NaiveDate,
    ) -> Result<bool, CheckinRepositoryError>;

    /// Append a record and return it with its assigned identifier.
    async fn create(&self, checkin: &NewCheckin) -> Result<CheckinRecord, CheckinRepositoryError>;

    /// Up to `limit` records for the creator, newest first.
    async fn recent_by_creator(
        &self,
        creator_id: &CreatorId,
        limit: u32,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError>;

    /// Every record for the pair, newest first.
    async fn all_by_user_creator(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError>;

    /// Distinct creators the user has ever checked in to.
    async fn creators_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CreatorId>, CheckinRepositoryError>;

    /// Number of distinct fans with a record for the creator on `day`.
    async fn count_for_creator_day(
        &self,
        creator_id: &CreatorId,
        day: NaiveDate,
    ) -> Result<u32, CheckinRepositoryError>;
}

/// Stateless fixture used when no database is configured.
///
/// Reads report an empty history and writes echo the new record back without
/// storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckinRepository;

#[async_trait]
impl CheckinRepository for FixtureCheckinRepository {
    async fn has_checked_in(
        &self,
        _user_id: &UserId,
        _creator_id: &CreatorId,
        _day: NaiveDate,
    ) -> Result<bool, CheckinRepositoryError> {
        Ok(false)
    }

    async fn create(&self, checkin: &NewCheckin) -> Result<CheckinRecord, CheckinRepositoryError> {
        Ok(CheckinRecord {
            id: CheckinId::random(),
            user_id: checkin.user_id,
            creator_id: checkin.creator_id,
            checked_in_at: checkin.checked_in_at,
        })
    }

    async fn recent_by_creator(
        &self,
        _creator_id: &CreatorId,
        _limit: u32,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError> {
        Ok(Vec::new())
    }

    async fn all_by_user_creator(
        &self,
        _user_id: &UserId,
        _creator_id: &CreatorId,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError> {
        Ok(Vec::new())
    }

    async fn creators_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<CreatorId>, CheckinRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_for_creator_day(
        &self,
        _creator_id: &CreatorId,
        _day: NaiveDate,
    ) -> Result<u32, CheckinRepositoryError> {
        Ok(0)
    }
}
