//! Check-in orchestration and read models.
//!
//! [`CheckinService`] implements both driving ports. Writes follow a fixed
//! sequence: existence checks, today's duplicate check, record insert,
//! counter increment, streak recomputation. The three storage calls are not
//! a transaction. Uniqueness races are settled by the record store and a
//! failed counter increment is reported rather than rolled back.

use std::collections::HashMap;
use std::iter;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CheckInRequest, CheckInResponse, CheckinCommand, CheckinQuery, CheckinRepository,
    CheckinRepositoryError, DailyAggregateRepository, DailyAggregateRepositoryError,
    ProfileDirectory, ProfileDirectoryError,
};
use crate::domain::{
    CheckinRecord, CheckinStatus, CreatorId, CreatorProfile, CreatorStreak, DailyAggregate, Error,
    NewCheckin, RecentCheckin, RecentLimit, StreakResult, UserId, UserProfile, calendar_day,
    streak_from_days, streak_length,
};

/// Check-in service implementing [`CheckinCommand`] and [`CheckinQuery`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use checkin_backend::domain::CheckinService;
/// use checkin_backend::domain::ports::{
///     FixtureCheckinRepository, FixtureDailyAggregateRepository, FixtureProfileDirectory,
/// };
/// use mockable::DefaultClock;
///
/// let service = CheckinService::new(
///     Arc::new(FixtureCheckinRepository),
///     Arc::new(FixtureDailyAggregateRepository),
///     Arc::new(FixtureProfileDirectory),
///     Arc::new(DefaultClock),
/// );
/// # let _ = service;
/// ```
#[derive(Clone)]
pub struct CheckinService<C, A, D> {
    checkins: Arc<C>,
    aggregates: Arc<A>,
    directory: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<C, A, D> CheckinService<C, A, D> {
    /// Create a service over the given stores, directory, and clock.
    pub fn new(
        checkins: Arc<C>,
        aggregates: Arc<A>,
        directory: Arc<D>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            checkins,
            aggregates,
            directory,
            clock,
        }
    }
}

impl<C, A, D> CheckinService<C, A, D>
where
    C: CheckinRepository,
    A: DailyAggregateRepository,
    D: ProfileDirectory,
{
    fn map_checkin_error(error: CheckinRepositoryError) -> Error {
        match error {
            CheckinRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("checkin repository unavailable: {message}"))
            }
            CheckinRepositoryError::Query { message } => {
                Error::internal(format!("checkin repository error: {message}"))
            }
            CheckinRepositoryError::DuplicateCheckin { message } => {
                Error::internal(format!("unexpected duplicate check-in: {message}"))
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

    fn map_directory_error(error: ProfileDirectoryError) -> Error {
        match error {
            ProfileDirectoryError::Connection { message } => {
                Error::service_unavailable(format!("profile directory unavailable: {message}"))
            }
            ProfileDirectoryError::Query { message } => {
                Error::internal(format!("profile directory error: {message}"))
            }
        }
    }

    fn already_checked_in(user_id: &UserId, creator_id: &CreatorId, day: NaiveDate) -> Error {
        Error::conflict("already checked in to this creator today").with_details(json!({
            "code": "already_checked_in",
            "userId": user_id,
            "creatorId": creator_id,
            "date": day,
        }))
    }

    async fn require_user(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.directory
            .find_user(user_id)
            .await
            .map_err(Self::map_directory_error)?
            .ok_or_else(|| {
                Error::not_found(format!("user {user_id} not found")).with_details(json!({
                    "code": "user_not_found",
                    "userId": user_id,
                }))
            })
    }

    async fn require_creator(&self, creator_id: &CreatorId) -> Result<CreatorProfile, Error> {
        self.directory
            .find_creator(creator_id)
            .await
            .map_err(Self::map_directory_error)?
            .ok_or_else(|| {
                Error::not_found(format!("creator {creator_id} not found")).with_details(json!({
                    "code": "creator_not_found",
                    "creatorId": creator_id,
                }))
            })
    }

    async fn history(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
    ) -> Result<Vec<CheckinRecord>, Error> {
        self.checkins
            .all_by_user_creator(user_id, creator_id)
            .await
            .map_err(Self::map_checkin_error)
    }

    async fn current_streak(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
        today: NaiveDate,
    ) -> Result<u32, Error> {
        let history = self.history(user_id, creator_id).await?;
        Ok(streak_length(&history, today))
    }

    /// Streak including a just-inserted record.
    ///
    /// The record is already committed, so a failed history read degrades to
    /// a streak of one rather than failing the call.
    async fn streak_after_insert(&self, record: &CheckinRecord, today: NaiveDate) -> u32 {
        // The new record leads the history so the streak counts it even when
        // the read lags behind the write.
        let newest = iter::once(record.day());
        match self.history(&record.user_id, &record.creator_id).await {
            Ok(history) => {
                streak_from_days(newest.chain(history.iter().map(CheckinRecord::day)), today)
            }
            Err(error) => {
                warn!(
                    %error,
                    checkin_id = %record.id,
                    user_id = %record.user_id,
                    creator_id = %record.creator_id,
                    "history read failed after check-in; reporting today's streak only"
                );
                streak_from_days(newest, today)
            }
        }
    }

    /// Increment today's counter, reporting rather than propagating failure.
    async fn record_aggregate(&self, record: &CheckinRecord, today: NaiveDate) -> bool {
        match self.aggregates.increment(&record.creator_id, today).await {
            Ok(aggregate) => {
                debug!(
                    creator_id = %record.creator_id,
                    date = %today,
                    count = aggregate.count,
                    "daily aggregate incremented"
                );
                true
            }
            Err(error) => {
                warn!(
                    %error,
                    checkin_id = %record.id,
                    user_id = %record.user_id,
                    creator_id = %record.creator_id,
                    date = %today,
                    "daily aggregate increment failed; day needs reconciliation"
                );
                false
            }
        }
    }
}

#[async_trait]
impl<C, A, D> CheckinCommand for CheckinService<C, A, D>
where
    C: CheckinRepository,
    A: DailyAggregateRepository,
    D: ProfileDirectory,
{
    async fn check_in(&self, request: CheckInRequest) -> Result<CheckInResponse, Error> {
        let CheckInRequest {
            user_id,
            creator_id,
        } = request;
        self.require_user(&user_id).await?;
        self.require_creator(&creator_id).await?;

        let checked_in_at = self.clock.utc();
        let today = calendar_day(checked_in_at);

        let already = self
            .checkins
            .has_checked_in(&user_id, &creator_id, today)
            .await
            .map_err(Self::map_checkin_error)?;
        if already {
            return Err(Self::already_checked_in(&user_id, &creator_id, today));
        }

        let new_checkin = NewCheckin {
            user_id,
            creator_id,
            checked_in_at,
        };
        let record = match self.checkins.create(&new_checkin).await {
            Ok(record) => record,
            Err(CheckinRepositoryError::DuplicateCheckin { message }) => {
                debug!(
                    %user_id,
                    %creator_id,
                    date = %today,
                    reason = %message,
                    "concurrent check-in rejected by uniqueness guarantee"
                );
                return Err(Self::already_checked_in(&user_id, &creator_id, today));
            }
            Err(error) => return Err(Self::map_checkin_error(error)),
        };

        let aggregate_recorded = self.record_aggregate(&record, today).await;

        let streak = self.streak_after_insert(&record, today).await;

        info!(
            %user_id,
            %creator_id,
            streak,
            aggregate_recorded,
            "check-in recorded"
        );
        Ok(CheckInResponse {
            record,
            streak,
            aggregate_recorded,
        })
    }
}

#[async_trait]
impl<C, A, D> CheckinQuery for CheckinService<C, A, D>
where
    C: CheckinRepository,
    A: DailyAggregateRepository,
    D: ProfileDirectory,
{
    async fn status(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
    ) -> Result<CheckinStatus, Error> {
        self.require_user(user_id).await?;
        self.require_creator(creator_id).await?;

        let today = calendar_day(self.clock.utc());
        let has_checked_in_today = self
            .checkins
            .has_checked_in(user_id, creator_id, today)
            .await
            .map_err(Self::map_checkin_error)?;
        let streak = self.current_streak(user_id, creator_id, today).await?;

        Ok(CheckinStatus {
            has_checked_in_today,
            streak,
        })
    }

    async fn streak(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
    ) -> Result<StreakResult, Error> {
        self.require_user(user_id).await?;
        self.require_creator(creator_id).await?;

        let today = calendar_day(self.clock.utc());
        let streak_length = self.current_streak(user_id, creator_id, today).await?;
        Ok(StreakResult {
            user_id: *user_id,
            creator_id: *creator_id,
            streak_length,
        })
    }

    async fn recent_checkins(
        &self,
        creator_id: &CreatorId,
        limit: RecentLimit,
    ) -> Result<Vec<RecentCheckin>, Error> {
        self.require_creator(creator_id).await?;

        let records = self
            .checkins
            .recent_by_creator(creator_id, limit.get())
            .await
            .map_err(Self::map_checkin_error)?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut user_ids: Vec<UserId> = records.iter().map(|record| record.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let profiles: HashMap<UserId, UserProfile> = self
            .directory
            .users_by_ids(&user_ids)
            .await
            .map_err(Self::map_directory_error)?
            .into_iter()
            .map(|profile| (profile.id, profile))
            .collect();

        Ok(records
            .into_iter()
            .map(|record| {
                let profile = profiles.get(&record.user_id);
                RecentCheckin {
                    user_id: record.user_id,
                    display_name: profile.map(|p| p.display_name.clone()),
                    avatar_url: profile.and_then(|p| p.avatar_url.clone()),
                    checked_in_at: record.checked_in_at,
                }
            })
            .collect())
    }

    async fn historical_stats(&self, creator_id: &CreatorId) -> Result<Vec<DailyAggregate>, Error> {
        self.require_creator(creator_id).await?;
        self.aggregates
            .list_by_creator(creator_id)
            .await
            .map_err(Self::map_aggregate_error)
    }

    async fn streaks_for_user(&self, user_id: &UserId) -> Result<Vec<CreatorStreak>, Error> {
        self.require_user(user_id).await?;

        let creator_ids = self
            .checkins
            .creators_for_user(user_id)
            .await
            .map_err(Self::map_checkin_error)?;
        if creator_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut names: HashMap<CreatorId, String> = self
            .directory
            .creators_by_ids(&creator_ids)
            .await
            .map_err(Self::map_directory_error)?
            .into_iter()
            .map(|creator| (creator.id, creator.name))
            .collect();

        let today = calendar_day(self.clock.utc());
        let mut streaks = Vec::with_capacity(creator_ids.len());
        for creator_id in creator_ids {
            let Some(creator_name) = names.remove(&creator_id) else {
                debug!(%user_id, %creator_id, "creator missing from directory; streak omitted");
                continue;
            };
            let streak = self.current_streak(user_id, &creator_id, today).await?;
            streaks.push(CreatorStreak {
                creator_id,
                creator_name,
                streak,
            });
        }

        streaks.sort_by(|a, b| {
            b.streak
                .cmp(&a.streak)
                .then_with(|| a.creator_name.cmp(&b.creator_name))
        });
        Ok(streaks)
    }
}

#[cfg(test)]
#[path = "checkin_service_tests.rs"]
mod tests;
