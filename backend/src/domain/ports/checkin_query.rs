//! Driving port for check-in read models.
//!
//! Every operation is a pure read over the record and aggregate stores.

use async_trait::async_trait;

use crate::domain::{
    CheckinStatus, CreatorId, CreatorStreak, DailyAggregate, Error, RecentCheckin, RecentLimit,
    StreakResult, UserId,
};

/// Inbound contract for check-in reporting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinQuery: Send + Sync {
    /// Whether the fan checked in today and their current streak.
    async fn status(&self, user_id: &UserId, creator_id: &CreatorId)
    -> Result<CheckinStatus, Error>;

    /// The fan's current streak for the creator.
    async fn streak(&self, user_id: &UserId, creator_id: &CreatorId)
    -> Result<StreakResult, Error>;

    /// The creator's most recent check-ins, newest first.
    async fn recent_checkins(
        &self,
        creator_id: &CreatorId,
        limit: RecentLimit,
    ) -> Result<Vec<RecentCheckin>, Error>;

    /// The creator's daily counters, newest date first.
    async fn historical_stats(&self, creator_id: &CreatorId) -> Result<Vec<DailyAggregate>, Error>;

    /// The fan's streak for every creator they have checked in to.
    ///
    /// Ordered by streak descending, then creator name.
    async fn streaks_for_user(&self, user_id: &UserId) -> Result<Vec<CreatorStreak>, Error>;
}

/// Fixture query reporting an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckinQuery;

#[async_trait]
impl CheckinQuery for FixtureCheckinQuery {
    async fn status(
        &self,
        _user_id: &UserId,
        _creator_id: &CreatorId,
    ) -> Result<CheckinStatus, Error> {
        Ok(CheckinStatus {
            has_checked_in_today: false,
            streak: 0,
        })
    }

    async fn streak(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
    ) -> Result<StreakResult, Error> {
        Ok(StreakResult {
            user_id: *user_id,
            creator_id: *creator_id,
            streak_length: 0,
        })
    }

    async fn recent_checkins(
        &self,
        _creator_id: &CreatorId,
        _limit: RecentLimit,
    ) -> Result<Vec<RecentCheckin>, Error> {
        Ok(Vec::new())
    }

    async fn historical_stats(
        &self,
        _creator_id: &CreatorId,
    ) -> Result<Vec<DailyAggregate>, Error> {
        Ok(Vec::new())
    }

    async fn streaks_for_user(&self, _user_id: &UserId) -> Result<Vec<CreatorStreak>, Error> {
        Ok(Vec::new())
    }
}
