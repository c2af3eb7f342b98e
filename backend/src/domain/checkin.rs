//! Check-in records, daily aggregates, and the read models built from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::calendar_day;
use super::{CheckinId, CreatorId, UserId};

/// One fan engaging with one creator at one instant.
///
/// Records are append-only: at most one exists per user, creator, and
/// calendar day, and none is ever updated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRecord {
    pub id: CheckinId,
    pub user_id: UserId,
    pub creator_id: CreatorId,
    pub checked_in_at: DateTime<Utc>,
}

impl CheckinRecord {
    /// Calendar day this record counts towards.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        calendar_day(self.checked_in_at)
    }
}

/// Values required to append a new check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckin {
    pub user_id: UserId,
    pub creator_id: CreatorId,
    pub checked_in_at: DateTime<Utc>,
}

impl NewCheckin {
    /// Calendar day the new record will occupy.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        calendar_day(self.checked_in_at)
    }
}

/// Count of distinct fans who checked in to a creator on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    pub id: Uuid,
    pub creator_id: CreatorId,
    pub date: NaiveDate,
    pub count: u32,
}

/// Length of a fan's unbroken daily run for one creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResult {
    pub user_id: UserId,
    pub creator_id: CreatorId,
    pub streak_length: u32,
}

/// Whether a fan has checked in today and their current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinStatus {
    pub has_checked_in_today: bool,
    pub streak: u32,
}

/// Recent check-in enriched with directory metadata for display.
///
/// Display fields are `None` when the fan no longer resolves in the
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCheckin {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub checked_in_at: DateTime<Utc>,
}

/// A fan's streak for one creator, labelled with the creator's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStreak {
    pub creator_id: CreatorId,
    pub creator_name: String,
    pub streak: u32,
}

/// Validation errors raised by [`RecentLimit::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecentLimitError {
    /// Requested limit is outside `1..=RecentLimit::MAX`.
    #[error("limit must be between 1 and {max}, got {requested}")]
    OutOfRange { requested: u32, max: u32 },
}

/// Page size for recent check-in listings.
///
/// # Examples
/// ```
/// use checkin_backend::domain::RecentLimit;
///
/// assert_eq!(RecentLimit::default().get(), 10);
/// assert!(RecentLimit::new(0).is_err());
/// assert_eq!(RecentLimit::new(25).map(RecentLimit::get), Ok(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentLimit(u32);

impl RecentLimit {
    /// Limit applied when the caller does not request one.
    pub const DEFAULT: u32 = 10;
    /// Largest limit a caller may request.
    pub const MAX: u32 = 100;

    /// Validate a requested limit.
    pub fn new(requested: u32) -> Result<Self, RecentLimitError> {
        if requested == 0 || requested > Self::MAX {
            return Err(RecentLimitError::OutOfRange {
                requested,
                max: Self::MAX,
            });
        }
        Ok(Self(requested))
    }

    /// The validated limit.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for RecentLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
