//! Request and response bodies for the check-in endpoints.
//!
//! Identifiers travel as strings so malformed values reach the handler and
//! produce field-level validation errors instead of opaque 400s.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CheckInResponse;
use crate::domain::{CheckinRecord, CheckinStatus, CreatorStreak, DailyAggregate, RecentCheckin};

/// Request payload for `POST /checkins`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequestBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub creator_id: String,
}

/// Persisted check-in as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRecordBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub creator_id: String,
    #[schema(format = "date-time")]
    pub checked_in_at: String,
}

/// Response payload for a successful check-in.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponseBody {
    pub checkin_record: CheckinRecordBody,
    /// Streak including today's check-in.
    pub streak: u32,
    /// False when the daily counter could not be updated.
    pub aggregate_recorded: bool,
}

/// Response payload for the check-in status endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinStatusBody {
    pub has_checked_in_today: bool,
    pub checkin_streak: u32,
}

/// Display data for the fan behind a recent check-in.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentCheckinUserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// One entry of the recent check-ins feed.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentCheckinBody {
    pub user: RecentCheckinUserBody,
    #[schema(format = "date-time")]
    pub date: String,
}

/// Daily check-in count for a creator.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatBody {
    #[schema(format = "date", example = "2024-01-03")]
    pub date: String,
    pub count: u32,
}

/// A fan's streak for one creator.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStreakBody {
    #[schema(format = "uuid")]
    pub creator_id: String,
    pub creator_name: String,
    pub streak: u32,
}

/// Query parameters for the recent check-ins feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentCheckinsQuery {
    pub limit: Option<String>,
}

/// Path segments naming a fan and a creator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatorPath {
    pub user_id: String,
    pub creator_id: String,
}

/// Path segment naming a creator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPath {
    pub creator_id: String,
}

/// Path segment naming a fan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPath {
    pub user_id: String,
}

impl From<CheckinRecord> for CheckinRecordBody {
    fn from(value: CheckinRecord) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            creator_id: value.creator_id.to_string(),
            checked_in_at: value.checked_in_at.to_rfc3339(),
        }
    }
}

impl From<CheckInResponse> for CheckInResponseBody {
    fn from(value: CheckInResponse) -> Self {
        Self {
            checkin_record: value.record.into(),
            streak: value.streak,
            aggregate_recorded: value.aggregate_recorded,
        }
    }
}

impl From<CheckinStatus> for CheckinStatusBody {
    fn from(value: CheckinStatus) -> Self {
        Self {
            has_checked_in_today: value.has_checked_in_today,
            checkin_streak: value.streak,
        }
    }
}

impl From<RecentCheckin> for RecentCheckinBody {
    fn from(value: RecentCheckin) -> Self {
        Self {
            user: RecentCheckinUserBody {
                id: value.user_id.to_string(),
                display_name: value.display_name,
                avatar_url: value.avatar_url,
            },
            date: value.checked_in_at.to_rfc3339(),
        }
    }
}

impl From<DailyAggregate> for DailyStatBody {
    fn from(value: DailyAggregate) -> Self {
        Self {
            date: value.date.format("%Y-%m-%d").to_string(),
            count: value.count,
        }
    }
}

impl From<CreatorStreak> for CreatorStreakBody {
    fn from(value: CreatorStreak) -> Self {
        Self {
            creator_id: value.creator_id.to_string(),
            creator_name: value.creator_name,
            streak: value.streak,
        }
    }
}
