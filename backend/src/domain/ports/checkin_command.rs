//! Driving port for recording check-ins.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{CheckinId, CheckinRecord, CreatorId, Error, UserId};

/// Request to check a fan in to a creator for today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub user_id: UserId,
    pub creator_id: CreatorId,
}

/// Outcome of a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    /// The newly stored record.
    pub record: CheckinRecord,
    /// Streak including the new record; always at least 1.
    pub streak: u32,
    /// `false` when the record committed but the daily counter did not.
    ///
    /// The counter is repaired by reconciliation; the check-in itself stands.
    pub aggregate_recorded: bool,
}

/// Inbound contract for creating check-ins.
///
/// # Errors
///
/// - `conflict` when the fan already checked in to the creator today,
///   including when a concurrent request won the race.
/// - `not_found` when either identifier is unknown to the directory.
/// - `service_unavailable` or `internal_error` for storage failures that
///   occur before the record commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinCommand: Send + Sync {
    /// Record today's check-in and report the resulting streak.
    async fn check_in(&self, request: CheckInRequest) -> Result<CheckInResponse, Error>;
}

/// Fixture command that accepts every check-in as the first of a new streak.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCheckinCommand;

#[async_trait]
impl CheckinCommand for FixtureCheckinCommand {
    async fn check_in(&self, request: CheckInRequest) -> Result<CheckInResponse, Error> {
        Ok(CheckInResponse {
            record: CheckinRecord {
                id: CheckinId::random(),
                user_id: request.user_id,
                creator_id: request.creator_id,
                checked_in_at: Utc::now(),
            },
            streak: 1,
            aggregate_recorded: true,
        })
    }
}
