//! Internal Diesel row structs for the check-in tables.
//!
//! These types never leave the persistence layer. Repositories convert them
//! to domain records before returning.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{checkins, creators, daily_checkin_aggregates, users};

/// Row struct for reading from the checkins table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = checkins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CheckinRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub creator_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
}

/// Insertable struct for appending a check-in.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = checkins)]
pub(crate) struct NewCheckinRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub creator_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
    pub checkin_day: NaiveDate,
}

/// Row struct for reading from the daily_checkin_aggregates table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = daily_checkin_aggregates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DailyAggregateRow {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub day: NaiveDate,
    pub checkin_count: i32,
}

/// Insertable struct for the first counter of a day.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_checkin_aggregates)]
pub(crate) struct NewDailyAggregateRow {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub day: NaiveDate,
    pub checkin_count: i32,
}

/// Row struct for reading fan profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Row struct for reading creator profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = creators)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CreatorRow {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
}
