//! Diesel table definitions for the check-in schema.
//!
//! These must match the SQL under `backend/migrations`. Regenerate with
//! `diesel print-schema` after a migration changes a column.

diesel::table! {
    /// Fans who can check in.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        avatar_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Creators fans check in to.
    creators (id) {
        id -> Uuid,
        name -> Varchar,
        avatar_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only check-in log.
    ///
    /// `checkin_day` is the UTC date of `checked_in_at`; a unique index on
    /// `(user_id, creator_id, checkin_day)` allows one record per day.
    checkins (id) {
        id -> Uuid,
        user_id -> Uuid,
        creator_id -> Uuid,
        checked_in_at -> Timestamptz,
        checkin_day -> Date,
    }
}

diesel::table! {
    /// Per-creator daily counters, unique on `(creator_id, day)`.
    daily_checkin_aggregates (id) {
        id -> Uuid,
        creator_id -> Uuid,
        day -> Date,
        checkin_count -> Int4,
    }
}

diesel::joinable!(checkins -> users (user_id));
diesel::joinable!(checkins -> creators (creator_id));
diesel::joinable!(daily_checkin_aggregates -> creators (creator_id));

diesel::allow_tables_to_appear_in_same_query!(checkins, creators, daily_checkin_aggregates, users);
