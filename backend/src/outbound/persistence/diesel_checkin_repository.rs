//! PostgreSQL-backed `CheckinRepository` implementation using Diesel ORM.
//!
//! The unique index on `(user_id, creator_id, checkin_day)` is the final
//! arbiter of one check-in per day. An insert that loses a race surfaces as
//! [`CheckinRepositoryError::DuplicateCheckin`].

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::dsl::{count_distinct, exists};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CheckinRepository, CheckinRepositoryError};
use crate::domain::{CheckinId, CheckinRecord, CreatorId, NewCheckin, UserId, day_bounds};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{CheckinRow, NewCheckinRow};
use super::pool::{DbPool, PoolError};
use super::schema::checkins;

/// Diesel-backed check-in record store.
#[derive(Clone)]
pub struct DieselCheckinRepository {
    pool: DbPool,
}

impl DieselCheckinRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CheckinRepositoryError {
    CheckinRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> CheckinRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CheckinRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => CheckinRepositoryError::duplicate_checkin(
            format!("concurrent insert detected ({constraint})"),
        ),
        DieselFailure::Query(message) => CheckinRepositoryError::query(message),
    }
}

fn row_to_record(row: CheckinRow) -> CheckinRecord {
    CheckinRecord {
        id: CheckinId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        creator_id: CreatorId::from_uuid(row.creator_id),
        checked_in_at: row.checked_in_at,
    }
}

fn count_from_db(count: i64) -> Result<u32, CheckinRepositoryError> {
    u32::try_from(count)
        .map_err(|_| CheckinRepositoryError::query(format!("check-in count {count} out of range")))
}

#[async_trait]
impl CheckinRepository for DieselCheckinRepository {
    async fn has_checked_in(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
        day: NaiveDate,
    ) -> Result<bool, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let bounds = day_bounds(day);

        diesel::select(exists(
            checkins::table.filter(
                checkins::user_id
                    .eq(user_id.as_uuid())
                    .and(checkins::creator_id.eq(creator_id.as_uuid()))
                    .and(checkins::checked_in_at.ge(bounds.start))
                    .and(checkins::checked_in_at.lt(bounds.end)),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn create(&self, checkin: &NewCheckin) -> Result<CheckinRecord, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCheckinRow {
            id: Uuid::new_v4(),
            user_id: *checkin.user_id.as_uuid(),
            creator_id: *checkin.creator_id.as_uuid(),
            checked_in_at: checkin.checked_in_at,
            checkin_day: checkin.day(),
        };

        diesel::insert_into(checkins::table)
            .values(&row)
            .returning(CheckinRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_record)
            .map_err(map_diesel_error)
    }

    async fn recent_by_creator(
        &self,
        creator_id: &CreatorId,
        limit: u32,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CheckinRow> = checkins::table
            .filter(checkins::creator_id.eq(creator_id.as_uuid()))
            .order((checkins::checked_in_at.desc(), checkins::id.desc()))
            .limit(i64::from(limit))
            .select(CheckinRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    async fn all_by_user_creator(
        &self,
        user_id: &UserId,
        creator_id: &CreatorId,
    ) -> Result<Vec<CheckinRecord>, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CheckinRow> = checkins::table
            .filter(
                checkins::user_id
                    .eq(user_id.as_uuid())
                    .and(checkins::creator_id.eq(creator_id.as_uuid())),
            )
            .order(checkins::checked_in_at.desc())
            .select(CheckinRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    async fn creators_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CreatorId>, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<Uuid> = checkins::table
            .filter(checkins::user_id.eq(user_id.as_uuid()))
            .select(checkins::creator_id)
            .distinct()
            .order(checkins::creator_id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ids.into_iter().map(CreatorId::from_uuid).collect())
    }

    async fn count_for_creator_day(
        &self,
        creator_id: &CreatorId,
        day: NaiveDate,
    ) -> Result<u32, CheckinRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = checkins::table
            .filter(
                checkins::creator_id
                    .eq(creator_id.as_uuid())
                    .and(checkins::checkin_day.eq(day)),
            )
            .select(count_distinct(checkins::user_id))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        count_from_db(count)
    }
}
