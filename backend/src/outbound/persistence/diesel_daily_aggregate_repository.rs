//! PostgreSQL-backed `DailyAggregateRepository` implementation using Diesel ORM.
//!
//! Both mutations are a single `INSERT .. ON CONFLICT (creator_id, day) DO
//! UPDATE`, so concurrent increments for the same day serialise on the row
//! lock instead of racing a read-modify-write.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DailyAggregateRepository, DailyAggregateRepositoryError};
use crate::domain::{CreatorId, DailyAggregate};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{DailyAggregateRow, NewDailyAggregateRow};
use super::pool::{DbPool, PoolError};
use super::schema::daily_checkin_aggregates as aggregates;

/// Diesel-backed daily counter store.
#[derive(Clone)]
pub struct DieselDailyAggregateRepository {
    pool: DbPool,
}

impl DieselDailyAggregateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DailyAggregateRepositoryError {
    DailyAggregateRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> DailyAggregateRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => DailyAggregateRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => DailyAggregateRepositoryError::query(
            format!("unexpected unique violation on {constraint}"),
        ),
        DieselFailure::Query(message) => DailyAggregateRepositoryError::query(message),
    }
}

fn row_to_aggregate(
    row: DailyAggregateRow,
) -> Result<DailyAggregate, DailyAggregateRepositoryError> {
    let count = u32::try_from(row.checkin_count).map_err(|_| {
        DailyAggregateRepositoryError::query(format!(
            "negative checkin_count {} for aggregate {}",
            row.checkin_count, row.id
        ))
    })?;
    Ok(DailyAggregate {
        id: row.id,
        creator_id: CreatorId::from_uuid(row.creator_id),
        date: row.day,
        count,
    })
}

fn count_for_db(count: u32) -> Result<i32, DailyAggregateRepositoryError> {
    i32::try_from(count)
        .map_err(|_| DailyAggregateRepositoryError::query(format!("count {count} out of range")))
}

fn first_row(creator_id: &CreatorId, date: NaiveDate, count: i32) -> NewDailyAggregateRow {
    NewDailyAggregateRow {
        id: Uuid::new_v4(),
        creator_id: *creator_id.as_uuid(),
        day: date,
        checkin_count: count,
    }
}

#[async_trait]
impl DailyAggregateRepository for DieselDailyAggregateRepository {
    async fn increment(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: DailyAggregateRow = diesel::insert_into(aggregates::table)
            .values(&first_row(creator_id, date, 1))
            .on_conflict((aggregates::creator_id, aggregates::day))
            .do_update()
            .set(aggregates::checkin_count.eq(aggregates::checkin_count + 1))
            .returning(DailyAggregateRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_aggregate(row)
    }

    async fn list_by_creator(
        &self,
        creator_id: &CreatorId,
    ) -> Result<Vec<DailyAggregate>, DailyAggregateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DailyAggregateRow> = aggregates::table
            .filter(aggregates::creator_id.eq(creator_id.as_uuid()))
            .order(aggregates::day.desc())
            .select(DailyAggregateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_aggregate).collect()
    }

    async fn find(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
    ) -> Result<Option<DailyAggregate>, DailyAggregateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DailyAggregateRow> = aggregates::table
            .filter(
                aggregates::creator_id
                    .eq(creator_id.as_uuid())
                    .and(aggregates::day.eq(date)),
            )
            .select(DailyAggregateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_aggregate).transpose()
    }

    async fn overwrite(
        &self,
        creator_id: &CreatorId,
        date: NaiveDate,
        count: u32,
    ) -> Result<DailyAggregate, DailyAggregateRepositoryError> {
        let count = count_for_db(count)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: DailyAggregateRow = diesel::insert_into(aggregates::table)
            .values(&first_row(creator_id, date, count))
            .on_conflict((aggregates::creator_id, aggregates::day))
            .do_update()
            .set(aggregates::checkin_count.eq(excluded(aggregates::checkin_count)))
            .returning(DailyAggregateRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_aggregate(row)
    }
}
