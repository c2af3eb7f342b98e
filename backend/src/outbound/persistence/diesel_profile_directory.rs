//! PostgreSQL-backed `ProfileDirectory` over the `users` and `creators` tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProfileDirectory, ProfileDirectoryError};
use crate::domain::{CreatorId, CreatorProfile, UserId, UserProfile};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{CreatorRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{creators, users};

/// Diesel-backed user and creator directory.
#[derive(Clone)]
pub struct DieselProfileDirectory {
    pool: DbPool,
}

impl DieselProfileDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileDirectoryError {
    ProfileDirectoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileDirectoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ProfileDirectoryError::connection(message),
        DieselFailure::UniqueViolation(_) => ProfileDirectoryError::query("database error"),
        DieselFailure::Query(message) => ProfileDirectoryError::query(message),
    }
}

fn row_to_user(row: UserRow) -> UserProfile {
    UserProfile {
        id: UserId::from_uuid(row.id),
        display_name: row.display_name,
        avatar_url: row.avatar_url,
    }
}

fn row_to_creator(row: CreatorRow) -> CreatorProfile {
    CreatorProfile {
        id: CreatorId::from_uuid(row.id),
        name: row.name,
        avatar_url: row.avatar_url,
    }
}

#[async_trait]
impl ProfileDirectory for DieselProfileDirectory {
    async fn find_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, ProfileDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_user))
    }

    async fn find_creator(
        &self,
        creator_id: &CreatorId,
    ) -> Result<Option<CreatorProfile>, ProfileDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CreatorRow> = creators::table
            .filter(creators::id.eq(creator_id.as_uuid()))
            .select(CreatorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_creator))
    }

    async fn users_by_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<UserProfile>, ProfileDirectoryError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = user_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(ids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn creators_by_ids(
        &self,
        creator_ids: &[CreatorId],
    ) -> Result<Vec<CreatorProfile>, ProfileDirectoryError> {
        if creator_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = creator_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CreatorRow> = creators::table
            .filter(creators::id.eq_any(ids))
            .select(CreatorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_creator).collect())
    }
}
