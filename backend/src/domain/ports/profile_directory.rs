//! Port for the user/creator directory.
//!
//! The directory owns accounts; the check-in core only asks whether an
//! identifier exists and how to label it.

use async_trait::async_trait;

use crate::domain::{CreatorId, CreatorProfile, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory adapters.
    pub enum ProfileDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "profile directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "profile directory query failed: {message}",
    }
}

/// Read-only lookups against the user/creator directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Resolve one fan.
    async fn find_user(&self, user_id: &UserId)
    -> Result<Option<UserProfile>, ProfileDirectoryError>;

    /// Resolve one creator.
    async fn find_creator(
        &self,
        creator_id: &CreatorId,
    ) -> Result<Option<CreatorProfile>, ProfileDirectoryError>;

    /// Resolve many fans at once. Unknown identifiers are omitted.
    async fn users_by_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<UserProfile>, ProfileDirectoryError>;

    /// Resolve many creators at once. Unknown identifiers are omitted.
    async fn creators_by_ids(
        &self,
        creator_ids: &[CreatorId],
    ) -> Result<Vec<CreatorProfile>, ProfileDirectoryError>;
}

/// Fixture directory that recognises every identifier.
///
/// Names are derived from the identifier so responses stay readable in local
/// runs without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileDirectory;

impl FixtureProfileDirectory {
    fn user(user_id: UserId) -> UserProfile {
        UserProfile {
            id: user_id,
            display_name: format!("fan-{user_id}"),
            avatar_url: None,
        }
    }

    fn creator(creator_id: CreatorId) -> CreatorProfile {
        CreatorProfile {
            id: creator_id,
            name: format!("creator-{creator_id}"),
            avatar_url: None,
        }
    }
}

#[async_trait]
impl ProfileDirectory for FixtureProfileDirectory {
    async fn find_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, ProfileDirectoryError> {
        Ok(Some(Self::user(*user_id)))
    }

    async fn find_creator(
        &self,
        creator_id: &CreatorId,
    ) -> Result<Option<CreatorProfile>, ProfileDirectoryError> {
        Ok(Some(Self::creator(*creator_id)))
    }

    async fn users_by_ids(
        &self,
        user_ids: &[UserId],
    ) -> Result<Vec<UserProfile>, ProfileDirectoryError> {
        Ok(user_ids.iter().copied().map(Self::user).collect())
    }

    async fn creators_by_ids(
        &self,
        creator_ids: &[CreatorId],
    ) -> Result<Vec<CreatorProfile>, ProfileDirectoryError> {
        Ok(creator_ids.iter().copied().map(Self::creator).collect())
    }
}
