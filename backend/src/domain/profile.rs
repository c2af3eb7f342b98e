//! Display metadata resolved from the user/creator directory.

use serde::{Deserialize, Serialize};

use super::{CreatorId, UserId};

/// A fan as known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// A creator as known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    pub id: CreatorId,
    pub name: String,
    pub avatar_url: Option<String>,
}
