use serde::{Deserialize, Serialize};
use serenity::model::Permissions;
use serenity::model::id::{GuildId, RoleId, UserId};

use super::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
}

/// Guild member
///
/// `permissions` is only present when Discord resolved them for the member
/// in a channel (interaction payloads).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

impl Member {
    /// Member with only resolved permissions set
    pub fn with_permissions(permissions: Permissions) -> Self {
        Self {
            user: None,
            nick: None,
            roles: Vec::new(),
            permissions: Some(permissions),
        }
    }
}
