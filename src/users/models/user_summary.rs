use serde::Serialize;

use super::user::User;

/// Shallow projection of a user for display next to content, never the
/// account record itself.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserSummary {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            avatar_url: user.avatar_url.to_owned(),
        }
    }
}
