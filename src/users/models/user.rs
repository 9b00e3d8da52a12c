use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{app::util::time, auth::dtos::register_dto::RegisterDto};

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub updated_at: i64,
    pub created_at: i64,
}

impl User {
    pub fn new(dto: &RegisterDto, hash: String) -> Self {
        let current_time = time::current_time_in_secs() as i64;

        Self {
            id: Uuid::new_v4().to_string(),
            username: dto.username.to_string(),
            email: dto.email.to_string(),
            password_hash: hash,
            avatar_url: None,
            updated_at: current_time,
            created_at: current_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_carries_registration_fields() {
        let dto = RegisterDto {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine1842".to_string(),
        };

        let user = User::new(&dto, "hash".to_string());

        assert_eq!(user.username, "ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.password_hash, "hash");
        assert!(user.avatar_url.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn serialized_user_never_exposes_password_hash() {
        let dto = RegisterDto {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine1842".to_string(),
        };

        let json = serde_json::to_value(User::new(&dto, "hash".to_string())).unwrap();

        assert!(json.get("password_hash").is_none());
    }
}
