use serde::Serialize;

use crate::users::models::user_summary::UserSummary;

#[derive(Debug, Serialize)]
pub struct AccessInfo {
    pub token: String,
    pub user: UserSummary,
}
