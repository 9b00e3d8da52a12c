use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginDto {
    #[validate(email(message = "email must be a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty."))]
    pub password: String,
}
