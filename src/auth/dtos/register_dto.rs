use regex::Regex;
use serde::Deserialize;
use validator::Validate;

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]{3,20}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDto {
    #[validate(regex(
        path = "USERNAME_REGEX",
        message = "username must be 3 to 20 characters (letters, numbers, underscores)."
    ))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters."))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_registration() {
        let dto = RegisterDto {
            username: "ada_lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine1842".to_string(),
        };

        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_bad_username_email_and_short_password() {
        let dto = RegisterDto {
            username: "a!".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
