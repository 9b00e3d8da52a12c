use std::collections::HashMap;

use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::app::models::api_error::ApiError;

/// Structured part of the multipart create body. `tags` and `links` arrive as
/// JSON-encoded strings and are decoded by the service.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostDto {
    #[validate(length(
        min = 1,
        max = 200,
        message = "title must be between 1 and 200 characters."
    ))]
    pub title: String,
    #[validate(length(min = 1, message = "content must not be empty."))]
    pub content: String,
    pub tags: Option<String>,
    pub links: Option<String>,
}

impl CreatePostDto {
    pub fn from_form_fields(fields: &mut HashMap<String, String>) -> Result<Self, ApiError> {
        let Some(title) = fields.remove("title")
        else {
            return Err(ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "title is required.".to_string(),
            });
        };

        let Some(content) = fields.remove("content")
        else {
            return Err(ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "content is required.".to_string(),
            });
        };

        Ok(Self {
            title,
            content,
            tags: fields.remove("tags"),
            links: fields.remove("links"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_dto_from_form_fields() {
        let mut fields = HashMap::from([
            ("title".to_string(), "First post".to_string()),
            ("content".to_string(), "Hello.".to_string()),
            ("tags".to_string(), "[\"rust\"]".to_string()),
        ]);

        let dto = CreatePostDto::from_form_fields(&mut fields).unwrap();

        assert_eq!(dto.title, "First post");
        assert_eq!(dto.tags.as_deref(), Some("[\"rust\"]"));
        assert!(dto.links.is_none());
    }

    #[test]
    fn missing_title_or_content_is_rejected() {
        let mut fields = HashMap::from([("content".to_string(), "Hello.".to_string())]);
        assert!(CreatePostDto::from_form_fields(&mut fields).is_err());

        let mut fields = HashMap::from([("title".to_string(), "First post".to_string())]);
        assert!(CreatePostDto::from_form_fields(&mut fields).is_err());
    }

    #[test]
    fn overlong_title_fails_validation() {
        let dto = CreatePostDto {
            title: "t".repeat(201),
            content: "Hello.".to_string(),
            tags: None,
            links: None,
        };

        assert!(dto.validate().is_err());
    }
}
