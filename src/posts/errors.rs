use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum PostsApiError {
    PostNotFound,
    NotPostOwner,
    MalformedTags,
    MalformedLinks,
}

impl PostsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::PostNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Post not found.".to_string(),
            },
            Self::NotPostOwner => ApiError {
                code: StatusCode::FORBIDDEN,
                message: "Not authorized.".to_string(),
            },
            Self::MalformedTags => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "tags must be a JSON array of strings.".to_string(),
            },
            Self::MalformedLinks => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "links must be a JSON array of link objects.".to_string(),
            },
        }
    }
}
