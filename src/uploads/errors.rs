use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum UploadsApiError {
    FileTooLarge,
    InvalidImageType,
    InvalidDocumentType,
    TooManyImages,
    TooManyDocuments,
    UnexpectedFileField,
    FileNotFound,
}

impl UploadsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::FileTooLarge => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "File exceeds the 50MB size limit.".to_string(),
            },
            Self::InvalidImageType => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Only image files are allowed.".to_string(),
            },
            Self::InvalidDocumentType => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Only PDF, DOC, DOCX, TXT, XLS and XLSX files are allowed.".to_string(),
            },
            Self::TooManyImages => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "A post can have at most 10 images.".to_string(),
            },
            Self::TooManyDocuments => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "A post can have at most 5 documents.".to_string(),
            },
            Self::UnexpectedFileField => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Unexpected file field.".to_string(),
            },
            Self::FileNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "File not found.".to_string(),
            },
        }
    }
}
