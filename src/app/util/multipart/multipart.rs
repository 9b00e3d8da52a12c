use std::collections::HashMap;

use axum::{extract::Multipart, http::StatusCode};
use mime::Mime;
use uuid::Uuid;

use crate::app::models::api_error::ApiError;

use super::models::file_properties::FileProperties;

pub struct FormProperties {
    pub fields: HashMap<String, String>,
    pub files: Vec<FileProperties>,
}

/// Reads every part of a multipart body; parts carrying a file name become
/// files, the rest become text fields.
pub async fn get_form_properties(mut multipart: Multipart) -> Result<FormProperties, ApiError> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: e.to_string(),
                })
            }
        };

        let field_name = field.name().unwrap_or("file").to_string();

        if field.file_name().is_some() {
            let file_name = field.file_name().unwrap_or("file-name").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .parse::<Mime>()
                .unwrap_or(mime::APPLICATION_OCTET_STREAM);

            let Ok(data) = field.bytes().await
            else {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: ["Failed to read file part \"", &field_name, "\"."].concat(),
                });
            };

            files.push(FileProperties {
                id: Uuid::new_v4().to_string(),
                field_name,
                file_name,
                mime_type,
                data,
            });
        } else {
            let Ok(text) = field.text().await
            else {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: ["Failed to read field \"", &field_name, "\"."].concat(),
                });
            };

            fields.insert(field_name, text);
        }
    }

    Ok(FormProperties { fields, files })
}
