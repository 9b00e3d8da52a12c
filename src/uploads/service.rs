use std::path::Path;

use bytes::Bytes;
use mime::Mime;
use rand::Rng;
use tokio::fs;

use crate::app::{
    errors::DefaultApiError, models::api_error::ApiError,
    util::multipart::models::file_properties::FileProperties, util::time,
};

use super::{enums::upload_category::UploadCategory, errors::UploadsApiError,
    models::stored_upload::StoredUpload};

pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Generous total-body ceiling: up to 10 images plus 5 documents at the
/// per-file cap, with headroom for the text fields.
pub const MAX_REQUEST_SIZE: usize = 16 * MAX_FILE_SIZE;

const DOCUMENT_MIME_TYPES: [&str; 6] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Creates the category directories under the storage root. Absence of these
/// at runtime is an unrecoverable configuration error, so this runs once at
/// startup.
pub fn ensure_upload_dirs(root: &Path) -> std::io::Result<()> {
    for category in [UploadCategory::Images, UploadCategory::Documents] {
        std::fs::create_dir_all(root.join(category.dir()))?;
    }

    Ok(())
}

/// Accept/reject policy for a single file, evaluated before any bytes reach
/// disk.
pub fn validate_file(
    category: UploadCategory,
    mime_type: &Mime,
    size: usize,
) -> Result<(), ApiError> {
    if size > MAX_FILE_SIZE {
        return Err(UploadsApiError::FileTooLarge.value());
    }

    match category {
        UploadCategory::Images => match mime_type.type_() == mime::IMAGE {
            true => Ok(()),
            false => Err(UploadsApiError::InvalidImageType.value()),
        },
        UploadCategory::Documents => {
            match DOCUMENT_MIME_TYPES.contains(&mime_type.essence_str()) {
                true => Ok(()),
                false => Err(UploadsApiError::InvalidDocumentType.value()),
            }
        }
    }
}

/// Validates a whole category batch (count cap plus per-file policy) without
/// touching the filesystem.
pub fn validate_files(
    files: &[FileProperties],
    category: UploadCategory,
) -> Result<(), ApiError> {
    if files.len() > category.max_files() {
        return Err(match category {
            UploadCategory::Images => UploadsApiError::TooManyImages.value(),
            UploadCategory::Documents => UploadsApiError::TooManyDocuments.value(),
        });
    }

    for file in files {
        validate_file(category, &file.mime_type, file.data.len())?;
    }

    Ok(())
}

/// Millisecond timestamp plus a random component plus the original
/// extension. Collisions are treated as acceptably improbable; there is no
/// retry.
pub fn unique_filename(original_name: &str) -> String {
    let suffix = rand::thread_rng().gen_range(0..1_000_000_000u32);
    let extension = Path::new(original_name)
        .extension()
        .map(|ext| [".", &ext.to_string_lossy()].concat())
        .unwrap_or_default();

    format!("{}-{}{}", time::current_time_in_millis(), suffix, extension)
}

/// Writes a validated batch to its category directory. The whole batch is
/// re-checked first so a bad file rejects the request before anything is
/// persisted.
pub async fn store_files(
    files: Vec<FileProperties>,
    category: UploadCategory,
    root: &Path,
) -> Result<Vec<StoredUpload>, ApiError> {
    validate_files(&files, category)?;

    let mut stored = Vec::new();

    for file in files {
        let filename = unique_filename(&file.file_name);
        let path = [category.dir(), "/", &filename].concat();

        if let Err(e) = fs::write(root.join(&path), &file.data).await {
            tracing::error!(%e);
            return Err(DefaultApiError::InternalServerError.value());
        }

        stored.push(StoredUpload {
            id: file.id,
            filename,
            original_name: file.file_name,
            path,
            mimetype: file.mime_type.to_string(),
            size: file.data.len() as i64,
        });
    }

    Ok(stored)
}

/// Best-effort removal: a file already gone is logged and skipped, never
/// fatal.
pub async fn delete_file(root: &Path, path: &str) {
    if let Err(e) = fs::remove_file(root.join(path)).await {
        tracing::warn!("failed to remove file {}: {}", path, e);
    }
}

/// Existence-checked read for downloads.
pub async fn read_file(root: &Path, path: &str) -> Result<Bytes, ApiError> {
    match fs::read(root.join(path)).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(UploadsApiError::FileNotFound.value())
        }
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use bytes::Bytes;
    use uuid::Uuid;

    use super::*;

    fn file(field_name: &str, file_name: &str, mime_type: &str, data: &'static [u8]) -> FileProperties {
        FileProperties {
            id: Uuid::new_v4().to_string(),
            field_name: field_name.to_string(),
            file_name: file_name.to_string(),
            mime_type: mime_type.parse().unwrap(),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn images_accept_only_image_mime_types() {
        let png: Mime = "image/png".parse().unwrap();
        let pdf: Mime = "application/pdf".parse().unwrap();

        assert!(validate_file(UploadCategory::Images, &png, 1024).is_ok());
        assert!(validate_file(UploadCategory::Images, &pdf, 1024).is_err());
    }

    #[test]
    fn documents_accept_allow_list_only() {
        let pdf: Mime = "application/pdf".parse().unwrap();
        let csv: Mime = "text/csv".parse().unwrap();

        assert!(validate_file(UploadCategory::Documents, &pdf, 1024).is_ok());
        assert!(validate_file(UploadCategory::Documents, &csv, 1024).is_err());
    }

    #[test]
    fn oversize_file_is_rejected() {
        let png: Mime = "image/png".parse().unwrap();

        let err = validate_file(UploadCategory::Images, &png, MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn batch_over_category_cap_is_rejected() {
        let files: Vec<FileProperties> = (0..6)
            .map(|i| {
                let name = format!("doc-{}.pdf", i);
                FileProperties {
                    id: Uuid::new_v4().to_string(),
                    field_name: "documents".to_string(),
                    file_name: name,
                    mime_type: "application/pdf".parse().unwrap(),
                    data: Bytes::from_static(b"%PDF-1.4"),
                }
            })
            .collect();

        assert!(validate_files(&files, UploadCategory::Documents).is_err());
        assert!(validate_files(&files[..5], UploadCategory::Documents).is_ok());
    }

    #[test]
    fn unique_filename_keeps_extension() {
        let a = unique_filename("holiday photo.png");
        let b = unique_filename("holiday photo.png");

        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
        assert!(!unique_filename("README").contains('.'));
    }

    #[tokio::test]
    async fn store_read_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        ensure_upload_dirs(root).unwrap();

        let stored = store_files(
            vec![file("images", "cat.png", "image/png", b"pngbytes")],
            UploadCategory::Images,
            root,
        )
        .await
        .unwrap();

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].original_name, "cat.png");
        assert!(stored[0].path.starts_with("uploads/images/"));

        let data = read_file(root, &stored[0].path).await.unwrap();
        assert_eq!(&data[..], b"pngbytes");

        delete_file(root, &stored[0].path).await;

        let err = read_file(root, &stored[0].path).await.unwrap_err();
        assert_eq!(err.code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        ensure_upload_dirs(root).unwrap();

        let result = store_files(
            vec![
                file("images", "cat.png", "image/png", b"pngbytes"),
                file("images", "notes.txt", "text/plain", b"notes"),
            ],
            UploadCategory::Images,
            root,
        )
        .await;

        assert!(result.is_err());

        let mut entries = std::fs::read_dir(root.join(UploadCategory::Images.dir())).unwrap();
        assert!(entries.next().is_none());
    }

    #[tokio::test]
    async fn deleting_missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();

        delete_file(dir.path(), "uploads/images/already-gone.png").await;
    }
}
