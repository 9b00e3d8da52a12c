use serde::{Deserialize, Serialize};

use crate::uploads::models::stored_upload::StoredUpload;

/// An uploaded file embedded in a post. Owned exclusively by the post: it has
/// no row of its own and its backing file is released when the post goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAttachment {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub mimetype: String,
    pub size: i64,
}

impl PostAttachment {
    pub fn from_upload(upload: StoredUpload) -> Self {
        Self {
            id: upload.id,
            filename: upload.filename,
            original_name: upload.original_name,
            path: upload.path,
            mimetype: upload.mimetype,
            size: upload.size,
        }
    }
}
