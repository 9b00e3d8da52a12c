/// A file accepted by the store and written to disk, described by the
/// relative path a post will reference it by.
#[derive(Debug)]
pub struct StoredUpload {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub mimetype: String,
    pub size: i64,
}
