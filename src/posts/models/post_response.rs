use serde::Serialize;

use super::post::Post;

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub message: String,
    pub post: Post,
}
