use serde::Deserialize;
use validator::Validate;

/// Partial update: absent fields keep their prior values. `tags` and `links`
/// use the same JSON-encoded string representation as create.
#[derive(Debug, Deserialize, Validate)]
pub struct EditPostDto {
    #[validate(length(
        min = 1,
        max = 200,
        message = "title must be between 1 and 200 characters."
    ))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty."))]
    pub content: Option<String>,
    pub tags: Option<String>,
    pub links: Option<String>,
}
