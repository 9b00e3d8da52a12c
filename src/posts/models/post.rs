use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    app::util::time, auth::jwt::models::claims::Claims,
    posts::dtos::create_post_dto::CreatePostDto,
};

use super::{post_attachment::PostAttachment, post_link::PostLink};

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)] // this is because the value does not exist on the posts table itself
    pub user_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)] // this is because the value does not exist on the posts table itself
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)] // this is because the value does not exist on the posts table itself
    pub user_avatar_url: Option<String>,
    pub title: String,
    pub content: String,
    pub images: sqlx::types::Json<Vec<PostAttachment>>,
    pub documents: sqlx::types::Json<Vec<PostAttachment>>,
    pub links: sqlx::types::Json<Vec<PostLink>>,
    pub tags: sqlx::types::Json<Vec<String>>,
    pub published: bool,
    pub updated_at: i64,
    pub created_at: i64,
}

impl Post {
    pub fn new(
        claims: &Claims,
        dto: &CreatePostDto,
        tags: Vec<String>,
        links: Vec<PostLink>,
        images: Vec<PostAttachment>,
        documents: Vec<PostAttachment>,
    ) -> Self {
        let current_time = time::current_time_in_secs() as i64;

        Self {
            id: Uuid::new_v4().to_string(),
            user_id: claims.id.to_string(),
            user_username: None,
            user_email: None,
            user_avatar_url: None,
            title: dto.title.to_string(),
            content: dto.content.to_string(),
            images: sqlx::types::Json(images),
            documents: sqlx::types::Json(documents),
            links: sqlx::types::Json(links),
            tags: sqlx::types::Json(tags),
            published: true,
            updated_at: current_time,
            created_at: current_time,
        }
    }

    /// Looks an attachment up by id across both lists; downloads carry no
    /// category hint.
    pub fn find_attachment(&self, file_id: &str) -> Option<&PostAttachment> {
        self.images
            .iter()
            .chain(self.documents.iter())
            .find(|file| file.id == file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(id: &str) -> Claims {
        Claims {
            id: id.to_string(),
            iat: 0,
            exp: 0,
        }
    }

    fn attachment(id: &str, path: &str) -> PostAttachment {
        PostAttachment {
            id: id.to_string(),
            filename: "f".to_string(),
            original_name: "f".to_string(),
            path: path.to_string(),
            mimetype: "image/png".to_string(),
            size: 1,
        }
    }

    fn dto() -> CreatePostDto {
        CreatePostDto {
            title: "First post".to_string(),
            content: "Hello.".to_string(),
            tags: None,
            links: None,
        }
    }

    #[test]
    fn new_post_binds_author_to_claims() {
        let post = Post::new(&claims("user-7"), &dto(), vec![], vec![], vec![], vec![]);

        assert_eq!(post.user_id, "user-7");
        assert!(post.published);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn find_attachment_searches_both_lists() {
        let post = Post::new(
            &claims("user-7"),
            &dto(),
            vec![],
            vec![],
            vec![attachment("img-1", "uploads/images/a.png")],
            vec![attachment("doc-1", "uploads/documents/b.pdf")],
        );

        assert!(post.find_attachment("img-1").is_some());
        assert_eq!(
            post.find_attachment("doc-1").unwrap().path,
            "uploads/documents/b.pdf"
        );
        assert!(post.find_attachment("missing").is_none());
    }
}
