use std::path::Path;

use bytes::Bytes;
use sqlx::PgPool;

use crate::{
    app::{
        errors::DefaultApiError,
        models::api_error::ApiError,
        util::multipart::models::file_properties::FileProperties,
        util::sqlx::{get_code_from_db_err, SqlStateCodes},
        util::time,
    },
    auth::jwt::models::claims::Claims,
    uploads::{self, enums::upload_category::UploadCategory, errors::UploadsApiError},
};

use super::{
    dtos::{
        create_post_dto::CreatePostDto, edit_post_dto::EditPostDto,
        get_posts_filter_dto::GetPostsFilterDto,
    },
    errors::PostsApiError,
    models::{
        post::Post,
        post_attachment::PostAttachment,
        post_link::PostLink,
        posts_page::{Pagination, PostsPage},
    },
};

const POST_WITH_AUTHOR_COLUMNS: &str = "
    posts.*,
    users.username as user_username,
    users.email as user_email,
    users.avatar_url as user_avatar_url
";

/// Creates a post for the authenticated caller. Structured fields are decoded
/// and every file validated before anything is persisted; files are then
/// staged to disk ahead of the row insert, so a failed insert can orphan
/// files but never the reverse.
pub async fn create_post(
    dto: &CreatePostDto,
    files: Vec<FileProperties>,
    claims: &Claims,
    storage_dir: &Path,
    pool: &PgPool,
) -> Result<Post, ApiError> {
    let tags = parse_tags(&dto.tags)?.unwrap_or_default();
    let links = parse_links(&dto.links)?.unwrap_or_default();

    let mut image_files = Vec::new();
    let mut document_files = Vec::new();

    for file in files {
        match UploadCategory::from_field_name(&file.field_name) {
            Some(UploadCategory::Images) => image_files.push(file),
            Some(UploadCategory::Documents) => document_files.push(file),
            None => return Err(UploadsApiError::UnexpectedFileField.value()),
        }
    }

    // both batches must pass policy before either touches disk
    uploads::service::validate_files(&image_files, UploadCategory::Images)?;
    uploads::service::validate_files(&document_files, UploadCategory::Documents)?;

    let images: Vec<PostAttachment> =
        uploads::service::store_files(image_files, UploadCategory::Images, storage_dir)
            .await?
            .into_iter()
            .map(PostAttachment::from_upload)
            .collect();

    let documents: Vec<PostAttachment> =
        uploads::service::store_files(document_files, UploadCategory::Documents, storage_dir)
            .await?
            .into_iter()
            .map(PostAttachment::from_upload)
            .collect();

    let post = Post::new(claims, dto, tags, links, images, documents);

    let sqlx_result = sqlx::query(
        "
        INSERT INTO posts (
            id, user_id, title, content, images, documents, links, tags,
            published, updated_at, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ",
    )
    .bind(&post.id)
    .bind(&post.user_id)
    .bind(&post.title)
    .bind(&post.content)
    .bind(&post.images)
    .bind(&post.documents)
    .bind(&post.links)
    .bind(&post.tags)
    .bind(post.published)
    .bind(post.updated_at)
    .bind(post.created_at)
    .execute(pool)
    .await;

    match sqlx_result {
        Ok(_) => get_post_by_id(&post.id, pool).await,
        Err(e) => {
            let Some(db_err) = e.as_database_error()
            else {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            };

            let Some(code) = get_code_from_db_err(db_err)
            else {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            };

            match code.as_str() {
                SqlStateCodes::UNIQUE_VIOLATION => Err(ApiError {
                    code: axum::http::StatusCode::CONFLICT,
                    message: "Post already exists.".to_string(),
                }),
                // a valid token whose user has since been deleted
                SqlStateCodes::FOREIGN_KEY_VIOLATION => Err(ApiError {
                    code: axum::http::StatusCode::BAD_REQUEST,
                    message: "Author does not exist.".to_string(),
                }),
                _ => {
                    tracing::error!(%e);
                    Err(DefaultApiError::InternalServerError.value())
                }
            }
        }
    }
}

/// Published feed, newest first, with pagination metadata.
pub async fn get_posts(dto: &GetPostsFilterDto, pool: &PgPool) -> Result<PostsPage, ApiError> {
    let page = dto.page();
    let limit = dto.limit();

    let sqlx_result = sqlx::query_as::<_, Post>(&[
        "SELECT ",
        POST_WITH_AUTHOR_COLUMNS,
        "
        FROM posts
        LEFT JOIN users ON posts.user_id = users.id
        WHERE posts.published = TRUE
        ORDER BY posts.created_at DESC
        LIMIT $1 OFFSET $2
        ",
    ]
    .concat())
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(pool)
    .await;

    let posts = match sqlx_result {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!(%e);
            return Err(DefaultApiError::InternalServerError.value());
        }
    };

    let count_result =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE published = TRUE")
            .fetch_one(pool)
            .await;

    match count_result {
        Ok(total) => Ok(PostsPage {
            posts,
            pagination: Pagination::new(page, limit, total),
        }),
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

/// Every post by one author, newest first, unpaginated.
pub async fn get_posts_by_user(claims: &Claims, pool: &PgPool) -> Result<Vec<Post>, ApiError> {
    let sqlx_result = sqlx::query_as::<_, Post>(&[
        "SELECT ",
        POST_WITH_AUTHOR_COLUMNS,
        "
        FROM posts
        LEFT JOIN users ON posts.user_id = users.id
        WHERE posts.user_id = $1
        ORDER BY posts.created_at DESC
        ",
    ]
    .concat())
    .bind(&claims.id)
    .fetch_all(pool)
    .await;

    match sqlx_result {
        Ok(posts) => Ok(posts),
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

pub async fn get_post_by_id(id: &str, pool: &PgPool) -> Result<Post, ApiError> {
    let sqlx_result = sqlx::query_as::<_, Post>(&[
        "SELECT ",
        POST_WITH_AUTHOR_COLUMNS,
        "
        FROM posts
        LEFT JOIN users ON posts.user_id = users.id
        WHERE posts.id = $1
        ",
    ]
    .concat())
    .bind(id)
    .fetch_optional(pool)
    .await;

    match sqlx_result {
        Ok(post) => match post {
            Some(post) => Ok(post),
            None => Err(PostsApiError::PostNotFound.value()),
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

/// Owner-only partial update. Existence is checked before ownership, as two
/// distinct steps; absent fields keep their prior values.
pub async fn edit_post_by_id(
    id: &str,
    dto: &EditPostDto,
    claims: &Claims,
    pool: &PgPool,
) -> Result<Post, ApiError> {
    let post = match get_post_by_id(id, pool).await {
        Ok(post) => post,
        Err(e) => return Err(e),
    };

    if post.user_id != claims.id {
        return Err(PostsApiError::NotPostOwner.value());
    }

    let tags = match parse_tags(&dto.tags)? {
        Some(tags) => sqlx::types::Json(tags),
        None => post.tags,
    };
    let links = match parse_links(&dto.links)? {
        Some(links) => sqlx::types::Json(links),
        None => post.links,
    };
    let title = match &dto.title {
        Some(title) => title.to_string(),
        None => post.title,
    };
    let content = match &dto.content {
        Some(content) => content.to_string(),
        None => post.content,
    };

    let updated_at = time::current_time_in_secs() as i64;

    let sqlx_result = sqlx::query(
        "
        UPDATE posts
        SET title = $1, content = $2, tags = $3, links = $4, updated_at = $5
        WHERE id = $6
        ",
    )
    .bind(&title)
    .bind(&content)
    .bind(&tags)
    .bind(&links)
    .bind(updated_at)
    .bind(id)
    .execute(pool)
    .await;

    match sqlx_result {
        Ok(result) => match result.rows_affected() > 0 {
            true => get_post_by_id(id, pool).await,
            false => Err(PostsApiError::PostNotFound.value()),
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

/// Owner-only deletion. Backing files are released first, best-effort, so a
/// crash mid-operation leaves a discoverable orphaned record rather than
/// unreferenced files.
pub async fn delete_post_by_id(
    id: &str,
    claims: &Claims,
    storage_dir: &Path,
    pool: &PgPool,
) -> Result<(), ApiError> {
    let post = match get_post_by_id(id, pool).await {
        Ok(post) => post,
        Err(e) => return Err(e),
    };

    if post.user_id != claims.id {
        return Err(PostsApiError::NotPostOwner.value());
    }

    for attachment in post.images.iter().chain(post.documents.iter()) {
        uploads::service::delete_file(storage_dir, &attachment.path).await;
    }

    let sqlx_result = sqlx::query(
        "
        DELETE FROM posts
        WHERE id = $1
        ",
    )
    .bind(id)
    .execute(pool)
    .await;

    match sqlx_result {
        Ok(result) => match result.rows_affected() > 0 {
            true => Ok(()),
            false => Err(PostsApiError::PostNotFound.value()),
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

/// Resolves an attachment id to its bytes and display name. A missing post,
/// an unknown attachment id and a file absent from disk are three distinct
/// conditions behind the same not-found signal.
pub async fn download_post_file(
    post_id: &str,
    file_id: &str,
    storage_dir: &Path,
    pool: &PgPool,
) -> Result<(PostAttachment, Bytes), ApiError> {
    let post = match get_post_by_id(post_id, pool).await {
        Ok(post) => post,
        Err(e) => return Err(e),
    };

    let Some(attachment) = post.find_attachment(file_id)
    else {
        return Err(UploadsApiError::FileNotFound.value());
    };

    match uploads::service::read_file(storage_dir, &attachment.path).await {
        Ok(data) => Ok((attachment.clone(), data)),
        Err(e) => Err(e),
    }
}

fn parse_tags(raw: &Option<String>) -> Result<Option<Vec<String>>, ApiError> {
    let Some(text) = raw
    else {
        return Ok(None);
    };

    match serde_json::from_str::<Vec<String>>(text) {
        Ok(tags) => Ok(Some(
            tags.iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        )),
        Err(_) => Err(PostsApiError::MalformedTags.value()),
    }
}

fn parse_links(raw: &Option<String>) -> Result<Option<Vec<PostLink>>, ApiError> {
    let Some(text) = raw
    else {
        return Ok(None);
    };

    match serde_json::from_str::<Vec<PostLink>>(text) {
        Ok(links) => Ok(Some(links)),
        Err(_) => Err(PostsApiError::MalformedLinks.value()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        let raw = Some("[\" rust \", \"axum\", \"  \"]".to_string());

        let tags = parse_tags(&raw).unwrap().unwrap();
        assert_eq!(tags, vec!["rust".to_string(), "axum".to_string()]);
    }

    #[test]
    fn parse_tags_absent_means_no_change() {
        assert!(parse_tags(&None).unwrap().is_none());
    }

    #[test]
    fn parse_tags_rejects_malformed_json() {
        let raw = Some("[\"unterminated".to_string());

        let err = parse_tags(&raw).unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_links_decodes_partial_records() {
        let raw = Some("[{\"title\":\"Docs\",\"url\":\"https://example.com\"}]".to_string());

        let links = parse_links(&raw).unwrap().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title.as_deref(), Some("Docs"));
        assert!(links[0].description.is_none());
    }

    #[test]
    fn parse_links_rejects_non_array_json() {
        let raw = Some("{\"url\":\"https://example.com\"}".to_string());

        assert!(parse_links(&raw).is_err());
    }
}
