use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    headers::{authorization::Bearer, Authorization},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json, TypedHeader,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    app::{
        models::{api_error::ApiError, json_from_request::JsonFromRequest},
        util::multipart::multipart::get_form_properties,
    },
    auth::jwt::models::claims::Claims,
    AppState,
};

use super::{
    dtos::{
        create_post_dto::CreatePostDto, edit_post_dto::EditPostDto,
        get_posts_filter_dto::GetPostsFilterDto,
    },
    models::{post::Post, post_response::PostResponse, posts_page::PostsPage},
    service,
};

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => {
            let mut form = match get_form_properties(multipart).await {
                Ok(form) => form,
                Err(e) => return Err(e),
            };

            let dto = CreatePostDto::from_form_fields(&mut form.fields)?;

            if let Err(e) = dto.validate() {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: e.to_string(),
                });
            }

            match service::create_post(&dto, form.files, &claims, &state.storage_dir, &state.pool)
                .await
            {
                Ok(post) => Ok((
                    StatusCode::CREATED,
                    Json(PostResponse {
                        message: "Post created successfully.".to_string(),
                        post,
                    }),
                )),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

pub async fn get_posts(
    State(state): State<Arc<AppState>>,
    Query(dto): Query<GetPostsFilterDto>,
) -> Result<Json<PostsPage>, ApiError> {
    match service::get_posts(&dto, &state.pool).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => Err(e),
    }
}

pub async fn get_user_posts(
    State(state): State<Arc<AppState>>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Vec<Post>>, ApiError> {
    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => match service::get_posts_by_user(&claims, &state.pool).await {
            Ok(posts) => Ok(Json(posts)),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    }
}

pub async fn get_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    match service::get_post_by_id(&id, &state.pool).await {
        Ok(post) => Ok(Json(post)),
        Err(e) => Err(e),
    }
}

pub async fn edit_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
    JsonFromRequest(dto): JsonFromRequest<EditPostDto>,
) -> Result<Json<PostResponse>, ApiError> {
    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => {
            if let Err(e) = dto.validate() {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: e.to_string(),
                });
            }

            match service::edit_post_by_id(&id, &dto, &claims, &state.pool).await {
                Ok(post) => Ok(Json(PostResponse {
                    message: "Post updated successfully.".to_string(),
                    post,
                })),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_post_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, ApiError> {
    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => {
            match service::delete_post_by_id(&id, &claims, &state.storage_dir, &state.pool).await {
                Ok(_) => Ok(Json(json!({ "message": "Post deleted successfully." }))),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

pub async fn download_post_file(
    State(state): State<Arc<AppState>>,
    Path((post_id, file_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    match service::download_post_file(&post_id, &file_id, &state.storage_dir, &state.pool).await {
        Ok((attachment, data)) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                attachment.original_name.replace('"', "")
            );

            Ok((
                [
                    (header::CONTENT_TYPE, attachment.mimetype),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                data,
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}
