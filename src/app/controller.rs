use axum::{
    http::{StatusCode, Uri},
    Json,
};
use serde_json::{json, Value};

use crate::app::{models::api_error::ApiError, util::time};

pub async fn get_root() -> Json<Value> {
    Json(json!({
        "message": "Server is running.",
        "timestamp": time::current_time_in_secs(),
    }))
}

pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError {
        code: StatusCode::NOT_FOUND,
        message: format!("Route {} not found.", uri),
    }
}
