use axum::http::StatusCode;

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError, util::hasher},
    users::{self, models::user_summary::UserSummary},
    AppState,
};

use super::{
    dtos::{login_dto::LoginDto, register_dto::RegisterDto},
    errors::AuthApiError,
    jwt::util::sign_jwt,
    models::access_info::AccessInfo,
};

pub async fn register(dto: &RegisterDto, state: &AppState) -> Result<AccessInfo, ApiError> {
    let Ok(hash) = hasher::hash(dto.password.to_string()).await
    else {
        return Err(DefaultApiError::InternalServerError.value());
    };

    match users::service::create_user(dto, hash, &state.pool).await {
        Ok(user) => Ok(AccessInfo {
            token: sign_jwt(&user.id, &state.envy.jwt_secret),
            user: UserSummary::from_user(&user),
        }),
        Err(e) => Err(e),
    }
}

pub async fn login(dto: &LoginDto, state: &AppState) -> Result<AccessInfo, ApiError> {
    match users::service::get_user_by_email(&dto.email, &state.pool).await {
        Ok(user) => {
            let Ok(matches) =
                hasher::verify(dto.password.to_string(), user.password_hash.to_string()).await
            else {
                return Err(DefaultApiError::InternalServerError.value());
            };

            if !matches {
                return Err(AuthApiError::InvalidCredentials.value());
            }

            Ok(AccessInfo {
                token: sign_jwt(&user.id, &state.envy.jwt_secret),
                user: UserSummary::from_user(&user),
            })
        }
        // an unknown email reads the same as a wrong password
        Err(e) => match e.code {
            StatusCode::NOT_FOUND => Err(AuthApiError::InvalidCredentials.value()),
            _ => Err(e),
        },
    }
}
