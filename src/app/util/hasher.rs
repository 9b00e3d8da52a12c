use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::app::models::app_error::AppError;

pub async fn hash(password: String) -> Result<String, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await;

    match result {
        Ok(Ok(hash)) => Ok(hash),
        Ok(Err(e)) => Err(AppError {
            message: e.to_string(),
        }),
        Err(e) => Err(AppError {
            message: e.to_string(),
        }),
    }
}

pub async fn verify(password: String, hash: String) -> Result<bool, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&hash)?;
        Ok::<bool, argon2::password_hash::Error>(
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await;

    match result {
        Ok(Ok(matches)) => Ok(matches),
        Ok(Err(e)) => Err(AppError {
            message: e.to_string(),
        }),
        Err(e) => Err(AppError {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_matches() {
        let hash = hash("hunter22".to_string()).await.unwrap();

        assert!(verify("hunter22".to_string(), hash.clone()).await.unwrap());
        assert!(!verify("hunter23".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn verify_rejects_malformed_hash() {
        assert!(verify("hunter22".to_string(), "not-a-hash".to_string())
            .await
            .is_err());
    }
}
