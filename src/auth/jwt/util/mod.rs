use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::{app::util::time, auth::jwt::models::claims::Claims};

use super::config::JWT_EXP;

pub fn sign_jwt(id: &str, secret: &str) -> String {
    let iat = time::current_time_in_secs();
    let exp = iat + JWT_EXP;

    let claims = Claims {
        id: id.to_string(),
        iat,
        exp,
    };

    // FIXME: unsafe unwrap
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .unwrap()
}

pub fn decode_jwt(jwt: String, secret: &str) -> Result<Claims, ErrorKind> {
    let result = decode::<Claims>(
        &jwt,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    );

    match result {
        Ok(data) => Ok(data.claims),
        Err(e) => Err(e.kind().to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_decode_roundtrip() {
        let jwt = sign_jwt("user-1", "secret");
        let claims = decode_jwt(jwt, "secret").unwrap();

        assert_eq!(claims.id, "user-1");
        assert_eq!(claims.exp, claims.iat + JWT_EXP);
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let jwt = sign_jwt("user-1", "secret");

        assert!(decode_jwt(jwt, "other-secret").is_err());
    }

    #[test]
    fn decode_rejects_expired_token() {
        let iat = time::current_time_in_secs() - JWT_EXP - 3600;
        let claims = Claims {
            id: "user-1".to_string(),
            iat,
            exp: iat + JWT_EXP,
        };
        let jwt = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("secret".as_ref()),
        )
        .unwrap();

        assert!(matches!(
            decode_jwt(jwt, "secret"),
            Err(ErrorKind::ExpiredSignature)
        ));
    }
}
