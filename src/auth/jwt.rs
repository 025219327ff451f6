use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserType;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub user_type: UserType,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, user_type: UserType, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            user_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn encode_then_decode_keeps_subject_and_type() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, UserType::Provider, Duration::minutes(5));
        let token = encode_token(&claims, SECRET).expect("encode");

        let decoded = decode_token(&token, SECRET).expect("decode");
        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.user_type, UserType::Provider);
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn decode_rejects_other_secret() {
        let claims = Claims::new(Uuid::new_v4(), UserType::Both, Duration::minutes(5));
        let token = encode_token(&claims, SECRET).unwrap();
        assert!(decode_token(&token, "some-other-secret").is_err());
    }

    #[test]
    fn decode_rejects_expired_token() {
        // Past the default 60s leeway.
        let claims = Claims::new(Uuid::new_v4(), UserType::Requester, Duration::minutes(-10));
        let token = encode_token(&claims, SECRET).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }
}
