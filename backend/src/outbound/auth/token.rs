//! Signed bearer-token issuer backed by `jsonwebtoken`.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenIssueError, TokenIssuer};

/// Validity window applied when none is configured.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Claims carried by an issued credential: the user id and the expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Generate a random signing secret for development runs without a
/// provisioned secret file.
pub fn generate_ephemeral_secret() -> Vec<u8> {
    use argon2::password_hash::rand_core::{OsRng, RngCore};

    let mut secret = vec![0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// HS256 token issuer with a fixed validity window.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    ttl_minutes: i64,
}

impl JwtTokenIssuer {
    /// Create an issuer signing with the given secret.
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_minutes,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: i32) -> Result<String, TokenIssueError> {
        let expires_at = Utc::now() + Duration::minutes(self.ttl_minutes);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| TokenIssueError::new(err.to_string()))
    }
}
