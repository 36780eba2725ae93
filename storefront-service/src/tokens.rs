use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::user_store::UserRecord;

pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
}

/// Wraps a verified identity into a signed, stateless credential.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    issuer: String,
}

#[derive(Serialize)]
struct TokenClaims<'a> {
    sub: String,
    username: &'a str,
    iss: &'a str,
    iat: i64,
}

impl TokenSigner {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer,
        }
    }

    /// Issues a token asserting `user`'s identity. The payload carries the
    /// stable id and username only; the password digest never leaves the
    /// store layer.
    pub fn issue(&self, user: &UserRecord) -> Result<String> {
        let claims = TokenClaims {
            sub: user.id.to_string(),
            username: &user.user_name,
            iss: &self.issuer,
            iat: Utc::now().timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to sign token")
    }
}
