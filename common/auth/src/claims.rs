use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{AuthError, AuthResult};

/// Application-focused representation of verified token claims.
#[derive(Debug, Clone)]
pub struct Claims {
    pub subject: i64,
    pub username: String,
    pub issuer: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub raw: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    sub: String,
    username: String,
    iss: String,
    #[serde(default)]
    iat: Option<i64>,
}

impl TryFrom<ClaimsRepr> for Claims {
    type Error = AuthError;

    fn try_from(value: ClaimsRepr) -> AuthResult<Self> {
        let subject = value
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidClaim("sub", value.sub.clone()))?;

        let issued_at = match value.iat {
            Some(iat) => Some(
                Utc.timestamp_opt(iat, 0)
                    .single()
                    .ok_or_else(|| AuthError::InvalidClaim("iat", iat.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            subject,
            username: value.username,
            issuer: value.iss,
            issued_at,
            raw: serde_json::Value::Null,
        })
    }
}

impl TryFrom<serde_json::Value> for Claims {
    type Error = AuthError;

    fn try_from(value: serde_json::Value) -> AuthResult<Self> {
        let repr: ClaimsRepr = serde_json::from_value(value.clone())
            .map_err(|err| AuthError::InvalidJson(err.to_string()))?;
        let mut claims = Claims::try_from(repr)?;
        claims.raw = value;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claims_parse_from_payload() {
        let claims = Claims::try_from(json!({
            "sub": "42",
            "username": "mock_u",
            "iss": "storefront-service",
            "iat": 1_700_000_000,
        }))
        .expect("claims");

        assert_eq!(claims.subject, 42);
        assert_eq!(claims.username, "mock_u");
        assert_eq!(claims.issuer, "storefront-service");
        assert_eq!(
            claims.issued_at.map(|value| value.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn claims_reject_non_numeric_subject() {
        let err = Claims::try_from(json!({
            "sub": "not-a-number",
            "username": "mock_u",
            "iss": "storefront-service",
        }))
        .expect_err("should reject");
        assert!(matches!(err, AuthError::InvalidClaim("sub", _)));
    }

    #[test]
    fn claims_reject_missing_username() {
        let err = Claims::try_from(json!({
            "sub": "1",
            "iss": "storefront-service",
        }))
        .expect_err("should reject");
        assert!(matches!(err, AuthError::InvalidJson(_)));
    }
}
