use anyhow::{bail, Context, Result};
use std::env;

pub const DEFAULT_HASH_COST: u32 = 10;

/// Process-wide configuration, loaded once at startup and passed into each
/// component's constructor. Never read from the environment after this.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Server-side secret appended to every password before hashing,
    /// distinct from the per-hash salt the bcrypt primitive generates.
    pub pepper: String,
    pub hash_cost: u32,
    pub token_secret: String,
    pub token_issuer: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        let pepper = env::var("PASSWORD_PEPPER").context("PASSWORD_PEPPER must be set")?;
        let hash_cost = match env::var("HASH_COST") {
            Ok(value) => parse_hash_cost(&value)?,
            Err(_) => DEFAULT_HASH_COST,
        };

        let token_secret = env::var("TOKEN_SECRET").context("TOKEN_SECRET must be set")?;
        let token_issuer =
            env::var("TOKEN_ISSUER").unwrap_or_else(|_| "storefront-service".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            pepper,
            hash_cost,
            token_secret,
            token_issuer,
        })
    }
}

fn parse_hash_cost(value: &str) -> Result<u32> {
    let cost: u32 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid HASH_COST '{value}'"))?;
    // bcrypt only accepts work factors in this range.
    if !(4..=31).contains(&cost) {
        bail!("HASH_COST must be between 4 and 31, got {cost}");
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hash_cost_accepts_valid_range() {
        assert_eq!(parse_hash_cost("10").unwrap(), 10);
        assert_eq!(parse_hash_cost(" 4 ").unwrap(), 4);
        assert_eq!(parse_hash_cost("31").unwrap(), 31);
    }

    #[test]
    fn parse_hash_cost_rejects_out_of_range() {
        assert!(parse_hash_cost("3").is_err());
        assert!(parse_hash_cost("32").is_err());
        assert!(parse_hash_cost("ten").is_err());
    }
}
