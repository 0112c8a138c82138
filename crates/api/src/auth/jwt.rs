//! Bearer tokens for the rating endpoints.
//!
//! The account service signs tokens with a secret shared with this server.
//! Here they are only checked; [`generate_access_token`] is kept for the
//! test suites and for minting tokens by hand against a dev database.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rentals_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity carried by a token: who is calling and in which role.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Caller's user id.
    pub sub: DbId,
    /// One of the marketplace roles, e.g. `client` or `car_owner`.
    pub role: String,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Issue time, seconds since the epoch.
    pub iat: i64,
    /// Random per-token id.
    pub jti: String,
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared with the account service.
    pub secret: String,
    /// Lifetime of minted tokens, in minutes.
    pub access_token_expiry_mins: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY_MINS`
    /// (optional, 15 when unset).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or a non-numeric lifetime. Called once
    /// during startup.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Mint a token for `user_id` acting as `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, then hand back the [`Claims`].
///
/// Role names are not checked here; unknown roles simply match no gate.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
