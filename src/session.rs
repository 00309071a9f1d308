//! HMAC-signed session tokens
//!
//! Token format: `base64url(claims json).base64url(hmac-sha256)`, signed
//! with the configured session secret. Claims carry the user id, email and
//! an absolute expiry; tokens live for two days.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{PlannerError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Session lifetime in days
pub const SESSION_TTL_DAYS: i64 = 2;

/// Claims carried inside a session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub id: i32,
    pub email: String,
    /// Expiry as a Unix timestamp (seconds)
    pub exp: i64,
}

/// Issue a token for a freshly authenticated user
pub fn issue(secret: &str, id: i32, email: &str) -> Result<String> {
    let claims = SessionClaims {
        id,
        email: email.to_string(),
        exp: (Utc::now() + Duration::days(SESSION_TTL_DAYS)).timestamp(),
    };
    sign(secret, &claims)
}

/// Sign claims into a token string
pub fn sign(secret: &str, claims: &SessionClaims) -> Result<String> {
    let payload = serde_json::to_vec(claims)
        .map_err(|e| PlannerError::Internal {
            source: anyhow::anyhow!("Failed to encode session claims: {e}"),
        })?;
    let encoded = BASE64_URL.encode(&payload);

    let mut mac = mac_for(secret)?;
    mac.update(encoded.as_bytes());
    let signature = BASE64_URL.encode(mac.finalize().into_bytes());

    Ok(format!("{encoded}.{signature}"))
}

/// Verify a token and return its claims.
/// Tampered, malformed and expired tokens all come back `Unauthorized`.
pub fn verify(secret: &str, token: &str) -> Result<SessionClaims> {
    let (encoded, signature) = token
        .split_once('.')
        .ok_or_else(|| PlannerError::unauthorized("Malformed session token"))?;

    let mut mac = mac_for(secret)?;
    mac.update(encoded.as_bytes());
    let expected = BASE64_URL
        .decode(signature)
        .map_err(|_| PlannerError::unauthorized("Malformed session token"))?;
    mac.verify_slice(&expected)
        .map_err(|_| PlannerError::unauthorized("Invalid session token"))?;

    let payload = BASE64_URL
        .decode(encoded)
        .map_err(|_| PlannerError::unauthorized("Malformed session token"))?;
    let claims: SessionClaims = serde_json::from_slice(&payload)
        .map_err(|_| PlannerError::unauthorized("Malformed session token"))?;

    if claims.exp <= Utc::now().timestamp() {
        return Err(PlannerError::unauthorized("Session expired"));
    }

    Ok(claims)
}

fn mac_for(secret: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| PlannerError::Internal {
        source: anyhow::anyhow!("Invalid session secret: {e}"),
    })
}
