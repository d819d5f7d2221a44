//! Handles authentication tokens. Authentication is proven by possession of a
//! token; a verified token is traded for a grant, and every store operation is
//! scoped by the grant's user id.

use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::user;

#[derive(Debug, Error)]
#[error("access denied")]
pub struct AccessDenied;

/// This grant represents a compile-time proof that the caller has been
/// authenticated. The user id it carries is the one every repository call is
/// implicitly filtered by.
#[derive(Debug, Clone, Copy)]
pub struct Grant {
    pub user_id: user::Id,
}

/// Key material and policy for the token capability. Tokens are stateless:
/// nothing is persisted on issue, and expiry is enforced on decode.
pub struct TokenKeys {
    pub(crate) encoding: EncodingKey,
    pub(crate) decoding: DecodingKey,
    pub(crate) ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}
