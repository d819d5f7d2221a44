use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::user;

mod entities;

pub use entities::{AccessDenied, Grant, TokenKeys};

use entities::Claims;

/// Issues a token whose subject is the given user. Issuance has no side
/// effects; the token is self-contained.
pub fn issue(keys: &TokenKeys, user_id: user::Id) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.0,
        iat: now.timestamp(),
        exp: (now + keys.ttl).timestamp(),
    };
    encode(&Header::default(), &claims, &keys.encoding).unwrap()
}

/// Trades a token for a grant. Fails on garbage, on a bad signature, and on an
/// expired token, without distinguishing the three.
pub fn authenticate(keys: &TokenKeys, token: &str) -> Result<Grant, AccessDenied> {
    let data = decode::<Claims>(token, &keys.decoding, &Validation::new(Algorithm::HS256))
        .map_err(|_| AccessDenied)?;
    Ok(Grant {
        user_id: user::Id(data.claims.sub),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn keys() -> TokenKeys {
        TokenKeys::new("test-secret", 3600)
    }

    #[test]
    fn issued_token_authenticates_to_the_same_user() {
        let user_id = user::Id(Uuid::new_v4());
        let token = issue(&keys(), user_id);
        let grant = authenticate(&keys(), &token).unwrap();
        assert_eq!(grant.user_id, user_id);
    }

    #[test]
    fn garbage_token_is_denied() {
        assert!(authenticate(&keys(), "not-a-token").is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_denied() {
        let token = issue(&TokenKeys::new("other-secret", 3600), user::Id(Uuid::new_v4()));
        assert!(authenticate(&keys(), &token).is_err());
    }

    #[test]
    fn expired_token_is_denied() {
        let token = issue(&TokenKeys::new("test-secret", -3600), user::Id(Uuid::new_v4()));
        assert!(authenticate(&keys(), &token).is_err());
    }
}
