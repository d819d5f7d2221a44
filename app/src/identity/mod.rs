//! Registration and login. Login trades credentials for a stateless token;
//! nothing about a session is stored server-side.

use thiserror::Error;

use crate::{auth, password, store::Store, user};

#[derive(Debug, Error)]
pub enum Error {
    #[error("email is already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
}

pub async fn register(store: &Store, email: user::Email, plaintext: &str) -> Result<user::Id, Error> {
    let user = user::User::create(email, password::hash(plaintext));
    if store.insert_user(&user).await {
        Ok(user.id)
    } else {
        Err(Error::EmailTaken)
    }
}

/// An unknown email and a wrong password produce the same error, so the login
/// response can't be used to probe which addresses are registered.
pub async fn login(
    store: &Store,
    keys: &auth::TokenKeys,
    email: &str,
    plaintext: &str,
) -> Result<String, Error> {
    match store.find_user_by_email(email).await {
        Some(user) if password::verify(plaintext, &user.digest) => Ok(auth::issue(keys, user.id)),
        _ => Err(Error::InvalidCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn store() -> Store {
        Arc::new(MemoryStore::default())
    }

    fn keys() -> auth::TokenKeys {
        auth::TokenKeys::new("test-secret", 3600)
    }

    #[tokio::test]
    async fn register_rejects_a_duplicate_email_regardless_of_password() {
        let store = store();
        register(&store, user::Email("a@example.net".to_owned()), "first")
            .await
            .unwrap();
        let result = register(&store, user::Email("a@example.net".to_owned()), "second").await;
        assert!(matches!(result, Err(Error::EmailTaken)));
    }

    #[tokio::test]
    async fn email_matching_is_case_sensitive() {
        let store = store();
        register(&store, user::Email("a@example.net".to_owned()), "pw")
            .await
            .unwrap();
        // An exact-match policy means a differently-cased address is a
        // different account.
        register(&store, user::Email("A@example.net".to_owned()), "pw")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn login_returns_a_token_bound_to_the_registered_user() {
        let store = store();
        let keys = keys();
        let user_id = register(&store, user::Email("a@example.net".to_owned()), "pw")
            .await
            .unwrap();
        let token = login(&store, &keys, "a@example.net", "pw").await.unwrap();
        let grant = auth::authenticate(&keys, &token).unwrap();
        assert_eq!(grant.user_id, user_id);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let store = store();
        let keys = keys();
        register(&store, user::Email("a@example.net".to_owned()), "pw")
            .await
            .unwrap();

        let unknown = login(&store, &keys, "b@example.net", "pw").await;
        let wrong = login(&store, &keys, "a@example.net", "nope").await;
        assert!(matches!(unknown, Err(Error::InvalidCredentials)));
        assert!(matches!(wrong, Err(Error::InvalidCredentials)));
    }

    #[tokio::test]
    async fn the_stored_digest_is_not_the_plaintext() {
        let store = store();
        register(&store, user::Email("a@example.net".to_owned()), "pw")
            .await
            .unwrap();
        let user = store.find_user_by_email("a@example.net").await.unwrap();
        assert_ne!(user.digest.0, "pw");
    }
}
