use crate::{auth, store::Store};

mod entities;

pub use entities::{Email, Id, User};

pub async fn get(grant: &auth::Grant, store: &Store) -> Option<User> {
    store.find_user(grant.user_id).await
}
