use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::password;

#[derive(Debug, Clone)]
pub struct Email(pub String);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(pub Uuid);

#[derive(Debug, Clone)]
pub struct User {
    pub id: Id,
    pub email: Email,
    pub digest: password::Digest,
    pub created: DateTime<Utc>,
}

impl User {
    pub(crate) fn create(email: Email, digest: password::Digest) -> Self {
        Self {
            id: Id(Uuid::new_v4()),
            email,
            digest,
            created: Utc::now(),
        }
    }
}
