use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{auth, user};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Id(pub Uuid);

/// The open attribute mapping of a record. Everything the client sends lives
/// here, minus the reserved keys the server stamps itself.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// The record kinds the repository is parameterized over. Each kind maps to
/// one collection in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Reminder,
    Expense,
    Category,
}

impl Kind {
    pub fn collection(self) -> &'static str {
        match self {
            Kind::Reminder => "reminders",
            Kind::Expense => "expenses",
            Kind::Category => "categories",
        }
    }

    /// Only expenses carry a server-stamped creation time.
    pub(crate) fn timestamped(self) -> bool {
        matches!(self, Kind::Expense)
    }
}

/// A record owned by exactly one user. Ownership is stamped at creation and
/// never transferred.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: Id,
    pub owner_id: user::Id,
    pub fields: Fields,
    pub created: Option<DateTime<Utc>>,
}

impl Record {
    pub(crate) fn create(grant: &auth::Grant, kind: Kind, fields: Fields) -> Self {
        Self {
            id: Id(Uuid::new_v4()),
            owner_id: grant.user_id,
            fields,
            created: kind.timestamped().then(Utc::now),
        }
    }
}
