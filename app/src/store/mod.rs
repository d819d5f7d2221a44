//! The storage capability behind the repository and the identity service. One
//! trait, two backends: Postgres for real deployments, an in-process map for
//! development and tests. Both interpret the same conditioned operations, so
//! the CRUD core exists exactly once.
//!
//! Infrastructure failures are fatal here; the caller-facing error taxonomy is
//! reserved for expected outcomes.

use async_trait::async_trait;
use std::sync::Arc;

use crate::record::{self, Fields, Filter, Record};
use crate::user;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type Store = Arc<dyn Backend>;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Inserts the user, or returns false when the email is already
    /// registered. Uniqueness is decided inside the store in one step, so two
    /// racing registrations cannot both win.
    async fn insert_user(&self, user: &user::User) -> bool;

    /// Exact, case-sensitive email lookup.
    async fn find_user_by_email(&self, email: &str) -> Option<user::User>;

    async fn find_user(&self, id: user::Id) -> Option<user::User>;

    async fn insert_record(&self, kind: record::Kind, record: &Record);

    /// None both for an id that doesn't exist and for one owned by somebody
    /// else.
    async fn find_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
    ) -> Option<Record>;

    /// Owner-scoped listing, further narrowed by the filter. Insertion order.
    async fn find_records(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        filter: &Filter,
    ) -> Vec<Record>;

    /// Merges the patch into the record's fields in a single operation
    /// conditioned on both id and owner. Returns the updated record, or None
    /// under the same merged not-found rule as [`Backend::find_record`].
    async fn update_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
        patch: &Fields,
    ) -> Option<Record>;

    /// Single conditioned delete. True when a record was removed.
    async fn delete_record(&self, kind: record::Kind, owner_id: user::Id, id: record::Id)
        -> bool;
}
