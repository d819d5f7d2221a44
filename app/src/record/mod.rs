//! The ownership-scoped record repository. Every operation takes a grant and
//! injects the grant's user id into the store call, so a caller can never see
//! or touch a record that isn't theirs. A record that exists under another
//! owner and a record that doesn't exist at all are indistinguishable here.

use crate::{auth, store::Store};

mod entities;
pub mod filter;

pub use entities::{Fields, Id, Kind, Record};
pub use filter::Filter;

/// Keys the server stamps itself. Client-supplied values for these are
/// discarded on create and on update.
const RESERVED: [&str; 3] = ["id", "owner_id", "created_at"];

pub async fn create(grant: &auth::Grant, store: &Store, kind: Kind, mut fields: Fields) -> Record {
    strip_reserved(&mut fields);
    let record = Record::create(grant, kind, fields);
    store.insert_record(kind, &record).await;
    record
}

pub async fn get(grant: &auth::Grant, store: &Store, kind: Kind, id: Id) -> Option<Record> {
    store.find_record(kind, grant.user_id, id).await
}

/// Merges the patch into the record's fields: patch keys overwrite, keys the
/// patch doesn't mention are retained. The merge is a single conditioned store
/// operation, so there is no gap between the ownership check and the write.
pub async fn update(
    grant: &auth::Grant,
    store: &Store,
    kind: Kind,
    id: Id,
    mut patch: Fields,
) -> Option<Record> {
    strip_reserved(&mut patch);
    store.update_record(kind, grant.user_id, id, &patch).await
}

/// Returns false when there was nothing owned by the caller to delete, which
/// makes a repeated delete of the same id fail.
pub async fn delete(grant: &auth::Grant, store: &Store, kind: Kind, id: Id) -> bool {
    store.delete_record(kind, grant.user_id, id).await
}

pub async fn list(grant: &auth::Grant, store: &Store, kind: Kind, filter: &Filter) -> Vec<Record> {
    store.find_records(kind, grant.user_id, filter).await
}

fn strip_reserved(fields: &mut Fields) {
    for key in RESERVED {
        fields.remove(key);
    }
}
