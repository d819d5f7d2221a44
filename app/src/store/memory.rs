//! The in-process backend. Collections are plain vectors behind one mutex,
//! which keeps insertion order and makes every operation atomic. Nothing
//! survives a restart; real deployments use [`super::PgStore`].

use async_trait::async_trait;
use std::sync::Mutex;

use super::Backend;
use crate::record::{self, Fields, Filter, Record};
use crate::user;

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

#[derive(Default)]
struct Collections {
    users: Vec<user::User>,
    reminders: Vec<Record>,
    expenses: Vec<Record>,
    categories: Vec<Record>,
}

impl Collections {
    fn records(&mut self, kind: record::Kind) -> &mut Vec<Record> {
        match kind {
            record::Kind::Reminder => &mut self.reminders,
            record::Kind::Expense => &mut self.expenses,
            record::Kind::Category => &mut self.categories,
        }
    }
}

#[async_trait]
impl Backend for MemoryStore {
    async fn insert_user(&self, user: &user::User) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|existing| existing.email.0 == user.email.0) {
            return false;
        }
        inner.users.push(user.clone());
        true
    }

    async fn find_user_by_email(&self, email: &str) -> Option<user::User> {
        let inner = self.inner.lock().unwrap();
        inner.users.iter().find(|user| user.email.0 == email).cloned()
    }

    async fn find_user(&self, id: user::Id) -> Option<user::User> {
        let inner = self.inner.lock().unwrap();
        inner.users.iter().find(|user| user.id == id).cloned()
    }

    async fn insert_record(&self, kind: record::Kind, record: &Record) {
        let mut inner = self.inner.lock().unwrap();
        inner.records(kind).push(record.clone());
    }

    async fn find_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
    ) -> Option<Record> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .records(kind)
            .iter()
            .find(|record| record.id == id && record.owner_id == owner_id)
            .cloned()
    }

    async fn find_records(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        filter: &Filter,
    ) -> Vec<Record> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .records(kind)
            .iter()
            .filter(|record| record.owner_id == owner_id && filter.matches(record))
            .cloned()
            .collect()
    }

    async fn update_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
        patch: &Fields,
    ) -> Option<Record> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .records(kind)
            .iter_mut()
            .find(|record| record.id == id && record.owner_id == owner_id)?;
        for (key, value) in patch {
            record.fields.insert(key.clone(), value.clone());
        }
        Some(record.clone())
    }

    async fn delete_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
    ) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let records = inner.records(kind);
        let before = records.len();
        records.retain(|record| !(record.id == id && record.owner_id == owner_id));
        records.len() < before
    }
}
