//! The Postgres backend. Record fields live in a JSONB column; the patch merge
//! and the conditioned delete are single statements, so the ownership check
//! and the mutation cannot be separated by a concurrent writer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use const_format::formatcp;
use serde_json::Value;
use uuid::Uuid;

use super::Backend;
use crate::database::Database;
use crate::password;
use crate::record::{self, Fields, Filter, Record};
use crate::user;

pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

const USER_COLUMNS: &str = "id, email, password, created";
const RECORD_COLUMNS: &str = "id, owner_id, fields, created";

#[async_trait]
impl Backend for PgStore {
    async fn insert_user(&self, user: &user::User) -> bool {
        let result = sqlx::query(formatcp!(
            "INSERT INTO users ({}) VALUES ($1, $2, $3, $4) ON CONFLICT (email) DO NOTHING",
            USER_COLUMNS
        ))
        .bind(user.id.0)
        .bind(&user.email.0)
        .bind(&user.digest.0)
        .bind(user.created)
        .execute(&self.db)
        .await
        .unwrap();
        result.rows_affected() == 1
    }

    async fn find_user_by_email(&self, email: &str) -> Option<user::User> {
        sqlx::query_as::<_, UserRow>(formatcp!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .unwrap()
        .map(|row| row.into_entity())
    }

    async fn find_user(&self, id: user::Id) -> Option<user::User> {
        sqlx::query_as::<_, UserRow>(formatcp!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.db)
        .await
        .unwrap()
        .map(|row| row.into_entity())
    }

    async fn insert_record(&self, kind: record::Kind, record: &Record) {
        sqlx::query(&format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4)",
            kind.collection(),
            RECORD_COLUMNS
        ))
        .bind(record.id.0)
        .bind(record.owner_id.0)
        .bind(Value::Object(record.fields.clone()))
        .bind(record.created)
        .execute(&self.db)
        .await
        .unwrap();
    }

    async fn find_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
    ) -> Option<Record> {
        sqlx::query_as::<_, RecordRow>(&format!(
            "SELECT {} FROM {} WHERE id = $1 AND owner_id = $2",
            RECORD_COLUMNS,
            kind.collection()
        ))
        .bind(id.0)
        .bind(owner_id.0)
        .fetch_optional(&self.db)
        .await
        .unwrap()
        .map(|row| row.into_entity())
    }

    async fn find_records(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        filter: &Filter,
    ) -> Vec<Record> {
        sqlx::query_as::<_, RecordRow>(&format!(
            r#"SELECT {} FROM {} WHERE owner_id = $1
                AND ($2::timestamptz IS NULL OR created >= $2)
                AND ($3::timestamptz IS NULL OR created <= $3)
                AND ($4::text IS NULL OR fields->>'category' = $4)
                AND ($5::float8 IS NULL OR CASE WHEN jsonb_typeof(fields->'amount') = 'number'
                    THEN (fields->>'amount')::float8 >= $5 ELSE FALSE END)
                AND ($6::float8 IS NULL OR CASE WHEN jsonb_typeof(fields->'amount') = 'number'
                    THEN (fields->>'amount')::float8 <= $6 ELSE FALSE END)"#,
            RECORD_COLUMNS,
            kind.collection()
        ))
        .bind(owner_id.0)
        .bind(filter.created_from)
        .bind(filter.created_to)
        .bind(filter.category.as_deref())
        .bind(filter.amount_min)
        .bind(filter.amount_max)
        .fetch_all(&self.db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.into_entity())
        .collect()
    }

    async fn update_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
        patch: &Fields,
    ) -> Option<Record> {
        sqlx::query_as::<_, RecordRow>(&format!(
            "UPDATE {} SET fields = fields || $3 WHERE id = $1 AND owner_id = $2 RETURNING {}",
            kind.collection(),
            RECORD_COLUMNS
        ))
        .bind(id.0)
        .bind(owner_id.0)
        .bind(Value::Object(patch.clone()))
        .fetch_optional(&self.db)
        .await
        .unwrap()
        .map(|row| row.into_entity())
    }

    async fn delete_record(
        &self,
        kind: record::Kind,
        owner_id: user::Id,
        id: record::Id,
    ) -> bool {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1 AND owner_id = $2",
            kind.collection()
        ))
        .bind(id.0)
        .bind(owner_id.0)
        .execute(&self.db)
        .await
        .unwrap();
        result.rows_affected() == 1
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password: String,
    created: DateTime<Utc>,
}

impl UserRow {
    fn into_entity(self) -> user::User {
        user::User {
            id: user::Id(self.id),
            email: user::Email(self.email),
            digest: password::Digest(self.password),
            created: self.created,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: Uuid,
    owner_id: Uuid,
    fields: Value,
    created: Option<DateTime<Utc>>,
}

impl RecordRow {
    fn into_entity(self) -> Record {
        Record {
            id: record::Id(self.id),
            owner_id: user::Id(self.owner_id),
            fields: match self.fields {
                Value::Object(fields) => fields,
                _ => Fields::new(),
            },
            created: self.created,
        }
    }
}
