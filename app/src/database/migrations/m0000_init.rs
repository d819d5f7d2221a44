use super::{Migration, SimpleSqlMigration};

pub fn migration() -> impl Migration {
    SimpleSqlMigration {
        serial_number: 0,
        sql: vec![
            r#"
            CREATE TABLE users (
                id UUID PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                created TIMESTAMP WITH TIME ZONE NOT NULL
            )"#,
            r#"CREATE INDEX user_email ON users (email)"#,
            // The created column is only populated for expenses; the other
            // collections share the row shape.
            r#"
            CREATE TABLE reminders (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL REFERENCES users,
                fields JSONB NOT NULL,
                created TIMESTAMP WITH TIME ZONE
            )"#,
            r#"CREATE INDEX reminder_owner ON reminders (owner_id)"#,
            r#"
            CREATE TABLE expenses (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL REFERENCES users,
                fields JSONB NOT NULL,
                created TIMESTAMP WITH TIME ZONE
            )"#,
            r#"CREATE INDEX expense_owner ON expenses (owner_id)"#,
            r#"
            CREATE TABLE categories (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL REFERENCES users,
                fields JSONB NOT NULL,
                created TIMESTAMP WITH TIME ZONE
            )"#,
            r#"CREATE INDEX category_owner ON categories (owner_id)"#,
        ],
    }
}
