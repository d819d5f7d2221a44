use super::{Database, Transaction};
use crate::password;
use chrono::Utc;
use uuid::Uuid;

pub async fn seed_development_data(db: &Database) {
    let mut data_tx = db.begin().await.unwrap();
    seed_test_user(&mut data_tx, 1).await;
    seed_test_user(&mut data_tx, 2).await;
    data_tx.commit().await.unwrap();
}

async fn seed_test_user(data_tx: &mut Transaction, index: u128) {
    let row = sqlx::query(r#"SELECT id FROM users WHERE id = $1"#)
        .bind(Uuid::from_u128(index))
        .fetch_optional(&mut *data_tx)
        .await
        .unwrap();
    if row.is_some() {
        return;
    }
    sqlx::query("INSERT INTO users (id, email, password, created) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::from_u128(index))
        .bind(format!("test-{}@user.net", index))
        .bind(password::hash(&format!("test-{}", index)).0)
        .bind(Utc::now())
        .execute(&mut *data_tx)
        .await
        .unwrap();
}
