use std::sync::Arc;
use std::time::Duration;

use app::auth::TokenKeys;
use app::database::{connect, run_migrations, Database};
use app::store::{MemoryStore, PgStore, Store};
use rocket::{launch, Build, Rocket};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct Config {
    /// When absent, records live in process memory and die with it.
    database_url: Option<Url>,
    token: TokenConfig,
    rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize)]
struct TokenConfig {
    secret: String,
    ttl_secs: i64,
}

impl TokenConfig {
    fn into_keys(self) -> TokenKeys {
        TokenKeys::new(&self.secret, self.ttl_secs)
    }
}

#[derive(Debug, Deserialize)]
struct RateLimitConfig {
    limit: usize,
    span: Duration,
}

impl RateLimitConfig {
    fn into_rate_limit(self) -> api::RateLimit {
        api::RateLimit::new(self.limit, self.span)
    }
}

#[launch]
async fn rocket() -> _ {
    start_server().await
}

async fn start_server() -> Rocket<Build> {
    env_logger::init();

    let rocket = Rocket::build();
    let config: Config = rocket.figment().extract().unwrap();

    let store: Store = match &config.database_url {
        Some(database_url) => {
            let db = connect(database_url).await;
            prepare_database(&db).await;
            Arc::new(PgStore::new(db))
        }
        None => {
            log::warn!("no database_url configured, records will not survive a restart");
            Arc::new(MemoryStore::default())
        }
    };

    api::register(
        rocket,
        store,
        config.token.into_keys(),
        config.rate_limit.into_rate_limit(),
    )
}

async fn prepare_database(db: &Database) {
    run_migrations(db).await;
    #[cfg(debug_assertions)]
    app::database::seed_development_data(db).await;
}
