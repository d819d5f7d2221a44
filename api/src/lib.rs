//! This library contains definitions for the API layer.

use app::{auth::TokenKeys, store::Store};
use rocket::{Build, Rocket};
use state::RocketState;

mod access;
mod error;
mod rate_limit;
mod routes;
mod state;

pub use rate_limit::RateLimit;

pub fn register(
    rocket: Rocket<Build>,
    store: Store,
    keys: TokenKeys,
    rate_limit: RateLimit,
) -> Rocket<Build> {
    routes::register(
        rocket,
        RocketState {
            store,
            keys,
            rate_limit,
        },
    )
}
