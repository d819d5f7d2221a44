use app::{auth::TokenKeys, store::Store};

use crate::rate_limit::RateLimit;

pub struct RocketState {
    pub store: Store,
    pub keys: TokenKeys,
    pub rate_limit: RateLimit,
}
