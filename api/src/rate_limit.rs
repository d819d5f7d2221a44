use std::sync::Arc;
use std::time::Duration;

use app::user;
use dashmap::{mapref::entry::Entry, DashMap};

/// A sliding per-user request budget. Each allowed request takes one slot and
/// gives it back once the configured span has elapsed.
pub struct RateLimit {
    limit: usize,
    span: Duration,
    slots: Arc<DashMap<user::Id, usize>>,
}

impl RateLimit {
    pub fn new(limit: usize, span: Duration) -> Self {
        Self {
            limit,
            span,
            slots: Arc::new(Default::default()),
        }
    }

    /// Returns true if the user should be rate limited, false otherwise.
    pub fn limit(&self, user_id: user::Id) -> bool {
        {
            let mut taken = self.slots.entry(user_id).or_insert(0);
            if *taken >= self.limit {
                return true;
            }
            *taken += 1;
        }
        self.release_later(user_id);
        false
    }

    fn release_later(&self, user_id: user::Id) {
        let slots = Arc::clone(&self.slots);
        let span = self.span;
        tokio::spawn(async move {
            tokio::time::sleep(span).await;
            if let Entry::Occupied(mut e) = slots.entry(user_id) {
                let taken = e.get_mut();
                *taken = taken.saturating_sub(1);
                if *taken == 0 {
                    e.remove();
                }
            }
        });
    }
}
