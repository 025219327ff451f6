use std::sync::Arc;

use crate::config::Config;
use crate::events::{BidNotifier, EventPublisher};
use crate::rate_limit::LoginRateLimiter;
use crate::store::{BidStore, UserStore};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub bids: Arc<dyn BidStore>,
    pub notifier: BidNotifier,
    pub login_limiter: LoginRateLimiter,
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserStore>,
        bids: Arc<dyn BidStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> SharedState {
        let notifier = BidNotifier::new(publisher, config.publish_timeout);
        Arc::new(AppState {
            config,
            users,
            bids,
            notifier,
            login_limiter: LoginRateLimiter::new(),
        })
    }
}
