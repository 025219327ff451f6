pub mod bids;
pub mod users;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Bid, ProfilePatch, User, UserProfile};
use crate::store::{BidStore, StoreError, UserStore};

/// PostgreSQL-backed store. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        users::create(&self.pool, user).await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(users::find_by_email(&self.pool, email).await?)
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(users::find_profile(&self.pool, id).await?)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        Ok(users::update_profile(&self.pool, id, patch, updated_at).await?)
    }
}

#[async_trait]
impl BidStore for PgStore {
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError> {
        bids::create(&self.pool, bid).await?;
        Ok(())
    }
}
