//! Storage seams. Handlers only see these traits; `db::PgStore` backs them
//! in production.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Bid, ProfilePatch, User, UserProfile};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Full record including the password hash. Only credential checks use this.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Public projection; the password hash is never read.
    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    /// Applies the patch and stamps `updated_at`. Returns false when no user has that id.
    async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait BidStore: Send + Sync {
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError>;
}
