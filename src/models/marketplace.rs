//! Rows of the marketplace tables that no route reads or writes yet.
//! Status columns hold the lowercase names listed on each field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget_range: String,
    pub location: String,
    /// active, in_progress, completed, cancelled
    pub status: String,
    /// low, medium, high, urgent
    pub priority: String,
    pub required_skills: Vec<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub active_bids_count: i32,
    pub total_bids_count: i32,
    pub is_free: bool,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Agreement {
    pub id: Uuid,
    pub request_id: Uuid,
    pub provider_id: Uuid,
    pub requester_id: Uuid,
    pub agreed_amount: f64,
    /// agreed, in_progress, completed, disputed
    pub status: String,
    pub terms: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub payment_status: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub agreement_id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub rating: i32,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub agreement_id: Uuid,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    pub amount: f64,
    /// pending, completed, failed, refunded
    pub status: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}
