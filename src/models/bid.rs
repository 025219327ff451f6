use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Active,
    Accepted,
    Rejected,
    Archived,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Active => "active",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
            BidStatus::Archived => "archived",
        }
    }
}

impl TryFrom<String> for BidStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(BidStatus::Active),
            "accepted" => Ok(BidStatus::Accepted),
            "rejected" => Ok(BidStatus::Rejected),
            "archived" => Ok(BidStatus::Archived),
            other => Err(format!("unknown bid status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Bid {
    pub id: Uuid,
    pub request_id: Uuid,
    pub provider_id: Uuid,
    pub amount: f64,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: BidStatus,
    pub proposal: String,
    pub timeline: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
