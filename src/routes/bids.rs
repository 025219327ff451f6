use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::events::BidCreatedEvent;
use crate::extract::JsonBody;
use crate::models::{Bid, BidStatus};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateBid {
    pub request_id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub proposal: String,
    #[serde(default)]
    pub timeline: String,
}

/// Places a bid as the authenticated provider, then announces it on the
/// broker. The bid stands even if the announcement fails.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateBid>,
) -> Result<(StatusCode, Json<Bid>), AppError> {
    if !auth.user_type.can_bid() {
        return Err(AppError::Forbidden(
            "Only providers can place bids".to_string(),
        ));
    }

    if !req.amount.is_finite() || req.amount <= 0.0 {
        return Err(AppError::BadRequest(
            "Amount must be a positive number".to_string(),
        ));
    }

    let now = Utc::now();
    let bid = Bid {
        id: Uuid::new_v4(),
        request_id: req.request_id,
        provider_id: auth.user_id,
        amount: req.amount,
        description: req.description,
        status: BidStatus::Active,
        proposal: req.proposal,
        timeline: req.timeline,
        created_at: now,
        updated_at: now,
    };

    state.bids.insert(&bid).await?;

    if let Err(e) = state
        .notifier
        .emit_bid_created(&BidCreatedEvent::from(&bid))
        .await
    {
        tracing::warn!(bid_id = %bid.id, "Bid stored without notification: {e}");
    }

    Ok((StatusCode::CREATED, Json(bid)))
}
