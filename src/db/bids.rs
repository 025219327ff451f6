use sqlx::PgPool;

use crate::models::Bid;

pub async fn create(pool: &PgPool, bid: &Bid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO bids (id, request_id, provider_id, amount, description, status, proposal,
                           timeline, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(bid.id)
    .bind(bid.request_id)
    .bind(bid.provider_id)
    .bind(bid.amount)
    .bind(&bid.description)
    .bind(bid.status.as_str())
    .bind(&bid.proposal)
    .bind(&bid.timeline)
    .bind(bid.created_at)
    .bind(bid.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}
