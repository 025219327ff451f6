//! Bid notifications published to the broker.
//!
//! Delivery is fire-and-forget: one publish per event, no acknowledgment and
//! no retry. Subscribers of [`BID_CREATED_CHANNEL`] must treat messages as
//! best-effort.

pub mod broker;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Bid;

pub const BID_CREATED_CHANNEL: &str = "bid.created";

/// Payload published on [`BID_CREATED_CHANNEL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidCreatedEvent {
    pub request_id: String,
    pub provider_id: String,
    pub amount: f64,
    pub message: String,
}

impl From<&Bid> for BidCreatedEvent {
    fn from(bid: &Bid) -> Self {
        BidCreatedEvent {
            request_id: bid.request_id.to_string(),
            provider_id: bid.provider_id.to_string(),
            amount: bid.amount,
            message: bid.description.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct BrokerError {
    pub message: String,
}

impl BrokerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to publish to {channel}: {source}")]
    Publish {
        channel: &'static str,
        #[source]
        source: BrokerError,
    },
    #[error("publish to {channel} timed out after {timeout:?}")]
    Timeout {
        channel: &'static str,
        timeout: Duration,
    },
}

/// A pub/sub broker connection. Implementations must be safe to share
/// between concurrent requests.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), BrokerError>;
}

/// Emits bid notifications over an injected, long-lived publisher.
#[derive(Clone)]
pub struct BidNotifier {
    publisher: Arc<dyn EventPublisher>,
    timeout: Duration,
}

impl BidNotifier {
    pub fn new(publisher: Arc<dyn EventPublisher>, timeout: Duration) -> Self {
        Self { publisher, timeout }
    }

    /// Publishes one message. Failures are returned to the caller to log.
    pub async fn emit_bid_created(&self, event: &BidCreatedEvent) -> Result<(), NotifyError> {
        let payload = serde_json::to_vec(event)?;

        let publish = self.publisher.publish(BID_CREATED_CHANNEL, payload);
        match tokio::time::timeout(self.timeout, publish).await {
            Ok(Ok(())) => {
                info!(
                    request_id = %event.request_id,
                    provider_id = %event.provider_id,
                    "Published {BID_CREATED_CHANNEL} event"
                );
                Ok(())
            }
            Ok(Err(source)) => Err(NotifyError::Publish {
                channel: BID_CREATED_CHANNEL,
                source,
            }),
            Err(_) => Err(NotifyError::Timeout {
                channel: BID_CREATED_CHANNEL,
                timeout: self.timeout,
            }),
        }
    }
}
