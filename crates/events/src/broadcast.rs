//! Realtime broadcast of flame status events.
//!
//! [`Broadcaster`] POSTs a JSON envelope to the store's `broadcast`
//! RPC so subscribed browsers refetch their flame state. Delivery is
//! at-least-once, best-effort: the seeder only ever calls
//! [`Broadcaster::publish_best_effort`], which logs a failed publish
//! and swallows it so a notification failure can never mask the run's
//! actual outcome.

use std::time::Duration;

use asraya_core::FlameConfig;

use crate::event::FlameEvent;

/// HTTP request timeout for a single publish attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for broadcast publish failures.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The realtime service returned a non-2xx status code.
    #[error("Broadcast returned HTTP {0}")]
    HttpStatus(u16),
}

/// Publishes flame status events on the fixed broadcast channel.
pub struct Broadcaster {
    client: reqwest::Client,
    endpoint: String,
    channel: String,
    service_key: String,
}

impl Broadcaster {
    /// Build a broadcaster from the process configuration.
    pub fn new(config: &FlameConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            endpoint: format!("{}/rest/v1/rpc/broadcast", config.supabase_url),
            channel: config.channel.clone(),
            service_key: config.service_key.clone(),
        }
    }

    /// Publish one event; a single attempt, no retry.
    pub async fn publish(&self, event: &FlameEvent) -> Result<(), BroadcastError> {
        let body = serde_json::json!({
            "channel": self.channel,
            "event": event.kind.as_str(),
            "payload": event.payload(),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BroadcastError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// Publish one event, swallowing any failure.
    ///
    /// A failed publish is logged at `warn` and discarded: the live
    /// client falls back to polling, and the seeding run's outcome is
    /// already decided by the time this is called.
    pub async fn publish_best_effort(&self, event: &FlameEvent) {
        if let Err(e) = self.publish(event).await {
            tracing::warn!(
                channel = %self.channel,
                event = event.kind.as_str(),
                user_id = %event.user_id,
                error = %e,
                "Status broadcast failed; continuing"
            );
        }
    }
}
