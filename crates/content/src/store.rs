//! Authenticated object-storage reads for day definitions.

use std::time::Duration;

use asraya_core::FlameConfig;

use crate::daydef::DayDefinition;

/// Key prefix for the five-day ritual's documents.
const DAYDEF_PREFIX: &str = "5-day";

/// HTTP request timeout for a single storage read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from fetching or validating a day definition.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The object does not exist at the expected key.
    #[error("Day definition not found at '{key}'")]
    Missing { key: String },

    /// The document could not be decoded, or has no usable prompts.
    #[error("Day definition malformed: {0}")]
    Malformed(String),

    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage service returned an unexpected status code.
    #[error("Object storage returned HTTP {0}")]
    HttpStatus(u16),
}

/// Read-only client for the bucket holding day-definition documents.
///
/// Uses the service-role key so a private bucket behaves the same as a
/// public one. This client has no side effects on the store.
pub struct ContentStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

impl ContentStore {
    /// Build a store client from the process configuration.
    pub fn new(config: &FlameConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: config.supabase_url.clone(),
            bucket: config.daydef_bucket.clone(),
            service_key: config.service_key.clone(),
        }
    }

    /// Object key for a given ritual day, e.g. `5-day/day-1.json`.
    pub fn object_key(day: u32) -> String {
        format!("{DAYDEF_PREFIX}/day-{day}.json")
    }

    /// Fetch and validate the definition for one ritual day.
    pub async fn fetch_day(&self, day: u32) -> Result<DayDefinition, ContentError> {
        let key = Self::object_key(day);
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, key
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentError::Missing { key });
        }
        if !response.status().is_success() {
            return Err(ContentError::HttpStatus(response.status().as_u16()));
        }

        let bytes = response.bytes().await?;
        let daydef = DayDefinition::from_slice(&bytes)?;
        tracing::debug!(day, key, prompts = daydef.prompts.len(), "Day definition validated");
        Ok(daydef)
    }
}
