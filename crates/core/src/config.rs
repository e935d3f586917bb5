//! Process-wide configuration for the seeding service.
//!
//! All First-Flame constants (quest slug, day-definition bucket,
//! broadcast channel) live here rather than as scattered literals, and
//! are resolved exactly once at startup via [`FlameConfig::from_env`].

use std::time::Duration;

use crate::error::ConfigError;

/// Slug identifying the singleton First-Flame quest row.
pub const DEFAULT_QUEST_SLUG: &str = "first-flame-ritual";

/// Object-storage bucket holding the day-definition documents.
pub const DEFAULT_DAYDEF_BUCKET: &str = "asrayaospublicbucket";

/// Realtime channel the status broadcast is published on.
pub const DEFAULT_BROADCAST_CHANNEL: &str = "flame_status";

/// Default per-step timeout in seconds.
const DEFAULT_STEP_TIMEOUT_SECS: u64 = 30;

/// How the participant/progress rows are seeded.
///
/// Both strategies converge to the same row set; the RPC variant folds
/// the two upserts into one server-side round trip where the
/// `ritual.ensure_first_flame` helper function is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedStrategy {
    /// Two local upserts: participant row, then progress row.
    #[default]
    Upserts,
    /// Single `ritual.ensure_first_flame(quest_id, user_id)` call.
    Rpc,
}

impl SeedStrategy {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "upserts" => Ok(Self::Upserts),
            "rpc" => Ok(Self::Rpc),
            other => Err(ConfigError::InvalidVar {
                name: "FLAME_SEED_STRATEGY",
                message: format!("unknown strategy '{other}', expected 'upserts' or 'rpc'"),
            }),
        }
    }
}

/// Seeding service configuration loaded from environment variables.
///
/// | Env Var                     | Default                 |
/// |-----------------------------|-------------------------|
/// | `DATABASE_URL`              | required                |
/// | `SUPABASE_URL`              | required                |
/// | `SUPABASE_SERVICE_ROLE_KEY` | required                |
/// | `FLAME_QUEST_SLUG`          | `first-flame-ritual`    |
/// | `FLAME_DAYDEF_BUCKET`       | `asrayaospublicbucket`  |
/// | `FLAME_BROADCAST_CHANNEL`   | `flame_status`          |
/// | `FLAME_SEED_STRATEGY`       | `upserts`               |
/// | `FLAME_STEP_TIMEOUT_SECS`   | `30`                    |
#[derive(Debug, Clone)]
pub struct FlameConfig {
    /// Postgres connection string for the relational store.
    pub database_url: String,
    /// Base URL of the Supabase project (storage + realtime REST).
    pub supabase_url: String,
    /// Privileged service-role key for storage reads and broadcasts.
    pub service_key: String,
    /// Slug of the singleton quest row.
    pub quest_slug: String,
    /// Bucket holding `5-day/day-<n>.json` documents.
    pub daydef_bucket: String,
    /// Broadcast channel for ready/error events.
    pub channel: String,
    /// Participant seeding strategy.
    pub strategy: SeedStrategy,
    /// Upper bound on any single remote step.
    pub step_timeout: Duration,
}

impl FlameConfig {
    /// Load configuration from the environment.
    ///
    /// Fails fast with [`ConfigError`] when a required credential is
    /// absent, before any remote call is issued.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let supabase_url = require("SUPABASE_URL")?;
        let service_key = require("SUPABASE_SERVICE_ROLE_KEY")?;

        let quest_slug = optional("FLAME_QUEST_SLUG", DEFAULT_QUEST_SLUG);
        let daydef_bucket = optional("FLAME_DAYDEF_BUCKET", DEFAULT_DAYDEF_BUCKET);
        let channel = optional("FLAME_BROADCAST_CHANNEL", DEFAULT_BROADCAST_CHANNEL);

        let strategy = match std::env::var("FLAME_SEED_STRATEGY") {
            Ok(raw) => SeedStrategy::parse(raw.trim())?,
            Err(_) => SeedStrategy::default(),
        };

        let step_timeout =
            step_timeout(std::env::var("FLAME_STEP_TIMEOUT_SECS").ok().as_deref())?;

        Ok(Self {
            database_url,
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            service_key,
            quest_slug,
            daydef_bucket,
            channel,
            strategy,
            step_timeout,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn step_timeout(raw: Option<&str>) -> Result<Duration, ConfigError> {
    match raw {
        Some(raw) => {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "FLAME_STEP_TIMEOUT_SECS",
                message: format!("'{raw}' is not a valid number of seconds"),
            })?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(Duration::from_secs(DEFAULT_STEP_TIMEOUT_SECS)),
    }
}
