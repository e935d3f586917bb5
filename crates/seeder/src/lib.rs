//! The First-Flame seeding pipeline.
//!
//! One seeding run drives a fixed sequence of remote steps for a
//! single user: ensure the quest row, seed the participant state,
//! validate the day-1 content, then broadcast the outcome. Every step
//! is individually idempotent, so the run is safe to re-invoke after
//! partial execution and safe to overlap with a concurrent run for the
//! same user; the store's unique constraints are the only
//! synchronization.
//!
//! - [`SeedPipeline`] — the orchestrator and its collaborator traits.
//! - [`postgres`] — store-backed registry and both participant
//!   seeding strategies.
//! - [`adapters`] — object-storage and broadcast adapters.

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod postgres;

pub use error::{FailureReason, SeedError};
pub use pipeline::{
    ContentSource, ParticipantSeeder, QuestRegistry, SeedPipeline, StatusNotifier,
};
pub use postgres::{ParticipantWrites, PgQuestRegistry};
