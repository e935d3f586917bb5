//! Shared types and configuration for the First-Flame seeding service.

pub mod config;
pub mod error;
pub mod types;

pub use config::{FlameConfig, SeedStrategy};
pub use error::ConfigError;
