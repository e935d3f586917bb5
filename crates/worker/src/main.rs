//! Seeding worker entry point.
//!
//! One invocation performs one seeding run for one user:
//!
//! ```text
//! asraya-worker <user-id>
//! ```
//!
//! The process exits non-zero on failure so the external scheduler can
//! re-invoke it; re-invocation is safe because every step of the run
//! is idempotent.

use std::time::Instant;

use anyhow::Context;
use asraya_content::ContentStore;
use asraya_core::FlameConfig;
use asraya_db::models::QuestSeed;
use asraya_events::Broadcaster;
use asraya_seeder::adapters::{BroadcastNotifier, StorageContentSource};
use asraya_seeder::{ParticipantWrites, PgQuestRegistry, SeedPipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asraya_worker=info,asraya_seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let user_id: Uuid = std::env::args()
        .nth(1)
        .context("usage: asraya-worker <user-id>")?
        .parse()
        .context("user id must be a UUID")?;

    let config = FlameConfig::from_env().context("configuration error")?;
    let pool = asraya_db::connect(&config.database_url)
        .await
        .context("failed to connect to the relational store")?;

    let pipeline = SeedPipeline::new(
        PgQuestRegistry::new(pool.clone(), QuestSeed::first_flame(&config.quest_slug)),
        ParticipantWrites::from_strategy(config.strategy, pool.clone()),
        StorageContentSource::new(ContentStore::new(&config)),
        BroadcastNotifier::new(Broadcaster::new(&config)),
    )
    .with_step_timeout(config.step_timeout);

    let t0 = Instant::now();
    let quest_id = pipeline
        .run(user_id)
        .await
        .context("seeding run failed")?;

    tracing::info!(%quest_id, elapsed_ms = t0.elapsed().as_millis() as u64, "Seeding finished");
    Ok(())
}
