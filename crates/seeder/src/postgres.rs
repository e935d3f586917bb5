//! Store-backed implementations of the pipeline's seams.

use asraya_core::types::{QuestId, UserId};
use asraya_core::SeedStrategy;
use asraya_db::models::QuestSeed;
use asraya_db::repositories::{ParticipantRepo, ProgressRepo, QuestRepo, SeedRepo};
use asraya_db::PgPool;
use async_trait::async_trait;

use crate::error::SeedError;
use crate::pipeline::{ParticipantSeeder, QuestRegistry};

/// Quest registry backed by the `ritual.quests` upsert.
pub struct PgQuestRegistry {
    pool: PgPool,
    seed: QuestSeed,
}

impl PgQuestRegistry {
    pub fn new(pool: PgPool, seed: QuestSeed) -> Self {
        Self { pool, seed }
    }
}

#[async_trait]
impl QuestRegistry for PgQuestRegistry {
    async fn ensure_quest(&self) -> Result<QuestId, SeedError> {
        let quest = QuestRepo::ensure(&self.pool, &self.seed)
            .await
            .map_err(SeedError::Registry)?;
        Ok(quest.id)
    }
}

/// Participant seeding, in either of its two interchangeable shapes.
///
/// Both converge to the same row set; the RPC shape saves one round
/// trip where the `ritual.ensure_first_flame` helper is installed.
pub enum ParticipantWrites {
    /// Membership row then progress row, two local upserts.
    Upserts(PgPool),
    /// One atomic server-side call.
    Rpc(PgPool),
}

impl ParticipantWrites {
    /// Pick the shape the configuration asks for.
    pub fn from_strategy(strategy: SeedStrategy, pool: PgPool) -> Self {
        match strategy {
            SeedStrategy::Upserts => Self::Upserts(pool),
            SeedStrategy::Rpc => Self::Rpc(pool),
        }
    }
}

#[async_trait]
impl ParticipantSeeder for ParticipantWrites {
    async fn ensure_participant_state(
        &self,
        quest_id: QuestId,
        user_id: UserId,
    ) -> Result<(), SeedError> {
        match self {
            Self::Upserts(pool) => {
                ParticipantRepo::ensure(pool, quest_id, user_id)
                    .await
                    .map_err(SeedError::StateWrite)?;
                ProgressRepo::ensure(pool, quest_id, user_id)
                    .await
                    .map_err(SeedError::StateWrite)?;
            }
            Self::Rpc(pool) => {
                let imprint_id = SeedRepo::ensure_first_flame(pool, quest_id, user_id)
                    .await
                    .map_err(SeedError::StateWrite)?;
                tracing::debug!(%imprint_id, "ensure_first_flame returned");
            }
        }
        Ok(())
    }
}
