//! Repository for the `ritual.quest_participants` table.

use asraya_core::types::{QuestId, UserId};
use sqlx::PgPool;

/// Role written for every seeded membership row.
pub const PARTICIPANT_ROLE: &str = "participant";

/// Provides the idempotent membership upsert.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Ensure a membership row exists for (quest, user).
    ///
    /// `ON CONFLICT DO NOTHING`: this write only ever seeds defaults,
    /// so an existing row (possibly with a role changed elsewhere) is
    /// left untouched.
    pub async fn ensure(
        pool: &PgPool,
        quest_id: QuestId,
        user_id: UserId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO ritual.quest_participants (quest_id, user_id, role) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (quest_id, user_id) DO NOTHING",
        )
        .bind(quest_id)
        .bind(user_id)
        .bind(PARTICIPANT_ROLE)
        .execute(pool)
        .await?;
        Ok(())
    }
}
