//! Repository for the `ritual.flame_progress` table.

use asraya_core::types::{QuestId, UserId};
use sqlx::PgPool;

/// Day target a fresh participant starts on.
const FIRST_DAY_TARGET: i32 = 1;

/// Provides the idempotent progress seed.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Ensure a progress row exists for (quest, user), seeded to
    /// day 1 / not complete.
    ///
    /// Insert-only-if-missing: a repair run must never reset
    /// `current_day_target` or `is_quest_complete` for a user who has
    /// already advanced past day 1.
    pub async fn ensure(
        pool: &PgPool,
        quest_id: QuestId,
        user_id: UserId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO ritual.flame_progress \
                 (quest_id, user_id, current_day_target, is_quest_complete) \
             VALUES ($1, $2, $3, FALSE) \
             ON CONFLICT (quest_id, user_id) DO NOTHING",
        )
        .bind(quest_id)
        .bind(user_id)
        .bind(FIRST_DAY_TARGET)
        .execute(pool)
        .await?;
        Ok(())
    }
}
