//! Server-side seeding via the `ritual.ensure_first_flame` helper.

use asraya_core::types::{QuestId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// Wraps the stored procedure that seeds participant and progress rows
/// in one atomic round trip.
pub struct SeedRepo;

impl SeedRepo {
    /// Call `ritual.ensure_first_flame(quest_id, user_id)`.
    ///
    /// Returns the imprint id minted (or re-used) by the store. The
    /// procedure is the server-side equivalent of the two local
    /// upserts and carries the same idempotence contract.
    pub async fn ensure_first_flame(
        pool: &PgPool,
        quest_id: QuestId,
        user_id: UserId,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar("SELECT ritual.ensure_first_flame($1, $2)")
            .bind(quest_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
