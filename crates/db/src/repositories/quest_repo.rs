//! Repository for the `ritual.quests` table.

use sqlx::PgPool;

use crate::models::quest::{Quest, QuestSeed};

/// Column list for quest queries. The `type` column is aliased because
/// it is a reserved word on the Rust side.
const COLUMNS: &str = "id, slug, title, type AS quest_type, realm, is_pinned";

/// Provides the idempotent upsert for the singleton quest row.
pub struct QuestRepo;

impl QuestRepo {
    /// Upsert the quest row keyed by its unique slug and return it.
    ///
    /// Uses `ON CONFLICT (slug) DO UPDATE` rather than `DO NOTHING` so
    /// that `RETURNING` always yields the row for the slug, including
    /// when a concurrent run inserted it first. Safe to call from any
    /// number of workers; the store's unique constraint is the only
    /// synchronization.
    pub async fn ensure(pool: &PgPool, seed: &QuestSeed) -> Result<Quest, sqlx::Error> {
        let query = format!(
            "INSERT INTO ritual.quests (slug, title, type, realm, is_pinned) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (slug) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 type = EXCLUDED.type, \
                 realm = EXCLUDED.realm, \
                 is_pinned = EXCLUDED.is_pinned \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quest>(&query)
            .bind(&seed.slug)
            .bind(&seed.title)
            .bind(&seed.quest_type)
            .bind(&seed.realm)
            .bind(seed.is_pinned)
            .fetch_one(pool)
            .await
    }
}
