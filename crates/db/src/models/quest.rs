//! Quest entity model and the fixed First-Flame seed payload.

use asraya_core::types::QuestId;
use serde::Serialize;
use sqlx::FromRow;

/// Title written on every quest upsert.
pub const QUEST_TITLE: &str = "First Flame Ritual";

/// Quest type discriminator for ritual activities.
pub const QUEST_TYPE: &str = "ritual";

/// A row from `ritual.quests`.
///
/// Identity is the `slug`, not the generated `id`: repeated seeding
/// runs must always resolve to the same row for a given slug.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quest {
    pub id: QuestId,
    pub slug: String,
    pub title: String,
    pub quest_type: String,
    pub realm: String,
    pub is_pinned: bool,
}

/// Upsert payload for the singleton First-Flame quest row.
#[derive(Debug, Clone)]
pub struct QuestSeed {
    pub slug: String,
    pub title: String,
    pub quest_type: String,
    pub realm: String,
    pub is_pinned: bool,
}

impl QuestSeed {
    /// Seed payload for the First-Flame ritual with the given slug.
    ///
    /// The realm mirrors the slug, matching the row the live client
    /// looks up when rendering the ritual surface.
    pub fn first_flame(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: QUEST_TITLE.to_string(),
            quest_type: QUEST_TYPE.to_string(),
            realm: slug.to_string(),
            is_pinned: true,
        }
    }
}
