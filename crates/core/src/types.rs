/// Quest rows use PostgreSQL UUID primary keys.
pub type QuestId = uuid::Uuid;

/// Users are identified by the auth system's UUID.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
