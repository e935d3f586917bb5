//! The flame status event envelope.

use asraya_core::types::{Timestamp, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Terminal outcome announced to the live client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlameEventKind {
    /// Seeding finished; the client should refetch its flame state.
    Ready,
    /// Seeding failed; `detail` carries the classified reason.
    Error,
}

impl FlameEventKind {
    /// Wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }
}

/// A status event for one user's seeding run.
///
/// Constructed via [`FlameEvent::ready`] or [`FlameEvent::error`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameEvent {
    pub kind: FlameEventKind,
    pub user_id: UserId,
    /// Failure reason for error events; absent on ready.
    pub detail: Option<String>,
    /// When the event was created (UTC).
    pub timestamp: Timestamp,
}

impl FlameEvent {
    /// Event announcing that a user's flame state is ready.
    pub fn ready(user_id: UserId) -> Self {
        Self {
            kind: FlameEventKind::Ready,
            user_id,
            detail: None,
            timestamp: Utc::now(),
        }
    }

    /// Event announcing that a seeding run failed.
    pub fn error(user_id: UserId, detail: impl Into<String>) -> Self {
        Self {
            kind: FlameEventKind::Error,
            user_id,
            detail: Some(detail.into()),
            timestamp: Utc::now(),
        }
    }

    /// JSON payload carried on the broadcast channel.
    pub fn payload(&self) -> serde_json::Value {
        match &self.detail {
            Some(detail) => serde_json::json!({
                "user_id": self.user_id,
                "detail": detail,
            }),
            None => serde_json::json!({
                "user_id": self.user_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_event_has_no_detail() {
        let user_id = uuid::Uuid::new_v4();
        let event = FlameEvent::ready(user_id);
        assert_eq!(event.kind, FlameEventKind::Ready);
        assert!(event.detail.is_none());
        assert_eq!(event.payload()["user_id"], user_id.to_string());
        assert!(event.payload().get("detail").is_none());
    }

    #[test]
    fn error_event_carries_detail() {
        let user_id = uuid::Uuid::new_v4();
        let event = FlameEvent::error(user_id, "content");
        assert_eq!(event.kind, FlameEventKind::Error);
        assert_eq!(event.payload()["detail"], "content");
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(FlameEventKind::Ready).unwrap(),
            "ready"
        );
        assert_eq!(
            serde_json::to_value(FlameEventKind::Error).unwrap(),
            "error"
        );
        assert_eq!(FlameEventKind::Ready.as_str(), "ready");
    }
}
