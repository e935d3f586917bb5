//! Day-definition document model and structural validation.
//!
//! The documents are owned and versioned externally; this module only
//! decodes them and decides whether a day is usable. A day is usable
//! when its `prompts` array exists and is non-empty.

use serde::{Deserialize, Serialize};

use crate::store::ContentError;

/// A single prompt shown to the participant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Prompt {
    pub text: String,

    /// Presentation fields the seeder does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A decoded `day-<n>.json` document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DayDefinition {
    pub prompts: Vec<Prompt>,

    /// Fields the seeder does not interpret (theme, artwork, copy).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DayDefinition {
    /// Decode and validate a raw document.
    ///
    /// A document that fails to parse, or parses with an empty
    /// `prompts` array, is rejected as malformed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ContentError> {
        let daydef: DayDefinition = serde_json::from_slice(bytes)
            .map_err(|e| ContentError::Malformed(e.to_string()))?;
        if daydef.prompts.is_empty() {
            return Err(ContentError::Malformed(
                "day definition has no prompts".to_string(),
            ));
        }
        Ok(daydef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_document_with_prompts() {
        let daydef =
            DayDefinition::from_slice(br#"{"prompts": [{"text": "Light the flame."}]}"#).unwrap();
        assert_eq!(daydef.prompts.len(), 1);
        assert_eq!(daydef.prompts[0].text, "Light the flame.");
    }

    #[test]
    fn rejects_empty_prompts_array() {
        let err = DayDefinition::from_slice(br#"{"prompts": []}"#).unwrap_err();
        assert_matches!(err, ContentError::Malformed(_));
    }

    #[test]
    fn rejects_document_without_prompts_field() {
        let err = DayDefinition::from_slice(br#"{"theme": "ember"}"#).unwrap_err();
        assert_matches!(err, ContentError::Malformed(_));
    }

    #[test]
    fn rejects_unparseable_body() {
        let err = DayDefinition::from_slice(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert_matches!(err, ContentError::Malformed(_));
    }

    #[test]
    fn preserves_unknown_fields() {
        let daydef = DayDefinition::from_slice(
            br#"{"prompts": [{"text": "Breathe.", "duration_secs": 60}], "theme": "ember"}"#,
        )
        .unwrap();
        assert_eq!(daydef.extra["theme"], "ember");
        assert_eq!(daydef.prompts[0].extra["duration_secs"], 60);
    }
}
