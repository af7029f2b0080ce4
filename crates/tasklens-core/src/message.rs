//! Extraction input types.
//!
//! A [`RawMessage`] is the immutable input to the extraction pipeline:
//! a block of free text plus the reference instant against which relative
//! date phrases ("tomorrow", "next Tuesday") are resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a message came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// Typed chat message
    Chat,
    /// Voice transcript (already transcribed to text)
    Voice,
    /// Shared note or share-intent payload
    Share,
}

impl Default for MessageSource {
    fn default() -> Self {
        MessageSource::Chat
    }
}

impl MessageSource {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Voice => "voice",
            Self::Share => "share",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chat" => Some(Self::Chat),
            "voice" => Some(Self::Voice),
            "share" => Some(Self::Share),
            _ => None,
        }
    }
}

/// Immutable input to one extraction run.
///
/// Created by the caller, consumed once per pipeline invocation, never
/// mutated. The reference instant anchors relative temporal phrases;
/// callers that replay stored messages should pass the original receipt
/// time, not `Utc::now()`, to get reproducible output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    /// The free text to extract tasks from
    pub text: String,
    /// Reference instant for resolving relative date/time phrases
    pub reference: DateTime<Utc>,
    /// Where the text came from
    #[serde(default)]
    pub source: MessageSource,
}

impl RawMessage {
    /// Create a message with the given text and reference instant.
    pub fn new(text: impl Into<String>, reference: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            reference,
            source: MessageSource::Chat,
        }
    }

    /// Set the message source.
    pub fn with_source(mut self, source: MessageSource) -> Self {
        self.source = source;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_label_roundtrip() {
        for src in [MessageSource::Chat, MessageSource::Voice, MessageSource::Share] {
            assert_eq!(MessageSource::from_label(src.as_label()), Some(src));
        }
        assert!(MessageSource::from_label("carrier-pigeon").is_none());
    }

    #[test]
    fn message_serialization() {
        let msg = RawMessage::new("buy milk", Utc::now()).with_source(MessageSource::Share);
        let json = serde_json::to_string(&msg).unwrap();
        let decoded: RawMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.text, "buy milk");
        assert_eq!(decoded.source, MessageSource::Share);
    }
}
