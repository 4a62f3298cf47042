//! Saved-conversation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::Transcript;

/// Maximum preview length before truncation.
pub const PREVIEW_MAX_CHARS: usize = 50;

/// Preview used when a transcript holds no user turn yet.
pub const PREVIEW_FALLBACK: &str = "Nuova conversazione";

/// A saved snapshot of a past conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Session identifier: epoch milliseconds assigned once at session
    /// start, stable for the session's lifetime.
    pub id: i64,
    /// Refreshed on every save; drives the 48-hour expiry window.
    pub created_at: DateTime<Utc>,
    /// Short label derived from the first user turn.
    pub preview: String,
    /// The full transcript as last saved.
    pub messages: Transcript,
}

impl HistoryEntry {
    /// Derives a history entry from the current transcript (`computeEntry`):
    /// preview from the first user turn, save timestamp set to now.
    pub fn from_transcript(transcript: &Transcript, id: i64) -> Self {
        Self::from_transcript_at(transcript, id, Utc::now())
    }

    /// Same as [`from_transcript`](Self::from_transcript) with an explicit
    /// clock, for deterministic tests.
    pub fn from_transcript_at(transcript: &Transcript, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            preview: derive_preview(transcript),
            messages: transcript.clone(),
        }
    }
}

fn derive_preview(transcript: &Transcript) -> String {
    let Some(text) = transcript.first_user_text() else {
        return PREVIEW_FALLBACK.to_string();
    };

    let mut preview: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    if text.chars().count() > PREVIEW_MAX_CHARS {
        preview.push_str("...");
    }
    preview
}
