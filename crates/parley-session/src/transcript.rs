use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// TranscriptEntry
// ---------------------------------------------------------------------------

/// One completed turn: what the user said, what we answered, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub turn: u32,
    pub user_text: String,
    pub bot_text: String,
    pub intent: String,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Append-only log of turns. Entries are never edited or removed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a turn and return its 1-based turn number.
    pub fn append(
        &mut self,
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
        intent: impl Into<String>,
    ) -> u32 {
        let turn = u32::try_from(self.entries.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        self.entries.push(TranscriptEntry {
            turn,
            user_text: user_text.into(),
            bot_text: bot_text.into(),
            intent: intent.into(),
            timestamp: Utc::now(),
        });
        turn
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
