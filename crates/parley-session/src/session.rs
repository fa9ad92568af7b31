use crate::transcript::Transcript;
use chrono::{DateTime, Utc};
use parley_intents::{render, resolve, IntentCatalog, Memory, LAST_INTENT_KEY};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use uuid::Uuid;

/// Reply given for blank input. Blank input never changes session state.
pub const EMPTY_INPUT_PROMPT: &str = "Say something so I can help!";

/// One conversation: its own catalog copy, memory and transcript.
///
/// Not synchronized. The registry wraps each session in a mutex so that
/// concurrent turns on the same id run one after another.
#[derive(Debug)]
pub struct ConversationSession {
    id: Uuid,
    catalog: IntentCatalog,
    memory: Memory,
    transcript: Transcript,
    rng: StdRng,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(catalog: IntentCatalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Build a session with a caller-supplied RNG, for reproducible template choice.
    pub fn with_rng(catalog: IntentCatalog, rng: StdRng) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            catalog,
            memory: Memory::new(),
            transcript: Transcript::new(),
            rng,
            created_at: now,
            updated_at: now,
        }
    }

    /// Answer one line of user text.
    pub fn respond(&mut self, text: &str) -> String {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return EMPTY_INPUT_PROMPT.to_string();
        }

        let resolution = resolve(&self.catalog, cleaned);
        let intent = resolution.intent;
        let reply = render(
            intent,
            resolution.matched.as_ref(),
            &mut self.memory,
            &mut self.rng,
        );

        let turn = self.transcript.append(cleaned, reply.as_str(), intent.name());
        self.memory.set(LAST_INTENT_KEY, intent.name());
        self.updated_at = Utc::now();

        debug!(session_id = %self.id, turn, intent = %intent.name(), "Turn completed");
        reply
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
