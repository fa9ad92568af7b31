use parley_core::{ParleyError, ParleyResult};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// The catalog shipped with the crate, used when no definition file is configured.
pub const DEFAULT_CATALOG: &str = include_str!("../assets/intents.json");

/// Name of the synthetic intent returned when nothing in the catalog matches.
pub const FALLBACK_INTENT: &str = "fallback";

const FALLBACK_RESPONSES: [&str; 3] = [
    "I'm not sure I follow. Could you rephrase that?",
    "I didn't catch that. What do you need help with?",
    "I'm still learning. Could you ask that a different way?",
];

/// One intent entry as written in the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentDefinition {
    /// Unique intent name, recorded in memory as `last_intent`.
    pub name: String,
    /// Regular expressions, tried in order.
    pub patterns: Vec<String>,
    /// Reply templates with `{key}` placeholders.
    pub responses: Vec<String>,
    /// Named capture groups whose values are stored in memory.
    #[serde(default)]
    pub slots: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    intents: Vec<IntentDefinition>,
}

/// A compiled intent. Immutable once built.
#[derive(Debug, Clone)]
pub struct Intent {
    name: String,
    patterns: Vec<Regex>,
    responses: Vec<String>,
    slots: Vec<String>,
}

impl Intent {
    /// Compile a definition. Patterns are case-insensitive and keep their file order.
    pub fn compile(def: IntentDefinition) -> ParleyResult<Self> {
        if def.name.trim().is_empty() {
            return Err(ParleyError::Catalog("intent with empty name".into()));
        }
        if def.responses.is_empty() {
            return Err(ParleyError::Catalog(format!(
                "intent '{}' has no responses",
                def.name
            )));
        }
        if def.responses.iter().any(|r| r.trim().is_empty()) {
            return Err(ParleyError::Catalog(format!(
                "intent '{}' has a blank response",
                def.name
            )));
        }

        let patterns = def
            .patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ParleyError::Pattern {
                        intent: def.name.clone(),
                        pattern: p.clone(),
                        source,
                    })
            })
            .collect::<ParleyResult<Vec<_>>>()?;

        let mut slots: Vec<String> = Vec::with_capacity(def.slots.len());
        for slot in def.slots {
            if slots.contains(&slot) {
                continue;
            }
            let captured = patterns
                .iter()
                .any(|re| re.capture_names().flatten().any(|n| n == slot));
            if !captured {
                warn!(intent = %def.name, slot = %slot, "Slot has no matching named group");
            }
            slots.push(slot);
        }

        Ok(Self {
            name: def.name,
            patterns,
            responses: def.responses,
            slots,
        })
    }

    /// The built-in catch-all intent: no patterns, generic clarification replies, no slots.
    pub fn fallback() -> Self {
        Self {
            name: FALLBACK_INTENT.to_string(),
            patterns: Vec::new(),
            responses: FALLBACK_RESPONSES.iter().map(ToString::to_string).collect(),
            slots: Vec::new(),
        }
    }

    /// Intent name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiled patterns in evaluation order.
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Reply templates.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Slot names, deduplicated, in declaration order.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Whether this is the synthetic fallback intent.
    pub fn is_fallback(&self) -> bool {
        self.name == FALLBACK_INTENT && self.patterns.is_empty()
    }
}

/// Ordered, validated collection of intents plus the fallback.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
    fallback: Intent,
}

impl IntentCatalog {
    /// Build a catalog from definitions. Any invalid definition fails the whole load.
    pub fn from_definitions(defs: Vec<IntentDefinition>) -> ParleyResult<Self> {
        let intents = defs
            .into_iter()
            .map(Intent::compile)
            .collect::<ParleyResult<Vec<_>>>()?;
        debug!(count = intents.len(), "Intent catalog compiled");
        Ok(Self {
            intents,
            fallback: Intent::fallback(),
        })
    }

    /// Parse a JSON document of the form `{"intents": [...]}`.
    pub fn from_json_str(json: &str) -> ParleyResult<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| ParleyError::Catalog(format!("Failed to parse catalog: {e}")))?;
        Self::from_definitions(doc.intents)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> ParleyResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            ParleyError::Catalog(format!(
                "Failed to read catalog '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&data)
    }

    /// The catalog bundled with the crate.
    pub fn bundled() -> ParleyResult<Self> {
        Self::from_json_str(DEFAULT_CATALOG)
    }

    /// Intents in catalog order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// The synthetic fallback intent.
    pub fn fallback(&self) -> &Intent {
        &self.fallback
    }

    /// Look up an intent by name.
    pub fn get(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name == name)
    }

    /// Number of catalog intents, not counting the fallback.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// True when the catalog defines no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
