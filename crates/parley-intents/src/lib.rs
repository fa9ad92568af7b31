//! Intent resolution and response rendering for Parley.
//!
//! An [`IntentCatalog`] is an ordered list of intents loaded from JSON.
//! [`resolve`] picks the first intent whose patterns match a line of user
//! text, and [`render`] turns the match into a reply while updating the
//! session's [`Memory`] with captured slots.
//!
//! # Main types
//!
//! - [`IntentCatalog`]: Validated, compiled intent definitions in catalog order.
//! - [`Intent`]: One intent with compiled case-insensitive patterns.
//! - [`Resolution`]: The winning intent and its captured slot values.
//! - [`Memory`]: Per-session key/value store used to personalize replies.

/// Intent catalog loading and validation.
pub mod catalog;
/// First-match-wins intent resolution.
pub mod matcher;
/// Per-session key/value memory.
pub mod memory;
/// Slot capture and reply rendering.
pub mod renderer;
/// `{key}` placeholder filling.
pub mod template;

pub use catalog::{Intent, IntentCatalog, IntentDefinition, DEFAULT_CATALOG, FALLBACK_INTENT};
pub use matcher::{resolve, MatchResult, Resolution};
pub use memory::{Memory, LAST_INTENT_KEY};
pub use renderer::{build_context, capture_slots, render, UNKNOWN_NAME};
pub use template::{fill, TemplateError};
