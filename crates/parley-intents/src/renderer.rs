use crate::catalog::Intent;
use crate::matcher::MatchResult;
use crate::memory::Memory;
use crate::template::fill;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Stand-in for `name` until the user has told us theirs.
pub const UNKNOWN_NAME: &str = "I don't know yet";

const NAME_KEY: &str = "name";
const PERSONAL_TOUCH_KEY: &str = "personal_touch";

/// Store every non-empty captured slot value, trimmed, in `memory`.
///
/// Slots that were not captured leave any earlier value untouched.
pub fn capture_slots(intent: &Intent, matched: Option<&MatchResult>, memory: &mut Memory) {
    let Some(matched) = matched else {
        return;
    };
    for slot in intent.slots() {
        if let Some(value) = matched.get(slot).map(str::trim) {
            if !value.is_empty() {
                memory.set(slot.as_str(), value);
            }
        }
    }
}

/// Copy memory and fill in `name` and `personal_touch` when absent.
pub fn build_context(memory: &Memory) -> HashMap<String, String> {
    let mut context = memory.as_map().clone();

    let known_name = memory
        .get(NAME_KEY)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    context
        .entry(NAME_KEY.to_string())
        .or_insert_with(|| UNKNOWN_NAME.to_string());
    context
        .entry(PERSONAL_TOUCH_KEY.to_string())
        .or_insert_with(|| match known_name {
            Some(name) => format!(" How can I help, {name}?"),
            None => " How can I help today?".to_string(),
        });

    context
}

/// Capture slots, pick a template at random and fill it from memory.
///
/// A template that cannot be filled is returned verbatim.
pub fn render<R: Rng + ?Sized>(
    intent: &Intent,
    matched: Option<&MatchResult>,
    memory: &mut Memory,
    rng: &mut R,
) -> String {
    capture_slots(intent, matched, memory);

    let Some(template) = intent.responses().choose(rng) else {
        warn!(intent = %intent.name(), "Intent has no responses");
        return String::new();
    };

    let context = build_context(memory);
    match fill(template, &context) {
        Ok(reply) => reply,
        Err(e) => {
            debug!(intent = %intent.name(), error = %e, "Template left unfilled");
            template.clone()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::IntentCatalog;
    use crate::matcher::resolve;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single(json: &str) -> IntentCatalog {
        IntentCatalog::from_json_str(json).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_slot_captured_and_trimmed() {
        let c = single(
            r#"{"intents": [{"name": "intro", "patterns": ["name is(?P<name>.*)"],
                "responses": ["Hi {name}"], "slots": ["name"]}]}"#,
        );
        let r = resolve(&c, "my name is   Alex  ");
        let mut memory = Memory::new();
        let reply = render(r.intent, r.matched.as_ref(), &mut memory, &mut rng());
        assert_eq!(memory.get("name"), Some("Alex"));
        assert_eq!(reply, "Hi Alex");
    }

    #[test]
    fn test_empty_capture_keeps_previous_value() {
        let c = single(
            r#"{"intents": [{"name": "intro", "patterns": ["name is ?(?P<name>\\w*)"],
                "responses": ["ok"], "slots": ["name"]}]}"#,
        );
        let mut memory = Memory::new();
        memory.set("name", "Sam");
        let r = resolve(&c, "name is");
        render(r.intent, r.matched.as_ref(), &mut memory, &mut rng());
        assert_eq!(memory.get("name"), Some("Sam"));
    }

    #[test]
    fn test_absent_match_captures_nothing() {
        let fallback = Intent::fallback();
        let mut memory = Memory::new();
        capture_slots(&fallback, None, &mut memory);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_missing_placeholder_renders_template_verbatim() {
        let c = single(
            r#"{"intents": [{"name": "color", "patterns": ["colou?r"],
                "responses": ["Your favourite colour is {color}."]}]}"#,
        );
        let r = resolve(&c, "what colour?");
        let mut memory = Memory::new();
        let reply = render(r.intent, r.matched.as_ref(), &mut memory, &mut rng());
        assert_eq!(reply, "Your favourite colour is {color}.");
    }

    #[test]
    fn test_malformed_template_renders_verbatim() {
        let c = single(r#"{"intents": [{"name": "x", "patterns": ["x"], "responses": ["broken {"]}]}"#);
        let r = resolve(&c, "x");
        let reply = render(r.intent, r.matched.as_ref(), &mut Memory::new(), &mut rng());
        assert_eq!(reply, "broken {");
    }

    #[test]
    fn test_padded_placeholder_renders_verbatim() {
        let c = single(r#"{"intents": [{"name": "x", "patterns": ["x"], "responses": ["Hi { name }"]}]}"#);
        let r = resolve(&c, "x");
        let mut memory = Memory::new();
        memory.set("name", "Alex");
        let reply = render(r.intent, r.matched.as_ref(), &mut memory, &mut rng());
        assert_eq!(reply, "Hi { name }");
    }

    #[test]
    fn test_context_defaults_without_name() {
        let context = build_context(&Memory::new());
        assert_eq!(context["name"], UNKNOWN_NAME);
        assert_eq!(context["personal_touch"], " How can I help today?");
    }

    #[test]
    fn test_context_personal_touch_uses_known_name() {
        let mut memory = Memory::new();
        memory.set("name", "Alex");
        let context = build_context(&memory);
        assert_eq!(context["name"], "Alex");
        assert_eq!(context["personal_touch"], " How can I help, Alex?");
    }

    #[test]
    fn test_context_does_not_modify_memory() {
        let memory = Memory::new();
        let _ = build_context(&memory);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_template_chosen_from_responses() {
        let c = single(
            r#"{"intents": [{"name": "g", "patterns": ["hi"], "responses": ["one", "two", "three"]}]}"#,
        );
        let r = resolve(&c, "hi");
        let mut rng = rng();
        let mut memory = Memory::new();
        for _ in 0..20 {
            let reply = render(r.intent, r.matched.as_ref(), &mut memory, &mut rng);
            assert!(["one", "two", "three"].contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_fallback_renders_one_of_its_responses() {
        let fallback = Intent::fallback();
        let reply = render(&fallback, None, &mut Memory::new(), &mut rng());
        assert!(fallback.responses().contains(&reply));
    }
}
