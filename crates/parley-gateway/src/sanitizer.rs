use std::borrow::Cow;
use thiserror::Error;

/// Default cap on a chat message, in characters.
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 100_000;

/// Why a chat message was refused before reaching a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Longer than the configured character limit.
    #[error("Message exceeds maximum length of {limit} characters")]
    TooLong { limit: usize },
    /// Nothing left after stripping control characters.
    #[error("Message contains only control characters")]
    OnlyControl,
}

/// Cleans chat messages at the HTTP edge.
///
/// Line breaks and tabs survive; every other control character is dropped.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    max_chars: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_CHARS)
    }
}

impl Sanitizer {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Borrowed when the message needs no cleaning.
    pub fn check<'a>(&self, message: &'a str) -> Result<Cow<'a, str>, Rejection> {
        if message.chars().count() > self.max_chars {
            return Err(Rejection::TooLong {
                limit: self.max_chars,
            });
        }
        if !message.chars().any(is_stripped) {
            return Ok(Cow::Borrowed(message));
        }

        let kept: String = message.chars().filter(|c| !is_stripped(*c)).collect();
        if kept.is_empty() {
            return Err(Rejection::OnlyControl);
        }
        Ok(Cow::Owned(kept))
    }
}

fn is_stripped(c: char) -> bool {
    c.is_control() && !matches!(c, '\n' | '\t' | '\r')
}
