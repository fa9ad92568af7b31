use std::collections::HashMap;
use thiserror::Error;

/// Why a template could not be filled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder names a key that is not in the context.
    #[error("missing key '{0}'")]
    MissingKey(String),
    /// Unbalanced or empty braces at the given byte offset.
    #[error("malformed placeholder at byte {0}")]
    Malformed(usize),
}

/// Replace `{key}` placeholders with values from `context`.
///
/// `{{` and `}}` produce literal braces. A `:spec` or `!conv` suffix inside
/// a placeholder is accepted and ignored.
pub fn fill(template: &str, context: &HashMap<String, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, n)| n == '{').is_some() {
                    out.push('{');
                    continue;
                }
                let mut field = String::new();
                let mut closed = false;
                for (_, n) in chars.by_ref() {
                    match n {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(TemplateError::Malformed(pos)),
                        _ => field.push(n),
                    }
                }
                if !closed {
                    return Err(TemplateError::Malformed(pos));
                }
                let key = field.split([':', '!']).next().unwrap_or_default();
                if key.is_empty() {
                    return Err(TemplateError::Malformed(pos));
                }
                let value = context
                    .get(key)
                    .ok_or_else(|| TemplateError::MissingKey(key.to_string()))?;
                out.push_str(value);
            }
            '}' => {
                if chars.next_if(|&(_, n)| n == '}').is_some() {
                    out.push('}');
                } else {
                    return Err(TemplateError::Malformed(pos));
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
