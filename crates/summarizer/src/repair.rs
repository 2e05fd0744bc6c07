//! Sentence repair for generated summaries.

const TERMINALS: &[char] = &['.', '!', '?'];

/// Make sure a summary ends on a complete sentence.
///
/// Trailing whitespace is trimmed first. Text already ending in `.`, `!` or
/// `?` is returned as is; otherwise it is cut after the last terminal mark,
/// or a period is appended when there is none. Empty text stays empty.
pub fn ensure_complete_sentence(text: &str) -> String {
    let text = text.trim_end();
    if text.is_empty() || text.ends_with(TERMINALS) {
        return text.to_string();
    }

    match text.rfind(TERMINALS) {
        Some(idx) => text[..=idx].to_string(),
        None => format!("{}.", text),
    }
}
