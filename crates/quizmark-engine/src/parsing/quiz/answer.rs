//! Correct-answer extraction for both producer dialects.
//!
//! - structured: `<div class="answer"><value>B</value></div>`
//! - sentence: `Correct Answer: B`, inside an answer container or as bare text

use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::span::Span;

fn value_tag_regex() -> &'static Regex {
    static VALUE_TAG: OnceLock<Regex> = OnceLock::new();
    VALUE_TAG.get_or_init(|| {
        Regex::new(r"(?s)<value\b[^>]*>(.*?)</value\s*>").expect("Invalid value tag regex")
    })
}

fn sentence_regex() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    SENTENCE.get_or_init(|| {
        Regex::new(r"Correct Answer:\s*([A-Za-z])\b").expect("Invalid answer sentence regex")
    })
}

/// Which encoding supplied a correct value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerDialect {
    /// `<value>X</value>`
    ValueTag,
    /// `Correct Answer: X`
    Sentence,
}

/// Extracts the correct option value from an answer container's markup,
/// with the dialect that supplied it.
///
/// The `<value>` tag is tried first, then the `Correct Answer: <Letter>`
/// sentence. `None` when neither matches.
pub fn detect(markup: &str) -> Option<(AnswerDialect, String)> {
    if let Some(caps) = value_tag_regex().captures(markup) {
        return Some((AnswerDialect::ValueTag, caps[1].trim().to_string()));
    }
    sentence_regex()
        .captures(markup)
        .map(|caps| (AnswerDialect::Sentence, caps[1].to_string()))
}

/// All `Correct Answer: X` sentences in `text`, with spans local to `text`.
pub fn sentence_markers(text: &str) -> impl Iterator<Item = (Span, String)> + '_ {
    sentence_regex().captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some((
            Span {
                start: whole.start(),
                end: whole.end(),
            },
            caps[1].to_string(),
        ))
    })
}
