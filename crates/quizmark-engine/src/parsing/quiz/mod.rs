//! # Quiz Extraction
//!
//! Splits a text segment that contains `<form>...</form>` regions into
//! literal chunks and quiz candidates.
//!
//! ## Steps
//!
//! 1. The raw text is repaired (`parsing::repair`) and scanned into a markup
//!    tree (`parsing::markup`).
//! 2. **`regions`** walks the tree for closed forms and answer markers
//!    (answer containers and bare `Correct Answer:` sentences).
//! 3. Forms pair with markers **by position**: the Nth form takes the Nth
//!    marker; forms past the last marker get an empty correct value.
//! 4. **`options`** parses each form's options, **`question`** finds the
//!    text right before it.
//!
//! Extraction reads the repaired text, but every chunk span points into the
//! raw text, so literal chunks and degraded forms come out untouched. Text
//! without a closed form is reported as not qualifying.

pub mod answer;
pub mod options;
pub mod question;
pub mod regions;

use log::debug;

use crate::{
    parsing::{ParseOptions, markup::build_tree, repair::repair, span::Span},
    segment::{QuizBlock, QuizOption},
};

pub const FORM_OPEN: &[u8] = b"<form";

/// A form found in the text, before the zero-option fallback is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCandidate {
    /// Span of the whole form in the raw text.
    pub span: Span,
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_option_value: String,
}

impl FormCandidate {
    /// Converts into a quiz block, or `None` when no option parsed.
    pub fn into_block(self) -> Option<QuizBlock> {
        if self.options.is_empty() {
            return None;
        }
        Some(QuizBlock {
            question: self.question,
            options: self.options,
            correct_option_value: self.correct_option_value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizChunk {
    /// Raw text between forms.
    Literal(Span),
    Form(FormCandidate),
}

/// Result of splitting one qualifying text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSplit {
    /// Spans into the raw text; gap-free, in document order.
    pub chunks: Vec<QuizChunk>,
}

/// Quick check before any repair work is done.
pub fn may_contain_form(raw: &str) -> bool {
    raw.as_bytes()
        .windows(FORM_OPEN.len())
        .any(|w| w.eq_ignore_ascii_case(FORM_OPEN))
}

/// Splits `raw` into literal chunks and quiz candidates.
///
/// Returns `None` when the text holds no closed `<form>` region.
pub fn split_quiz_text(raw: &str, opts: &ParseOptions) -> Option<QuizSplit> {
    if !may_contain_form(raw) {
        return None;
    }

    let repaired = repair(raw);
    let text = repaired.text.as_str();
    let nodes = build_tree(text);
    let found = regions::collect(&nodes, text);
    if found.forms.is_empty() {
        return None;
    }
    if found.markers.len() != found.forms.len() {
        debug!(
            "{} quiz forms but {} answer markers; pairing by position",
            found.forms.len(),
            found.markers.len()
        );
    }

    let mut chunks = vec![];
    let mut pos = 0;
    for (i, form) in found.forms.iter().enumerate() {
        let span = repaired.raw_span(form.element.span);
        if span.start > pos {
            chunks.push(QuizChunk::Literal(Span {
                start: pos,
                end: span.start,
            }));
        }

        let correct = found
            .markers
            .get(i)
            .map(|m| decode_text(&m.value, opts))
            .unwrap_or_default();
        let question = form
            .question
            .map(|q| clean_text(q.slice(text), opts))
            .unwrap_or_default();

        chunks.push(QuizChunk::Form(FormCandidate {
            span,
            question,
            options: options::parse_options(form.element, text, opts),
            correct_option_value: correct,
        }));
        pos = span.end;
    }
    if pos < raw.len() {
        chunks.push(QuizChunk::Literal(Span {
            start: pos,
            end: raw.len(),
        }));
    }

    Some(QuizSplit { chunks })
}

/// Decodes character references when enabled.
pub fn decode_text(s: &str, opts: &ParseOptions) -> String {
    if opts.decode_entities {
        html_escape::decode_html_entities(s).into_owned()
    } else {
        s.to_string()
    }
}

/// Decodes, then trims.
pub fn clean_text(s: &str, opts: &ParseOptions) -> String {
    decode_text(s, opts).trim().to_string()
}
