//! # Message Segmentation
//!
//! Turns one chat message into an ordered sequence of [`Segment`]s.
//!
//! ## Pipeline
//!
//! 1. **`fence`**: split the content into literal text and closed code fences
//! 2. **`quiz`**: for each text part holding a closed `<form>` region, repair
//!    the markup (`repair`), scan it into a tree (`markup`) and split it into
//!    literal chunks and quiz candidates
//! 3. **assembly** (`parse_message`): concatenate everything in order;
//!    candidates without a single valid option fall back to literal text
//!
//! ## Key Invariants
//!
//! - Segment order equals content order
//! - Code bodies are raw zones: no repair or quiz extraction inside them
//! - Text outside quiz blocks comes out byte-for-byte unchanged
//! - Nothing here fails; broken constructs degrade to text

pub mod cursor;
pub mod fence;
pub mod markup;
pub mod quiz;
pub mod repair;
pub mod snapshot;
pub mod span;

#[cfg(test)]
mod tests;

use log::debug;

use crate::segment::{ParsedMessage, Segment};

use fence::{FencePart, extract_fences};
use quiz::{QuizChunk, split_quiz_text};

/// Knobs for [`parse_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Language reported for fences without a language word.
    pub fallback_language: String,
    /// Decode character references in labels, questions and values.
    pub decode_entities: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            fallback_language: "plaintext".to_string(),
            decode_entities: true,
        }
    }
}

/// Parses a message into its segment sequence.
///
/// Pure and synchronous; safe to call concurrently on different inputs.
pub fn parse_message(content: &str, options: &ParseOptions) -> ParsedMessage {
    let mut segments = vec![];

    for part in extract_fences(content) {
        match part {
            FencePart::Code { language, body, .. } => segments.push(Segment::Code {
                language: language
                    .map(|l| l.slice(content).to_string())
                    .unwrap_or_else(|| options.fallback_language.clone()),
                body: body.slice(content).to_string(),
            }),
            FencePart::Text(span) => push_text(span.slice(content), options, &mut segments),
        }
    }

    ParsedMessage { segments }
}

fn push_text(raw: &str, options: &ParseOptions, out: &mut Vec<Segment>) {
    let Some(split) = split_quiz_text(raw, options) else {
        out.push(Segment::text(raw));
        return;
    };

    for chunk in split.chunks {
        match chunk {
            QuizChunk::Literal(span) => out.push(Segment::text(span.slice(raw))),
            QuizChunk::Form(form) => {
                let span = form.span;
                match form.into_block() {
                    Some(block) => out.push(Segment::QuizBlock(block)),
                    None => {
                        debug!(
                            "quiz form at byte {} has no valid options; keeping as text",
                            span.start
                        );
                        out.push(Segment::text(span.slice(raw)));
                    }
                }
            }
        }
    }
}
