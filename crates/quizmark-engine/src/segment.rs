//! Output types of the segmentation pipeline.
//!
//! Segments are created fresh on every parse and are never mutated
//! afterwards. They serialize as `{ "kind": ..., "payload": ... }` for
//! presentation layers that consume JSON.

use serde::{Deserialize, Serialize};

/// One selectable answer of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Comparison key for correctness.
    pub value: String,
    /// Trimmed text shown to the user. Never empty.
    pub label: String,
}

/// A parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBlock {
    pub question: String,
    /// At least one option; blocks without options are emitted as text.
    pub options: Vec<QuizOption>,
    /// Empty when no answer marker was paired with this block.
    pub correct_option_value: String,
}

impl QuizBlock {
    pub fn has_recorded_answer(&self) -> bool {
        !self.correct_option_value.is_empty()
    }

    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// The option holding the correct value. With duplicate values the last
    /// one wins.
    pub fn correct_option(&self) -> Option<&QuizOption> {
        if !self.has_recorded_answer() {
            return None;
        }
        self.options
            .iter()
            .rev()
            .find(|o| o.value == self.correct_option_value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Segment {
    Text { raw: String },
    Code { language: String, body: String },
    QuizBlock(QuizBlock),
}

impl Segment {
    pub fn text(raw: impl Into<String>) -> Self {
        Segment::Text { raw: raw.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Text { .. } => "text",
            Segment::Code { .. } => "code",
            Segment::QuizBlock(_) => "quiz_block",
        }
    }

    pub fn as_quiz(&self) -> Option<&QuizBlock> {
        match self {
            Segment::QuizBlock(block) => Some(block),
            _ => None,
        }
    }
}

/// The ordered segment sequence for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedMessage {
    pub segments: Vec<Segment>,
}

impl ParsedMessage {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Quiz blocks with their position in the segment sequence.
    pub fn quiz_blocks(&self) -> impl Iterator<Item = (usize, &QuizBlock)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_quiz().map(|b| (i, b)))
    }
}
