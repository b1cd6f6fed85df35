//! # Quiz Interaction
//!
//! Per-quiz answer/reveal state machine and the session map that owns one
//! state per rendered quiz block.
//!
//! ## States
//!
//! ```text
//! Unanswered --choose--> Selected --choose--> Selected
//!                            |
//!                          submit
//!                            v
//!                        Revealed   (terminal)
//! ```
//!
//! Rejected events return an [`InteractionError`] and leave the state
//! unchanged. There is no reset: parsing new content and syncing the
//! session map creates fresh states.

use std::{collections::BTreeMap, fmt};

use log::debug;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::segment::{ParsedMessage, QuizBlock};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("answer already revealed; the quiz accepts no further input")]
    AlreadyRevealed,
    #[error("nothing selected; choose an option before submitting")]
    NothingSelected,
    #[error("no option with value {value:?} in this quiz")]
    UnknownOption { value: String },
    #[error("no quiz block registered under {0}")]
    UnknownBlock(BlockKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Unanswered,
    Selected,
    Revealed,
}

/// Interaction state of one quiz block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    selected: Option<String>,
    revealed: bool,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QuizPhase {
        match (&self.selected, self.revealed) {
            (_, true) => QuizPhase::Revealed,
            (Some(_), false) => QuizPhase::Selected,
            (None, false) => QuizPhase::Unanswered,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Submit is only offered once something is selected.
    pub fn can_submit(&self) -> bool {
        self.phase() == QuizPhase::Selected
    }

    /// Selects `value`, replacing any earlier choice.
    pub fn choose(
        &mut self,
        block: &QuizBlock,
        value: &str,
    ) -> Result<QuizPhase, InteractionError> {
        if self.revealed {
            return Err(InteractionError::AlreadyRevealed);
        }
        if block.option(value).is_none() {
            return Err(InteractionError::UnknownOption {
                value: value.to_string(),
            });
        }
        self.selected = Some(value.to_string());
        Ok(self.phase())
    }

    /// Reveals the answer, freezing the selection.
    pub fn submit(&mut self) -> Result<QuizPhase, InteractionError> {
        match self.phase() {
            QuizPhase::Revealed => Err(InteractionError::AlreadyRevealed),
            QuizPhase::Unanswered => Err(InteractionError::NothingSelected),
            QuizPhase::Selected => {
                self.revealed = true;
                Ok(QuizPhase::Revealed)
            }
        }
    }

    /// How `block` should be drawn in the current state.
    pub fn view(&self, block: &QuizBlock) -> QuizView {
        QuizView::build(block, self)
    }
}

/// Correctness mark of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub mark: OptionMark,
}

/// Everything a presentation layer needs to draw one quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub phase: QuizPhase,
    pub question: String,
    pub options: Vec<OptionView>,
    pub can_submit: bool,
    /// Options no longer accept input.
    pub locked: bool,
    /// Revealed, but the block carries no correct value.
    pub no_recorded_answer: bool,
    /// Label of the correct option, once revealed.
    pub correct_label: Option<String>,
}

impl QuizView {
    fn build(block: &QuizBlock, state: &QuizState) -> Self {
        let revealed = state.is_revealed();
        let selected = state.selected();
        let correct = block.correct_option_value.as_str();

        let options = block
            .options
            .iter()
            .map(|o| {
                let is_selected = selected == Some(o.value.as_str());
                let mark = if !revealed {
                    OptionMark::Neutral
                } else if !correct.is_empty() && o.value == correct {
                    OptionMark::Correct
                } else if is_selected {
                    OptionMark::Incorrect
                } else {
                    OptionMark::Neutral
                };
                OptionView {
                    value: o.value.clone(),
                    label: o.label.clone(),
                    selected: is_selected,
                    mark,
                }
            })
            .collect();

        QuizView {
            phase: state.phase(),
            question: block.question.clone(),
            options,
            can_submit: state.can_submit(),
            locked: revealed,
            no_recorded_answer: revealed && !block.has_recorded_answer(),
            correct_label: revealed
                .then(|| block.correct_option().map(|o| o.label.clone()))
                .flatten(),
        }
    }
}

/// Identity of a quiz block within one rendered message: its position in
/// the segment sequence plus a digest of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey {
    position: usize,
    digest: String,
}

impl BlockKey {
    pub fn new(position: usize, block: &QuizBlock) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(position.to_le_bytes());
        hasher.update(block.question.as_bytes());
        for option in &block.options {
            hasher.update([0u8]);
            hasher.update(option.value.as_bytes());
            hasher.update([1u8]);
            hasher.update(option.label.as_bytes());
        }
        hasher.update([2u8]);
        hasher.update(block.correct_option_value.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        Self { position, digest }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quiz-{}-{}", self.position, &self.digest[..12])
    }
}

/// A quiz block together with its interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    pub block: QuizBlock,
    pub state: QuizState,
}

impl QuizSession {
    pub fn view(&self) -> QuizView {
        self.state.view(&self.block)
    }
}

/// Interaction states of the quiz blocks currently rendered, keyed by
/// [`BlockKey`].
///
/// Uses BTreeMap so iteration follows segment order.
#[derive(Debug, Default)]
pub struct QuizSessions {
    sessions: BTreeMap<BlockKey, QuizSession>,
}

impl QuizSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of the quiz blocks in `message`, in segment order.
    pub fn keys_for(message: &ParsedMessage) -> Vec<BlockKey> {
        message
            .quiz_blocks()
            .map(|(position, block)| BlockKey::new(position, block))
            .collect()
    }

    /// Aligns the map with a freshly rendered message.
    ///
    /// States of blocks still present are kept; blocks no longer present are
    /// torn down; new blocks start Unanswered. Returns the message's keys.
    pub fn sync(&mut self, message: &ParsedMessage) -> Vec<BlockKey> {
        let keys = Self::keys_for(message);
        let before = self.sessions.len();
        self.sessions.retain(|key, _| keys.contains(key));
        let dropped = before - self.sessions.len();

        for ((_, block), key) in message.quiz_blocks().zip(&keys) {
            self.sessions
                .entry(key.clone())
                .or_insert_with(|| QuizSession {
                    block: block.clone(),
                    state: QuizState::new(),
                });
        }

        debug!(
            "quiz sessions synced: {} live, {} torn down",
            self.sessions.len(),
            dropped
        );
        keys
    }

    /// Drops every state, as when the render tree goes away.
    pub fn teardown(&mut self) {
        self.sessions.clear();
    }

    pub fn get(&self, key: &BlockKey) -> Option<&QuizSession> {
        self.sessions.get(key)
    }

    pub fn state(&self, key: &BlockKey) -> Option<&QuizState> {
        self.sessions.get(key).map(|s| &s.state)
    }

    pub fn view(&self, key: &BlockKey) -> Option<QuizView> {
        self.sessions.get(key).map(QuizSession::view)
    }

    pub fn choose(&mut self, key: &BlockKey, value: &str) -> Result<QuizPhase, InteractionError> {
        let session = self.session_mut(key)?;
        session.state.choose(&session.block, value)
    }

    pub fn submit(&mut self, key: &BlockKey) -> Result<QuizPhase, InteractionError> {
        self.session_mut(key)?.state.submit()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn session_mut(&mut self, key: &BlockKey) -> Result<&mut QuizSession, InteractionError> {
        self.sessions
            .get_mut(key)
            .ok_or_else(|| InteractionError::UnknownBlock(key.clone()))
    }
}
