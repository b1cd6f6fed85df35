pub mod interaction;
pub mod parsing;
pub mod segment;

// Re-export key types for easier usage
pub use interaction::{
    BlockKey, InteractionError, OptionMark, OptionView, QuizPhase, QuizSession, QuizSessions,
    QuizState, QuizView,
};
pub use parsing::{ParseOptions, parse_message};
pub use segment::{ParsedMessage, QuizBlock, QuizOption, Segment};
