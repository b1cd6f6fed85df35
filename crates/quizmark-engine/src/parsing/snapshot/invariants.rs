use crate::{
    parsing::quiz::may_contain_form,
    segment::{ParsedMessage, Segment},
};

/// Validates segmenter output invariants.
///
/// Asserts that:
/// - no text segment is empty
/// - every quiz block has at least one option
/// - every option label is non-empty and trimmed
/// - text segments and code bodies appear verbatim in `content`, in segment
///   order
/// - without quiz markup, no quiz block is produced
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(content: &str, message: &ParsedMessage) {
    for (i, segment) in message.segments.iter().enumerate() {
        match segment {
            Segment::Text { raw } => {
                assert!(!raw.is_empty(), "empty text segment at {i}");
            }
            Segment::Code { .. } => {}
            Segment::QuizBlock(block) => {
                assert!(!block.options.is_empty(), "quiz block at {i} has no options");
                for option in &block.options {
                    assert!(
                        !option.label.is_empty() && option.label.trim() == option.label,
                        "quiz block at {i} has a blank or untrimmed label: {:?}",
                        option.label
                    );
                }
            }
        }
    }

    let quiz_markup = may_contain_form(content);
    let mut pos = 0;
    for (i, segment) in message.segments.iter().enumerate() {
        let piece = match segment {
            Segment::Text { raw } => raw.as_str(),
            Segment::Code { body, .. } => body.as_str(),
            Segment::QuizBlock(_) if quiz_markup => continue,
            Segment::QuizBlock(_) => panic!("quiz block at {i} without quiz markup"),
        };
        let found = content[pos..].find(piece).unwrap_or_else(|| {
            panic!("segment {i} ({piece:?}) not found in content after byte {pos}")
        });
        pos += found + piece.len();
    }
}
