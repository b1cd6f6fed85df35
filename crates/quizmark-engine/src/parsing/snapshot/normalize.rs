use std::fmt;

use crate::segment::{ParsedMessage, Segment};

/// Snapshot of a parsed message.
///
/// Renders one line per text/code segment and one line per quiz plus an
/// indented line per option. Strings use Rust debug quoting, so newlines
/// show as `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snap {
    pub lines: Vec<String>,
}

impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

pub fn normalize(message: &ParsedMessage) -> Snap {
    let mut lines = vec![];
    for (i, segment) in message.segments.iter().enumerate() {
        match segment {
            Segment::Text { raw } => lines.push(format!("[{i}] text {raw:?}")),
            Segment::Code { language, body } => {
                lines.push(format!("[{i}] code {language} {body:?}"))
            }
            Segment::QuizBlock(block) => {
                lines.push(format!(
                    "[{i}] quiz {:?} correct={:?}",
                    block.question, block.correct_option_value
                ));
                for option in &block.options {
                    lines.push(format!("    option {:?} {:?}", option.value, option.label));
                }
            }
        }
    }
    Snap { lines }
}
