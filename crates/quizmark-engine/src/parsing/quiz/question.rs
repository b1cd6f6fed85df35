use crate::parsing::{markup::Node, span::Span};

use super::answer;

/// Span of the question text for the form at `siblings[index]`.
///
/// That is the text node immediately before the form, starting after the
/// last `Correct Answer:` sentence in it, since such a sentence closes the
/// previous quiz. `None` when the previous sibling is not text.
pub fn question_span(siblings: &[Node], index: usize, src: &str) -> Option<Span> {
    let prev = index.checked_sub(1).and_then(|i| siblings.get(i))?;
    let Node::Text(span) = prev else {
        return None;
    };
    let start = answer::sentence_markers(span.slice(src))
        .last()
        .map_or(span.start, |(local, _)| span.start + local.end);
    Some(Span::new(start, span.end))
}
