//! # Code-Fence Extraction
//!
//! Splits message content into literal text and triple-backtick code
//! regions. A fence is only recognised when the opener (optionally followed
//! by a language word) ends its line and a closing delimiter follows later.
//! An opener without a closer is left as literal text.

use log::debug;

use super::{cursor::Cursor, span::Span};

/// Code fence type with owned delimiter constants.
pub struct CodeFence;

impl CodeFence {
    pub const DELIMITER: &'static [u8; 3] = b"```";
    pub const NEWLINE: u8 = b'\n';

    /// Bytes allowed in the language tag right after the opener.
    pub fn is_language_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_'
    }
}

/// One piece of the fence split, as spans into the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FencePart {
    /// Literal text between fences.
    Text(Span),
    /// A closed code fence.
    Code {
        /// Full span including both delimiters.
        full: Span,
        /// Language word after the opener, if any.
        language: Option<Span>,
        /// Everything between the opener's newline and the closing delimiter.
        body: Span,
    },
}

impl FencePart {
    pub fn span(&self) -> Span {
        match self {
            FencePart::Text(sp) => *sp,
            FencePart::Code { full, .. } => *full,
        }
    }
}

enum FenceMiss {
    /// Not an opener at this position.
    NotAFence,
    /// A valid opener with no closing delimiter after it.
    Unterminated { at: usize },
}

/// Splits `s` into an ordered, gap-free sequence of text and code parts.
///
/// Empty text parts are never emitted, so content made of a single fence
/// yields exactly one `Code` part.
pub fn extract_fences(s: &str) -> Vec<FencePart> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<FencePart>, start: usize, end: usize) {
        if end > start {
            out.push(FencePart::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        match try_parse_fence(&mut cur) {
            Ok(part) => {
                let full = part.span();
                flush_text(&mut out, text_start, full.start);
                text_start = full.end;
                out.push(part);
            }
            Err(FenceMiss::NotAFence) => {
                cur.bump();
            }
            Err(FenceMiss::Unterminated { at }) => {
                // No later opener can find a closer either.
                debug!("unterminated code fence at byte {at}; keeping remainder as text");
                break;
            }
        }
    }

    flush_text(&mut out, text_start, s.len());
    out
}

/// Attempts to parse a fence starting at the current position.
///
/// On failure the cursor position is restored.
fn try_parse_fence(cur: &mut Cursor<'_>) -> Result<FencePart, FenceMiss> {
    if !cur.starts_with(CodeFence::DELIMITER) {
        return Err(FenceMiss::NotAFence);
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(CodeFence::DELIMITER.len());

    let lang_start = cur.pos();
    cur.bump_while(CodeFence::is_language_byte);
    let lang_end = cur.pos();

    if cur.peek() != Some(CodeFence::NEWLINE) {
        *cur = saved;
        return Err(FenceMiss::NotAFence);
    }
    cur.bump(); // \n
    let body_start = cur.pos();

    if !cur.seek(CodeFence::DELIMITER) {
        *cur = saved;
        return Err(FenceMiss::Unterminated { at: start });
    }
    let body_end = cur.pos();
    cur.bump_n(CodeFence::DELIMITER.len());

    let language = (lang_end > lang_start).then_some(Span {
        start: lang_start,
        end: lang_end,
    });

    Ok(FencePart::Code {
        full: Span {
            start,
            end: cur.pos(),
        },
        language,
        body: Span {
            start: body_start,
            end: body_end,
        },
    })
}
