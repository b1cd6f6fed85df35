use crate::parsing::{cursor::Cursor, span::Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name ...>` or `<name ... />`
    OpenTag,
    /// `</name ...>`
    CloseTag,
    /// `<!-- ... -->`
    Comment,
    /// Anything else, including stray `<` that start no tag.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

const COMMENT_OPEN: &[u8] = b"<!--";
const COMMENT_CLOSE: &[u8] = b"-->";

/// Cuts `s` into tokens. Concatenating the token spans reproduces `s`.
pub fn tokenize(s: &str) -> Vec<Token> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<Token>, start: usize, end: usize) {
        if end > start {
            out.push(Token {
                kind: TokenKind::Text,
                span: Span { start, end },
            });
        }
    }

    while !cur.eof() {
        if cur.peek() == Some(b'<')
            && let Some(tok) = try_parse_comment(&mut cur).or_else(|| try_parse_tag(&mut cur))
        {
            flush_text(&mut out, text_start, tok.span.start);
            text_start = tok.span.end;
            out.push(tok);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

fn try_parse_comment(cur: &mut Cursor<'_>) -> Option<Token> {
    if !cur.starts_with(COMMENT_OPEN) {
        return None;
    }
    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(COMMENT_OPEN.len());
    if !cur.seek(COMMENT_CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(COMMENT_CLOSE.len());
    Some(Token {
        kind: TokenKind::Comment,
        span: Span {
            start,
            end: cur.pos(),
        },
    })
}

/// Attempts to parse an open or close tag at the current `<`.
///
/// Quoted attribute values may contain `>`. A `<` outside quotes, or end of
/// input before `>`, means this was not a tag; the cursor is restored.
fn try_parse_tag(cur: &mut Cursor<'_>) -> Option<Token> {
    let saved = cur.clone();
    let start = cur.pos();
    cur.bump(); // <

    let kind = if cur.peek() == Some(b'/') {
        cur.bump();
        TokenKind::CloseTag
    } else {
        TokenKind::OpenTag
    };

    if !cur.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
        *cur = saved;
        return None;
    }

    let mut quote: Option<u8> = None;
    while let Some(b) = cur.bump() {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => {
                return Some(Token {
                    kind,
                    span: Span {
                        start,
                        end: cur.pos(),
                    },
                });
            }
            (None, b'<') => break,
            (None, _) => {}
        }
    }

    *cur = saved;
    None
}
