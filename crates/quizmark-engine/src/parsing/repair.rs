//! Best-effort normalization of the markup producers emit around quizzes.
//!
//! This is pattern repair, not a parser: it will also rewrite matching
//! substrings that happen to appear in unrelated prose. Only end tags are
//! closed (`</form`, `</div`); an open tag missing its `>` is left alone
//! and the tree builder treats it as text.
//!
//! The repaired text only feeds quiz extraction. [`Repaired`] remembers
//! where every repaired byte came from, so spans found in it can be mapped
//! back onto the raw input and emitted untouched.

use std::{iter, ops::Range, sync::OnceLock};

use regex::Regex;

use super::span::Span;

/// `</form` or `</div` with or without the closing `>`.
fn end_tag_regex() -> &'static Regex {
    static END_TAG: OnceLock<Regex> = OnceLock::new();
    END_TAG.get_or_init(|| Regex::new(r"</(form|div)\b(\s*>)?").expect("Invalid end tag regex"))
}

/// `<input ...>` not already self-closed, plus an optional explicit `</input>`.
fn input_tag_regex() -> &'static Regex {
    static INPUT_TAG: OnceLock<Regex> = OnceLock::new();
    INPUT_TAG.get_or_init(|| {
        Regex::new(r"<input([^>]*[^/])>(\s*</input>)?").expect("Invalid input tag regex")
    })
}

fn inter_tag_whitespace_regex() -> &'static Regex {
    static INTER_TAG: OnceLock<Regex> = OnceLock::new();
    INTER_TAG.get_or_init(|| Regex::new(r">\s+<").expect("Invalid whitespace regex"))
}

/// Replace `range` of the current text with `insert`.
struct Edit {
    range: Range<usize>,
    insert: &'static str,
}

impl Edit {
    fn insert(at: usize, insert: &'static str) -> Self {
        Self {
            range: at..at,
            insert,
        }
    }

    fn delete(range: Range<usize>) -> Self {
        Self { range, insert: "" }
    }
}

/// Repaired text plus the raw byte range behind each of its bytes.
///
/// Inserted bytes cover an empty raw range at the insertion point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired {
    pub text: String,
    starts: Vec<usize>,
    ends: Vec<usize>,
}

impl Repaired {
    fn identity(s: &str) -> Self {
        Self {
            text: s.to_string(),
            starts: (0..s.len()).collect(),
            ends: (1..=s.len()).collect(),
        }
    }

    /// Raw offset of the boundary before repaired byte `i`.
    fn raw_offset(&self, i: usize) -> usize {
        match self.starts.get(i) {
            Some(&start) => start,
            None => self.ends.last().copied().unwrap_or(0),
        }
    }

    /// Maps a span of [`Repaired::text`] onto the raw input.
    pub fn raw_span(&self, span: Span) -> Span {
        if span.is_empty() {
            let at = self.raw_offset(span.start);
            return Span::new(at, at);
        }
        Span::new(self.starts[span.start], self.ends[span.end - 1])
    }

    /// Applies non-overlapping edits given in text order.
    fn apply(self, edits: impl IntoIterator<Item = Edit>) -> Self {
        let mut text = String::with_capacity(self.text.len());
        let mut starts = Vec::with_capacity(self.starts.len());
        let mut ends = Vec::with_capacity(self.ends.len());
        let mut pos = 0;

        for edit in edits {
            debug_assert!(edit.range.start >= pos, "edits overlap");
            text.push_str(&self.text[pos..edit.range.start]);
            starts.extend_from_slice(&self.starts[pos..edit.range.start]);
            ends.extend_from_slice(&self.ends[pos..edit.range.start]);

            let at = self.raw_offset(edit.range.start);
            text.push_str(edit.insert);
            starts.extend(iter::repeat_n(at, edit.insert.len()));
            ends.extend(iter::repeat_n(at, edit.insert.len()));
            pos = edit.range.end;
        }

        text.push_str(&self.text[pos..]);
        starts.extend_from_slice(&self.starts[pos..]);
        ends.extend_from_slice(&self.ends[pos..]);
        Self { text, starts, ends }
    }
}

/// Repairs common producer mistakes in quiz markup.
///
/// - closes `</form` / `</div` end tags missing their `>`
/// - self-closes bare `<input ...>` tags (unless an explicit `</input>` follows)
/// - collapses whitespace runs between adjacent tags
/// - trims the result
pub fn repair(s: &str) -> Repaired {
    let mut out = Repaired::identity(s);

    let edits: Vec<Edit> = end_tag_regex()
        .captures_iter(&out.text)
        .filter(|caps| caps.get(2).is_none())
        .filter_map(|caps| Some(Edit::insert(caps.get(0)?.end(), ">")))
        .collect();
    out = out.apply(edits);

    let edits: Vec<Edit> = input_tag_regex()
        .captures_iter(&out.text)
        .filter(|caps| caps.get(2).is_none())
        .filter_map(|caps| Some(Edit::insert(caps.get(1)?.end(), "/")))
        .collect();
    out = out.apply(edits);

    let edits: Vec<Edit> = inter_tag_whitespace_regex()
        .find_iter(&out.text)
        .map(|m| Edit::delete(m.start() + 1..m.end() - 1))
        .collect();
    out = out.apply(edits);

    let text = out.text.as_str();
    let start = text.len() - text.trim_start().len();
    let end = start + text[start..].trim_end().len();
    let edits: Vec<Edit> = [0..start, end..text.len()]
        .into_iter()
        .filter(|r| !r.is_empty())
        .map(Edit::delete)
        .collect();
    out.apply(edits)
}
