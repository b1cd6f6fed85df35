//! # Markup Scanning
//!
//! A tolerant, tag-aware scanner and an in-memory element tree for the small
//! HTML subset producers embed in chat text (forms, option divs, inputs,
//! answer containers).
//!
//! ## Phases
//!
//! 1. **Lexing** (`lexer`): the text is cut into open tags, close tags,
//!    comments and text runs. Every byte lands in exactly one token.
//! 2. **Tag parsing** (`tag`): an open tag's bytes become a name plus
//!    attributes.
//! 3. **Tree building** (`tree`): a stack of open elements nests tokens into
//!    `Node`s. Unmatched close tags are ignored, unclosed elements end at the
//!    enclosing close tag or at end of input.
//!
//! All nodes keep byte spans into the scanned text.

pub mod lexer;
pub mod tag;
pub mod tree;

pub use lexer::{Token, TokenKind, tokenize};
pub use tag::{Attribute, Tag};
pub use tree::{Element, Node, build_tree};
