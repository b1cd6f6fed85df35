//! # Snapshot Testing Support
//!
//! Utilities for testing the segmenter via snapshot assertions and
//! invariant checks.
//!
//! - **`normalize`**: renders a [`ParsedMessage`](crate::ParsedMessage) as
//!   stable, line-oriented text for `insta` snapshots
//! - **`invariants`**: runtime checks for pipeline correctness (no empty
//!   quizzes, no blank labels, order and coverage of untouched text)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
