//! Tokenizes ECMAScript-style regular expressions into a nested token tree
//! for visualization, explains each token in plain language, and flags
//! constructs prone to catastrophic backtracking.
//!
//! Nothing here compiles or runs a pattern; every function is a pure
//! function of its input and never fails. Malformed input degrades to
//! literal tokens.

pub mod pattern;

pub use pattern::{
    Analysis, BeginnerDescription, Flags, FlagsError, GroupKind, PatternToken, TokenKind,
    analyze_warnings, beginner_description, tokenize,
};
