pub mod ast;
pub mod describe;
pub mod flags;
pub mod parser;
pub mod warnings;

pub use ast::{GroupKind, PatternToken, TokenKind, visit};
pub use describe::{BeginnerDescription, beginner_description};
pub use flags::{Flags, FlagsError};
pub use parser::{MAX_GROUP_DEPTH, tokenize};
pub use warnings::{Analysis, LARGE_REPEAT_LIMIT, analyze_warnings};
