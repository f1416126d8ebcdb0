//! Lexer and recursive-descent parser for the supported source subset.
//!
//! The parser delivers exactly what the decompiler consumes: a tree of closed
//! sum-type nodes, literal token text preserved verbatim, leading-comment
//! positions, and the line-start table behind the top-level adjacency
//! heuristic. Error recovery is deliberately minimal: malformed input is a
//! hard [`ParseError`](crate::error::ParseError), while whole constructs
//! outside the subset (e.g. `switch`) are consumed into `Unsupported` nodes so
//! decompilation of their neighbors continues.

pub mod grammar;
pub mod lexer;

pub use grammar::parse_source;
pub use lexer::{Token, TokenKind, tokenize};
