//! rill-core: front end for the rill flow-simulation language.
//!
//! Program text goes through the tokenizer ([`lex`]) into a token
//! sequence, then through the backtracking parser ([`parse`]) into a
//! single parse tree rooted at a scope node. The tree is immutable and
//! is reused unmodified across every evaluation pass.
//!
//! The front end performs no semantic validation beyond grammar
//! matching; undeclared variables are the evaluator's concern (they
//! read as 0.0 by design).

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod tree;

pub use error::{SourceError, Stage};
pub use grammar::{alternatives, RuleName, Symbol};
pub use lexer::{lex, Token, TokenKind};
pub use parser::parse;
pub use tree::{ParseChild, ParseNode};
