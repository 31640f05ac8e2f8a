//! kevac-lex - Error pre-scan and two-pass lexer for the Keva language.
//!
//! Keva's distinguishing syntactic feature is the colon as a positional
//! pivot: lexemes classify as Left, Right, fused (`name:name`), or
//! bracket-qualified variants of those, next to commands (`#`, `@`),
//! literals, identifiers and plain punctuation.
//!
//! Lexing is two passes over one byte buffer:
//!
//! 1. the [`prescan`] sweep rejects sources that break global structure
//!    (delimiter matching, string and comment closure, colon placement),
//!    so the classifier can reason locally;
//! 2. the [`Lexer`] classifies word after word by a fixed priority
//!    order, expanding operator clusters into multiple tokens, and
//!    builds the token array in a chain allocator with NO sentinels at
//!    both ends.
//!
//! All errors are fatal to the phase: the partial token array is
//! destroyed, the typed error is returned and a diagnostic lands in the
//! [`kevac_util::Handler`].
//!
//! # Examples
//!
//! ```
//! use kevac_lex::{tokenize, Source, TokenKind};
//! use kevac_util::Handler;
//!
//! let handler = Handler::new();
//! let tokens = tokenize(&Source::new("#main:( x:int ) :res { }"), &handler).unwrap();
//! assert_eq!(tokens[1].kind, TokenKind::Command);
//! ```

pub mod chars;
mod edge_cases;
mod lexer;
pub mod prescan;
mod scan;
mod source;
mod token;

pub use lexer::{tokenize, LexError, Lexer, TOKENS_CHUNK};
pub use prescan::PrescanError;
pub use source::Source;
pub use token::{
    LiteralKind, Punct, QlFlags, QrFlags, Subtype, Token, TokenKind, TokenRange, TokenStream,
};
