//! kevac-util - Foundation types for the kevac front-end.
//!
//! Shared building blocks used by the lexer and parser crates:
//!
//! - [`span`] - byte-range source locations
//! - [`diagnostic`] - diagnostic records, codes and the collecting [`Handler`]
//! - [`chain`] - the chunked chain allocator backing the token and node arrays
//!
//! Everything here is single-threaded by design; the front-end processes one
//! source unit at a time and never shares an arena across threads.

pub mod chain;
pub mod diagnostic;
pub mod span;

pub use chain::{Chain, ChainMark};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use span::Span;
