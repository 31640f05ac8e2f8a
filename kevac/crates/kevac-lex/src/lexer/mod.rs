//! The classification engine.
//!
//! The lexer walks the source word by word and tries, in a fixed
//! priority order, the predicates that turn a word into tokens:
//!
//! 1. command, 2. QL, 3. L, 4. QR, 5. R (with its operator-modifier
//! chain), 6. QLR, 7. LR, 8. PL, 9. literal, 10. special (escapes,
//! leveling clusters, parenthesis rebalance, lonely colon), 11.
//! identifier.
//!
//! Qualifier brackets come before names so `[mut]` reads as a qualifier
//! rather than a `[` and an identifier; R comes before QLR and LR so a
//! lone `:x` is never half of a missing LR.
//!
//! Look-behind is explicit classifier state, not re-reading of
//! `tokens[i - 1]`: `previous_is_command` and `previous_is_modifier`
//! are updated after each emission, because a cluster emits several
//! tokens whose "previous" meaning differs from array-previous.
//!
//! Errors found inside speculative sub-parsers land in a latch and
//! fail the lex after the word's classification chain has run, even if
//! a later predicate matched textually.

mod literal;
mod pivot;
mod qualifier;
mod special;

use kevac_util::{Chain, DiagnosticCode, Handler, Span};
use thiserror::Error;

use crate::chars::{is_command, is_graph, is_special, is_valid_name};
use crate::prescan::{self, PrescanError};
use crate::scan::{self, Word};
use crate::source::Source;
use crate::token::{Punct, Token, TokenKind, TokenStream};

/// Tokens per allocator chunk.
pub const TOKENS_CHUNK: usize = 4096;

/// Failures of the lexical phase. All are fatal: the partial token
/// array is destroyed and nothing is recovered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error(transparent)]
    Prescan(#[from] PrescanError),
    #[error("unknown base marker in number literal at byte {at}")]
    UnknownBase { at: usize },
    #[error("malformed number literal at byte {at}")]
    MalformedNumber { at: usize },
    #[error("literal not closed before end of source (opened at byte {at})")]
    UnclosedLiteral { at: usize },
    #[error("unrecognised qualifier word in bracket at byte {at}")]
    UnknownQualifier { at: usize },
    #[error("unrecognised token at byte {at}")]
    Unrecognized { at: usize },
}

/// The classification engine. See the module docs for the predicate
/// order; construction is cheap, all work happens in [`Lexer::run`].
pub struct Lexer<'src> {
    pub(crate) source: &'src Source,
    pub(crate) handler: &'src Handler,
    pub(crate) tokens: Chain<Token>,
    /// Scan cursor; every emitting branch advances it past what it
    /// consumed.
    pub(crate) pos: usize,
    /// The token just emitted was a command.
    pub(crate) previous_is_command: bool,
    /// The emission just finished was a leveling cluster.
    pub(crate) previous_is_modifier: bool,
    /// Syntactic `(`-nesting; `)` at zero closes a `:( ... )` grouping.
    pub(crate) paren_nest: i32,
    /// Error latch for speculative sub-parsers.
    pub(crate) pending: Option<LexError>,
}

/// Lex a source into a token stream.
///
/// # Examples
///
/// ```
/// use kevac_lex::{tokenize, Source, TokenKind};
/// use kevac_util::Handler;
///
/// let handler = Handler::new();
/// let tokens = tokenize(&Source::new("#foo:bar"), &handler).unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![TokenKind::Command, TokenKind::L, TokenKind::R]);
/// ```
pub fn tokenize(source: &Source, handler: &Handler) -> Result<TokenStream, LexError> {
    Lexer::new(source, handler).run()
}

impl<'src> Lexer<'src> {
    /// Create a lexer with the default chunk size.
    pub fn new(source: &'src Source, handler: &'src Handler) -> Self {
        Self::with_chunk_len(source, handler, TOKENS_CHUNK)
    }

    /// Create a lexer with an explicit allocator chunk size.
    ///
    /// The emitted token sequence does not depend on the chunk size;
    /// this constructor exists so tests can prove it.
    pub fn with_chunk_len(source: &'src Source, handler: &'src Handler, chunk_len: usize) -> Self {
        Self {
            source,
            handler,
            tokens: Chain::new(chunk_len),
            pos: 0,
            previous_is_command: false,
            previous_is_modifier: false,
            paren_nest: 0,
            pending: None,
        }
    }

    /// Run the pre-scan and the classification loop.
    pub fn run(mut self) -> Result<TokenStream, LexError> {
        prescan::scan(self.source, self.handler)?;

        // index 0 is reserved for a NO sentinel: classifiers inspect
        // tokens[i - 1]
        self.tokens.push(Token::default());

        self.lex_prefix();

        while let Some(word) = self.next_word() {
            let outcome = self.classify(word);
            if let Some(error) = self.pending.take() {
                return Err(error);
            }
            outcome?;
        }

        self.tokens.push(Token::default());
        self.tokens.release_tail();

        let count = self.tokens.len() - 2;
        log::debug!("lexed {} tokens from {} bytes", count, self.source.len());
        Ok(TokenStream {
            tokens: self.tokens,
            count,
        })
    }

    /// The leading-colon special case: a source beginning with `:` gets
    /// a QR attempt, then an R attempt, before the main loop, so no L
    /// candidate ever has to look at `source[start - 1]` underflowing.
    fn lex_prefix(&mut self) {
        if self.source.at(0) != b':' {
            return;
        }
        if self.try_qr(0) {
            return;
        }
        let word = scan::word_at(self.source, 0);
        let _ = self.try_r(word);
    }

    /// Next word at the cursor, with comments skipped.
    fn next_word(&mut self) -> Option<Word> {
        let mut word = scan::next_word(self.source, self.pos)?;
        while let Some(after) = scan::comment_at(self.source, word.start) {
            self.pos = after;
            word = scan::next_word(self.source, self.pos)?;
        }
        Some(word)
    }

    /// Classify one word, emitting one or more tokens.
    fn classify(&mut self, word: Word) -> Result<(), LexError> {
        let start = word.start;
        let first = self.source.at(start);

        // 1. command
        if is_command(first) {
            if let Some(punct) = Punct::from_byte(first) {
                self.emit(Token::special_shaped(TokenKind::Command, punct, start));
            }
            self.pos = start + 1;
            self.previous_is_command = true;
            self.previous_is_modifier = false;
            return Ok(());
        }
        // 2. QL, only for a bracket with nothing graphic on its left
        if first == b'[' && !self.graph_before(start) && self.try_ql(start) {
            return Ok(());
        }
        // 3. L
        if self.try_l(word) {
            return Ok(());
        }
        // 4. QR
        if first == b':' && self.source.at(start + 1) == b'[' && self.try_qr(start) {
            return Ok(());
        }
        // 5. R
        if self.try_r(word) {
            return Ok(());
        }
        // 6. QLR, under the same left-side condition as QL
        if first == b'[' && !self.graph_before(start) && self.try_qlr(start) {
            return Ok(());
        }
        // 7. LR
        if self.try_lr(word) {
            return Ok(());
        }
        // 8. PL
        if first == b'.' && self.try_pl(word) {
            return Ok(());
        }
        // 9. literal
        if self.try_literal(word) {
            return Ok(());
        }
        // 10. special
        if is_special(first) {
            self.lex_special(word);
            return Ok(());
        }
        // 11. identifier
        if is_valid_name(self.source.slice(word.start, word.end)) {
            self.emit(Token::identifier(word.start, word.end));
            self.pos = word.end;
            self.clear_previous();
            return Ok(());
        }

        self.handler
            .build_error(
                Span::new(word.start, word.end),
                format!(
                    "unrecognised token `{}`",
                    self.source.text(word.start, word.end)
                ),
            )
            .code(DiagnosticCode::E_LEX_UNRECOGNIZED)
            .emit(self.handler);
        Err(LexError::Unrecognized { at: start })
    }

    /// True when a graphic character directly precedes `at`.
    pub(crate) fn graph_before(&self, at: usize) -> bool {
        at > 0 && is_graph(self.source.at(at - 1))
    }

    pub(crate) fn emit(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub(crate) fn clear_previous(&mut self) {
        self.previous_is_command = false;
        self.previous_is_modifier = false;
    }

    /// Latch an error found inside a speculative sub-parser. The first
    /// latched error wins; it fails the lex after the current word's
    /// classification chain has run.
    pub(crate) fn latch(&mut self, span: Span, error: LexError) {
        if self.pending.is_none() {
            self.handler
                .build_error(span, error.to_string())
                .code(match error {
                    LexError::UnknownBase { .. } => DiagnosticCode::E_LEX_UNKNOWN_BASE,
                    LexError::MalformedNumber { .. } => DiagnosticCode::E_LEX_MALFORMED_NUMBER,
                    LexError::UnclosedLiteral { .. } => DiagnosticCode::E_LEX_UNCLOSED_LITERAL,
                    LexError::UnknownQualifier { .. } => DiagnosticCode::E_LEX_UNKNOWN_QUALIFIER,
                    _ => DiagnosticCode::E_LEX_UNRECOGNIZED,
                })
                .emit(self.handler);
            self.pending = Some(error);
        }
    }
}
