//! Diagnostic module - error reporting infrastructure.
//!
//! Phases report failures twice: a typed error travels up the `Result`
//! chain and aborts the phase, while a [`Diagnostic`] with a stable
//! [`DiagnosticCode`] lands in the [`Handler`] for whatever front end
//! renders it. Rendering itself lives outside this workspace.
//!
//! # Examples
//!
//! ```
//! use kevac_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Handler};
//! use kevac_util::span::Span;
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("colon followed by colon")
//!     .code(DiagnosticCode::E_PRESCAN_COLON)
//!     .span(Span::new(3, 4))
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! ```

mod builder;
mod codes;

pub use builder::DiagnosticBuilder;
pub use codes::DiagnosticCode;

use crate::span::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level
///
/// # Examples
///
/// ```
/// use kevac_util::diagnostic::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that aborts the current phase
    Error,
    /// A warning that does not abort anything
    Warning,
    /// Additional information about a diagnostic
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with severity, location and stable code
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Main diagnostic message
    pub message: String,
    /// Byte range in the offending source
    pub span: Span,
    /// Stable diagnostic code
    pub code: Option<DiagnosticCode>,
    /// Additional notes for context
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
        }
    }

    /// Create an error diagnostic
    ///
    /// # Examples
    ///
    /// ```
    /// use kevac_util::diagnostic::{Diagnostic, Level};
    /// use kevac_util::span::Span;
    ///
    /// let diag = Diagnostic::error("unmatched delimiter", Span::DUMMY);
    /// assert_eq!(diag.level, Level::Error);
    /// ```
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a note to the diagnostic
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Handler for collecting diagnostics
///
/// The `Handler` collects diagnostics across all phases run over one
/// source unit. It is not thread-safe; the front-end is single-threaded.
///
/// # Examples
///
/// ```
/// use kevac_util::diagnostic::{Diagnostic, Handler};
/// use kevac_util::span::Span;
///
/// let handler = Handler::new();
/// handler.emit_diagnostic(Diagnostic::error("unclosed string literal", Span::DUMMY));
///
/// assert_eq!(handler.error_count(), 1);
/// ```
pub struct Handler {
    /// Collected diagnostics
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emit a pre-built diagnostic
    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Create a diagnostic builder for an error at `span`
    ///
    /// # Examples
    ///
    /// ```
    /// use kevac_util::diagnostic::Handler;
    /// use kevac_util::span::Span;
    ///
    /// let handler = Handler::new();
    /// handler.build_error(Span::new(0, 1), "unrecognised token").emit(&handler);
    /// assert!(handler.has_errors());
    /// ```
    pub fn build_error(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).span(span)
    }

    /// Create a diagnostic builder for a warning at `span`
    pub fn build_warning(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).span(span)
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Get all diagnostics collected so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Clear all diagnostics
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(format!("{}", Level::Error), "error");
        assert_eq!(format!("{}", Level::Warning), "warning");
        assert_eq!(format!("{}", Level::Note), "note");
    }

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("boom", Span::DUMMY);
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.message, "boom");
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag =
            Diagnostic::error("boom", Span::DUMMY).with_code(DiagnosticCode::E_LEX_UNRECOGNIZED);
        assert_eq!(diag.code, Some(DiagnosticCode::E_LEX_UNRECOGNIZED));
    }

    #[test]
    fn test_diagnostic_with_note() {
        let diag = Diagnostic::error("boom", Span::DUMMY)
            .with_note("note 1")
            .with_note("note 2");
        assert_eq!(diag.notes, vec!["note 1", "note 2"]);
    }

    #[test]
    fn test_handler_starts_empty() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn test_handler_collects() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("one", Span::DUMMY));
        handler.emit_diagnostic(Diagnostic::warning("two", Span::DUMMY));

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.diagnostics().len(), 2);
    }

    #[test]
    fn test_handler_clear() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("one", Span::DUMMY));
        handler.clear();
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_handler_build_error() {
        let handler = Handler::new();
        handler
            .build_error(Span::new(2, 5), "bad number")
            .code(DiagnosticCode::E_LEX_MALFORMED_NUMBER)
            .emit(&handler);

        let diags = handler.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span, Span::new(2, 5));
        assert_eq!(diags[0].code, Some(DiagnosticCode::E_LEX_MALFORMED_NUMBER));
    }
}
