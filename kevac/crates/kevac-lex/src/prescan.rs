//! Error pre-scan - structural validation before tokenisation.
//!
//! One linear sweep rejects sources violating global invariants, so the
//! classifier can reason locally afterwards: delimiters match in LIFO
//! order, backtick strings and block comments are closed, backslashes
//! have a graphic follower, and every colon respects the placement
//! rules. The bracket-match stack is borrowed from chain-allocator
//! scratch sized to the source and released when the sweep ends.
//!
//! Only word-initial characters are inspected; since every special
//! character forms its own word, every delimiter, colon, backslash and
//! comment opener is word-initial.

use kevac_util::{Chain, DiagnosticCode, Handler, Span};
use thiserror::Error;

use crate::chars::{
    delimiter_match, is_command, is_delimiter_close, is_delimiter_open, is_graph,
};
use crate::scan;
use crate::source::Source;

/// Structural violations detected before tokenisation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PrescanError {
    #[error("unmatched delimiter at byte {at}")]
    Delimiter { at: usize },
    #[error("string literal not closed before end of source")]
    UnclosedString,
    #[error("block comment not closed before end of source")]
    UnclosedComment,
    #[error("backslash not followed by a graphic character at byte {at}")]
    Backslash { at: usize },
    #[error("misplaced colon at byte {at}")]
    Colon { at: usize },
}

impl PrescanError {
    fn code(&self) -> DiagnosticCode {
        match self {
            PrescanError::Delimiter { .. } => DiagnosticCode::E_PRESCAN_DELIMITER,
            PrescanError::UnclosedString => DiagnosticCode::E_PRESCAN_STRING,
            PrescanError::UnclosedComment => DiagnosticCode::E_PRESCAN_COMMENT,
            PrescanError::Backslash { .. } => DiagnosticCode::E_PRESCAN_BACKSLASH,
            PrescanError::Colon { .. } => DiagnosticCode::E_PRESCAN_COLON,
        }
    }
}

fn fail(handler: &Handler, span: Span, error: PrescanError) -> Result<(), PrescanError> {
    handler
        .build_error(span, error.to_string())
        .code(error.code())
        .emit(handler);
    Err(error)
}

/// Validate the source, failing on the first violation.
pub fn scan(source: &Source, handler: &Handler) -> Result<(), PrescanError> {
    let mut scratch: Chain<u8> = Chain::new(source.len() + 1);
    let stack = scratch.scratch(source.len() + 1).unwrap_or_default();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut pos = 0usize;

    while let Some(word) = scan::next_word(source, pos) {
        pos = word.end;
        let at = word.start;
        let c = source.at(at);

        if c == b'\\' && !is_graph(source.at(at + 1)) {
            return fail(handler, Span::at(at), PrescanError::Backslash { at });
        } else if is_delimiter_open(c) {
            stack[depth] = c;
            depth += 1;
        } else if is_delimiter_close(c) {
            if depth == 0 || !delimiter_match(stack[depth - 1], c) {
                return fail(handler, Span::at(at), PrescanError::Delimiter { at });
            }
            depth -= 1;
        } else if c == b':' {
            let previous = if at == 0 { 0 } else { source.at(at - 1) };
            let next = source.at(at + 1);
            // a colon may not touch the end of the source or another colon
            if next == 0 || next == b':' {
                return fail(handler, Span::at(at), PrescanError::Colon { at });
            }
            // nor sit with no graphic character on either side
            if !is_graph(previous) && !is_graph(next) {
                return fail(handler, Span::at(at), PrescanError::Colon { at });
            }
            // at the start of a lone run, only a command character, a
            // name-initial letter, `(`, `[` or `&` may follow
            if !is_graph(previous)
                && !is_command(next)
                && !next.is_ascii_alphabetic()
                && next != b'('
                && next != b'['
                && next != b'&'
            {
                return fail(handler, Span::at(at), PrescanError::Colon { at });
            }
        } else if !in_string && c == b'!' {
            if source.at(at + 1) == b'-' && source.at(at + 2) == b'-' {
                let mut skip = at + 3;
                while source.at(skip) != 0 && source.at(skip) != b'\n' {
                    skip += 1;
                }
                pos = skip;
            }
        } else if !in_string && c == b'|' {
            if source.at(at + 1) == b'-' && source.at(at + 2) == b'-' {
                let mut skip = at + 3;
                loop {
                    if source.at(skip) == 0 {
                        return fail(handler, Span::at(at), PrescanError::UnclosedComment);
                    }
                    if source.at(skip) == b'-'
                        && source.at(skip + 1) == b'-'
                        && source.at(skip + 2) == b'|'
                    {
                        pos = skip + 3;
                        break;
                    }
                    skip += 1;
                }
            }
        }

        if c == b'`' {
            in_string = !in_string;
        }
    }

    if depth != 0 {
        return fail(
            handler,
            Span::at(source.len()),
            PrescanError::Delimiter { at: source.len() },
        );
    }
    if in_string {
        return fail(handler, Span::at(source.len()), PrescanError::UnclosedString);
    }

    log::trace!("prescan ok: {} bytes", source.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> Result<(), PrescanError> {
        scan(&Source::new(text), &Handler::new())
    }

    #[test]
    fn test_accepts_plain_source() {
        assert_eq!(check(""), Ok(()));
        assert_eq!(check("foo bar"), Ok(()));
        assert_eq!(check("#main:bar { }"), Ok(()));
    }

    #[test]
    fn test_delimiters_match_lifo() {
        assert_eq!(check("( [ { } ] )"), Ok(()));
        assert_eq!(check("(]"), Err(PrescanError::Delimiter { at: 1 }));
        assert_eq!(check(")"), Err(PrescanError::Delimiter { at: 0 }));
    }

    #[test]
    fn test_unmatched_open_fails_at_end() {
        assert_eq!(check("("), Err(PrescanError::Delimiter { at: 1 }));
    }

    #[test]
    fn test_string_closure() {
        assert_eq!(check("`hello`"), Ok(()));
        assert_eq!(check("`unterminated"), Err(PrescanError::UnclosedString));
    }

    #[test]
    fn test_string_suppresses_comment_openers() {
        assert_eq!(check("`a |-- b` x"), Ok(()));
    }

    #[test]
    fn test_comments() {
        assert_eq!(check("!-- anything ( ` :\nx"), Ok(()));
        assert_eq!(check("|-- anything ( ` : --| x"), Ok(()));
        assert_eq!(check("|-- open"), Err(PrescanError::UnclosedComment));
    }

    #[test]
    fn test_backslash_needs_graphic_follower() {
        assert_eq!(check("\\x"), Ok(()));
        assert_eq!(check("\\ x"), Err(PrescanError::Backslash { at: 0 }));
        assert_eq!(check("x \\"), Err(PrescanError::Backslash { at: 2 }));
    }

    #[test]
    fn test_colon_rules() {
        assert_eq!(check("::"), Err(PrescanError::Colon { at: 0 }));
        assert_eq!(check("x :"), Err(PrescanError::Colon { at: 2 }));
        assert_eq!(check("x : y"), Err(PrescanError::Colon { at: 2 }));
        assert_eq!(check("x:y"), Ok(()));
    }

    #[test]
    fn test_lone_run_colon_follower_set() {
        assert_eq!(check(":foo"), Ok(()));
        assert_eq!(check(":[default]"), Ok(()));
        assert_eq!(check(":( x )"), Ok(()));
        assert_eq!(check(":&x"), Ok(()));
        assert_eq!(check(":#"), Ok(()));
        assert_eq!(check(":1"), Err(PrescanError::Colon { at: 0 }));
        assert_eq!(check(":*x"), Err(PrescanError::Colon { at: 0 }));
    }

    #[test]
    fn test_colon_attached_left_is_free() {
        // leveling clusters hang off a colon with a graphic left side
        assert_eq!(check("x:*&y"), Ok(()));
    }

    #[test]
    fn test_diagnostics_are_emitted() {
        let handler = Handler::new();
        let result = scan(&Source::new("::"), &handler);
        assert!(result.is_err());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(
            handler.diagnostics()[0].code,
            Some(DiagnosticCode::E_PRESCAN_COLON)
        );
    }
}
