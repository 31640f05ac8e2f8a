//! QL, QR and QLR classification - bracketed qualifier clusters.
//!
//! A bracket body is a whitespace-separated sequence of qualifier
//! words; their flags OR into one token. `[..]` hugging anything that
//! is not a qualifier cluster poisons the lex through the error latch,
//! even when a later predicate matches the bracket textually.

use kevac_util::Span;

use crate::chars::is_graph;
use crate::scan;
use crate::token::{QlFlags, QrFlags, Token};
use crate::{LexError, Lexer};

/// Qualifier words recognised on the left of a pivot.
const QL_WORDS: &[(&[u8], QlFlags)] = &[
    (b"entry", QlFlags::ENTRY),
    (b"inc", QlFlags::INC),
    (b"mut", QlFlags::MUT),
];

/// Qualifier words recognised on the right of a pivot.
const QR_WORDS: &[(&[u8], QrFlags)] = &[(b"default", QrFlags::DEFAULT), (b"inc", QrFlags::INC)];

fn ql_word_flag(word: &[u8]) -> Option<QlFlags> {
    QL_WORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|&(_, flag)| flag)
}

fn qr_word_flag(word: &[u8]) -> Option<QrFlags> {
    QR_WORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|&(_, flag)| flag)
}

/// A parsed `[word ...]` cluster: combined flags, the content range,
/// and the position right after the closing bracket.
struct Cluster<F> {
    flags: F,
    content_start: usize,
    content_end: usize,
    end: usize,
}

impl<'src> Lexer<'src> {
    fn get_ql(&self, start: usize) -> Option<Cluster<QlFlags>> {
        let source = self.source;
        if source.at(start) != b'[' {
            return None;
        }
        let content_start = start + 1;
        let mut flags = QlFlags::empty();
        let mut content_end = content_start;
        let mut pos = start + 1;
        loop {
            let word = scan::next_word(source, pos)?;
            flags |= ql_word_flag(source.slice(word.start, word.end))?;
            content_end = word.end;
            pos = word.end;
            if source.at(pos) == b']' {
                break;
            }
        }
        Some(Cluster {
            flags,
            content_start,
            content_end,
            end: pos + 1,
        })
    }

    fn get_qr(&self, start: usize) -> Option<Cluster<QrFlags>> {
        let source = self.source;
        if source.at(start) != b':' || source.at(start + 1) != b'[' {
            return None;
        }
        let content_start = start + 2;
        let mut flags = QrFlags::empty();
        let mut content_end = content_start;
        let mut pos = start + 2;
        loop {
            let word = scan::next_word(source, pos)?;
            flags |= qr_word_flag(source.slice(word.start, word.end))?;
            content_end = word.end;
            pos = word.end;
            if source.at(pos) == b']' {
                break;
            }
        }
        Some(Cluster {
            flags,
            content_start,
            content_end,
            end: pos + 1,
        })
    }

    /// QL: `[entry inc mut]`, with an optional absorbed colon opening a
    /// QR position.
    pub(crate) fn try_ql(&mut self, start: usize) -> bool {
        let source = self.source;
        let Some(cluster) = self.get_ql(start) else {
            // a bracket glued to something unrecognised is an error even
            // if a later predicate matches
            if is_graph(source.at(start + 1)) {
                self.latch(Span::at(start), LexError::UnknownQualifier { at: start });
            }
            return false;
        };

        let mut end = cluster.end;
        if is_graph(source.at(end)) && source.at(end) != b':' {
            self.latch(Span::at(start), LexError::UnknownQualifier { at: start });
            return false;
        }
        if source.at(end) == b':' {
            end += 1;
        }
        if is_graph(source.at(end)) {
            // the QLR predicate owns this shape
            return false;
        }

        self.emit(Token::qualifier_left(
            cluster.flags,
            cluster.content_start,
            cluster.content_end,
        ));
        self.pos = end;
        self.clear_previous();
        true
    }

    /// QR: `:[default inc]`.
    pub(crate) fn try_qr(&mut self, start: usize) -> bool {
        let Some(cluster) = self.get_qr(start) else {
            return false;
        };
        if is_graph(self.source.at(cluster.end)) {
            return false;
        }

        self.emit(Token::qualifier_right(
            cluster.flags,
            cluster.content_start,
            cluster.content_end,
        ));
        self.pos = cluster.end;
        self.clear_previous();
        true
    }

    /// QLR: a QL cluster directly joined to a QR cluster.
    pub(crate) fn try_qlr(&mut self, start: usize) -> bool {
        let Some(left) = self.get_ql(start) else {
            return false;
        };
        let Some(right) = self.get_qr(left.end) else {
            return false;
        };
        if is_graph(self.source.at(right.end)) {
            return false;
        }

        self.emit(Token::qualifier_both(
            left.flags,
            right.flags,
            left.content_start,
            left.content_end,
            right.content_start,
            right.content_end,
        ));
        self.pos = right.end;
        self.clear_previous();
        true
    }
}
