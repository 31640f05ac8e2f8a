//! Literal classification - numbers, strings and character literals.

use kevac_util::Span;

use crate::chars::{is_graph, is_special, is_xdigit};
use crate::scan::Word;
use crate::token::{LiteralKind, Token};
use crate::{LexError, Lexer};

impl<'src> Lexer<'src> {
    /// Literal forms:
    ///
    /// - numbers: a leading `0` takes a base marker (`b`/`B`, `o`/`O`,
    ///   `x`/`X`) with at least one hex digit after it; the body is hex
    ///   digits and `` ` `` separators, must not end with a separator,
    ///   and must be followed by a blank or a special symbol;
    /// - strings: `` `...` ``, the emitted range excludes the delimiters;
    /// - characters: `'...'`, the emitted range excludes the delimiters.
    ///
    /// Malformations are latched, not returned: a later predicate may
    /// still match the word textually, but the lex fails regardless.
    pub(crate) fn try_literal(&mut self, word: Word) -> bool {
        let source = self.source;
        let start = word.start;
        let first = source.at(start);

        if first.is_ascii_digit() {
            let mut pos = start + 1;
            if first == b'0' && !source.at(pos).is_ascii_digit() {
                match source.at(pos) {
                    b'b' | b'B' | b'o' | b'O' | b'x' | b'X' => {
                        pos += 1;
                        if !is_xdigit(source.at(pos)) {
                            self.latch(Span::at(start), LexError::MalformedNumber { at: start });
                            return false;
                        }
                    }
                    _ => {
                        self.latch(Span::at(start), LexError::UnknownBase { at: start });
                        return false;
                    }
                }
            }
            while is_xdigit(source.at(pos)) || source.at(pos) == b'`' {
                pos += 1;
            }
            // no trailing separator, and the follower must be a blank
            // or a special symbol
            if source.at(pos - 1) == b'`' || (is_graph(source.at(pos)) && !is_special(source.at(pos)))
            {
                self.latch(
                    Span::new(start, pos),
                    LexError::MalformedNumber { at: start },
                );
                return false;
            }

            self.emit(Token::literal(LiteralKind::Number, start, pos));
            self.pos = pos;
            self.clear_previous();
            return true;
        }

        if first == b'`' {
            return self.delimited_literal(start, b'`', LiteralKind::String);
        }
        if first == b'\'' {
            return self.delimited_literal(start, b'\'', LiteralKind::Character);
        }

        false
    }

    fn delimited_literal(&mut self, start: usize, delimiter: u8, kind: LiteralKind) -> bool {
        let source = self.source;
        let mut pos = start + 1;
        while source.at(pos) != 0 && source.at(pos) != delimiter {
            pos += 1;
        }
        if source.at(pos) != delimiter {
            self.latch(Span::at(start), LexError::UnclosedLiteral { at: start });
            return false;
        }

        self.emit(Token::literal(kind, start + 1, pos));
        self.pos = pos + 1;
        self.clear_previous();
        true
    }
}
