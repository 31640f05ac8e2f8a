//! Special-symbol classification - the last stop before identifiers.
//!
//! A word led by a special symbol is one of: a right escape (`:(` or
//! `` :` ``), a right or left leveling cluster, a rebalanced `)`, a
//! lonely colon, or a plain SPECIAL token. Leveling clusters expand
//! into one token per operator character.

use crate::chars::{is_bracket, is_operator_leveling};
use crate::scan::Word;
use crate::token::{Punct, Token, TokenKind};
use crate::Lexer;

impl<'src> Lexer<'src> {
    /// Classify a word whose first byte is a special symbol. Always
    /// emits at least one token.
    pub(crate) fn lex_special(&mut self, word: Word) {
        let source = self.source;
        let start = word.start;
        let first = source.at(start);

        if first == b':' {
            let next = source.at(start + 1);

            // `:(` opens a colon-introduced grouping; its `)` comes back
            // through the rebalance case below
            if next == b'(' {
                self.emit(Token::right_op(Punct::Lparenthesis, start + 1));
                self.pos = start + 2;
                self.clear_previous();
                return;
            }
            // ``:` `` keys the pivot's right side by the string literal
            // that follows; only the colon is consumed
            if next == b'`' {
                self.emit(Token::right_op(Punct::GraveAccent, start));
                self.pos = start + 1;
                self.clear_previous();
                return;
            }
            // right leveling cluster: one R token per operator
            if is_operator_leveling(next) || next == b'[' {
                let mut pos = start + 1;
                while is_operator_leveling(source.at(pos)) || is_bracket(source.at(pos)) {
                    if let Some(punct) = Punct::from_byte(source.at(pos)) {
                        self.emit(Token::right_op(punct, pos));
                    }
                    pos += 1;
                }
                self.pos = pos;
                self.previous_is_command = false;
                self.previous_is_modifier = true;
                return;
            }
            // a colon with no role on either side
            self.emit(Token::special_shaped(
                TokenKind::ColonLonely,
                Punct::Colon,
                start,
            ));
            self.pos = start + 1;
            self.clear_previous();
            return;
        }

        // left leveling cluster: operators whose run ends on a colon,
        // one L token per operator; the colon stays for the next word
        if is_operator_leveling(first) || first == b'[' {
            let mut pos = start + 1;
            while is_operator_leveling(source.at(pos)) || is_bracket(source.at(pos)) {
                pos += 1;
            }
            if source.at(pos) == b':' {
                for at in start..pos {
                    if let Some(punct) = Punct::from_byte(source.at(at)) {
                        self.emit(Token::left_op(punct, at));
                    }
                }
                self.pos = pos;
                self.previous_is_command = false;
                self.previous_is_modifier = true;
                return;
            }
        }

        // `)` with no syntactic nesting left closes a `:( ... )`
        // grouping
        if first == b')' && self.paren_nest == 0 {
            self.emit(Token::right_op(Punct::Rparenthesis, start));
            self.pos = start + 1;
            self.clear_previous();
            return;
        }

        if first == b'(' {
            self.paren_nest += 1;
        } else if first == b')' {
            self.paren_nest -= 1;
        }
        if let Some(punct) = Punct::from_byte(first) {
            self.emit(Token::special_shaped(TokenKind::Special, punct, start));
        }
        self.pos = start + 1;
        self.clear_previous();
    }
}
