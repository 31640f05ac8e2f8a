//! L, R, LR and PL classification - the colon-pivoted name forms.

use crate::chars::{is_graph, is_operator_modifier, is_special, is_valid_name};
use crate::scan::{self, Word};
use crate::token::{Punct, Token};
use crate::Lexer;

impl<'src> Lexer<'src> {
    /// L: a name standing immediately left of a colon pivot.
    ///
    /// A bare name with no pivot is an identifier, not an L. A name
    /// whose colon is followed by a letter is the left half of an LR
    /// lexeme instead, except right after a command, where LR never
    /// forms and the name keeps the pivot to itself.
    pub(crate) fn try_l(&mut self, word: Word) -> bool {
        let source = self.source;
        if self.previous_is_modifier {
            return false;
        }
        // a name preceded by an absorbed colon is an R continuation
        if word.start > 0 && source.at(word.start - 1) == b':' {
            return false;
        }
        if !is_valid_name(source.slice(word.start, word.end)) {
            return false;
        }
        if source.at(word.end) != b':' {
            return false;
        }
        let after_colon = source.at(word.end + 1);
        if !self.previous_is_command && after_colon.is_ascii_alphabetic() {
            return false;
        }

        self.emit(Token::left(word.start, word.end));
        self.pos = word.end;
        // absorb the colon when nothing to the right claims the pivot
        if !is_graph(after_colon) || (self.previous_is_command && after_colon.is_ascii_alphabetic())
        {
            self.pos = word.end + 1;
        }
        self.clear_previous();
        true
    }

    /// R: the right side of a colon pivot. Fires on `:name`, on a bare
    /// name right after a modifier cluster, and on a name whose colon
    /// was absorbed by the previous token.
    pub(crate) fn try_r(&mut self, word: Word) -> bool {
        let source = self.source;
        let named = is_valid_name(source.slice(word.start, word.end));

        if named && (self.previous_is_modifier || (word.start > 0 && source.at(word.start - 1) == b':'))
        {
            self.emit(Token::right(word.start, word.end));
            self.pos = word.end;
            self.lex_modifier_chain();
            self.clear_previous();
            return true;
        }

        if source.at(word.start) != b':' {
            return false;
        }
        // a special symbol after the colon belongs to the qualifier,
        // escape and leveling forms
        if is_special(source.at(word.end)) {
            return false;
        }
        let Some(name) = scan::next_word(source, word.start + 1) else {
            return false;
        };
        if !is_valid_name(source.slice(name.start, name.end)) {
            return false;
        }

        self.emit(Token::right(name.start, name.end));
        self.pos = name.end;
        self.lex_modifier_chain();
        self.clear_previous();
        true
    }

    /// Emit one R token per operator-modifier character clustered
    /// directly after an R.
    fn lex_modifier_chain(&mut self) {
        while is_operator_modifier(self.source.at(self.pos)) {
            if let Some(punct) = Punct::from_byte(self.source.at(self.pos)) {
                self.emit(Token::right_op(punct, self.pos));
            }
            self.pos += 1;
        }
    }

    /// LR: `name:name` as a single lexeme, with the second name glued
    /// to the colon. Never forms right after a command.
    pub(crate) fn try_lr(&mut self, word: Word) -> bool {
        if self.previous_is_command {
            return false;
        }
        let source = self.source;
        if !is_valid_name(source.slice(word.start, word.end)) {
            return false;
        }
        if source.at(word.end) != b':' || !is_graph(source.at(word.end + 1)) {
            return false;
        }
        let name = scan::word_at(source, word.end + 1);
        if !is_valid_name(source.slice(name.start, name.end)) {
            return false;
        }

        self.emit(Token::lr(word.start, word.end, name.start, name.end));
        self.pos = name.end;
        self.clear_previous();
        true
    }

    /// PL: a period-led name fragment, `.name`.
    pub(crate) fn try_pl(&mut self, word: Word) -> bool {
        let source = self.source;
        if source.at(word.start) != b'.' || !is_graph(source.at(word.start + 1)) {
            return false;
        }
        let name = scan::word_at(source, word.start + 1);
        if !is_valid_name(source.slice(name.start, name.end)) {
            return false;
        }

        self.emit(Token::period_left(name.start, name.end));
        self.pos = name.end;
        self.clear_previous();
        true
    }
}
