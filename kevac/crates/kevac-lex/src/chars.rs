//! Character classification tables.
//!
//! The classifier's behaviour is parameterised by these sets; they are
//! data, referenced by name, not logic scattered through the lexer.
//! Classification is ASCII-only: bytes outside the graphic ASCII range
//! never satisfy any predicate here.

/// Operator characters that may cluster directly after an R (or before a
/// colon to form L), each emitted as its own token.
pub const OPERATOR_MODIFIERS: &[u8] = b"*+-&^~?!%";

/// The subset of modifiers that participates in colon-adjacent leveling
/// clusters.
pub const OPERATOR_LEVELING: &[u8] = b"*+-&";

/// Graphic ASCII, the class every word is made of.
#[inline]
pub fn is_graph(byte: u8) -> bool {
    byte.is_ascii_graphic()
}

/// Command characters, each introducing an identification.
#[inline]
pub fn is_command(byte: u8) -> bool {
    byte == b'#' || byte == b'@'
}

/// Special symbols: ASCII punctuation minus `_` and `$`, which count as
/// word bytes.
#[inline]
pub fn is_special(byte: u8) -> bool {
    byte.is_ascii_punctuation() && byte != b'_' && byte != b'$'
}

/// Bytes a word run is made of: graphic and not special.
#[inline]
pub fn is_word_byte(byte: u8) -> bool {
    is_graph(byte) && !is_special(byte)
}

#[inline]
pub fn is_operator_modifier(byte: u8) -> bool {
    OPERATOR_MODIFIERS.contains(&byte)
}

#[inline]
pub fn is_operator_leveling(byte: u8) -> bool {
    OPERATOR_LEVELING.contains(&byte)
}

/// Square brackets, which extend leveling runs.
#[inline]
pub fn is_bracket(byte: u8) -> bool {
    byte == b'[' || byte == b']'
}

#[inline]
pub fn is_delimiter_open(byte: u8) -> bool {
    matches!(byte, b'(' | b'[' | b'{')
}

#[inline]
pub fn is_delimiter_close(byte: u8) -> bool {
    matches!(byte, b')' | b']' | b'}')
}

/// Pairwise delimiter matching for the pre-scan stack.
#[inline]
pub fn delimiter_match(open: u8, close: u8) -> bool {
    matches!(
        (open, close),
        (b'(', b')') | (b'[', b']') | (b'{', b'}')
    )
}

/// Hexadecimal digit. Number bodies accept the full hex set regardless
/// of the base marker; base validation belongs to a later phase.
#[inline]
pub fn is_xdigit(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

/// A valid name: a leading letter followed by letters, digits or
/// underscores.
pub fn is_valid_name(bytes: &[u8]) -> bool {
    match bytes.split_first() {
        Some((&first, rest)) => {
            first.is_ascii_alphabetic()
                && rest
                    .iter()
                    .all(|&b| b.is_ascii_alphanumeric() || b == b'_')
        }
        None => false,
    }
}
