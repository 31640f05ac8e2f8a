//! Diagnostic codes for categorizing front-end errors.
//!
//! Codes follow the format `{prefix}{number}` and are grouped per phase:
//! E01xx for the structural pre-scan, E02xx for the lexer, E03xx for the
//! parser.
//!
//! # Examples
//!
//! ```
//! use kevac_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_PRESCAN_DELIMITER;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.as_str(), "E0101");
//! ```

/// A unique code identifying a diagnostic message
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix ("E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g. "E0101")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // PRE-SCAN CODES (E0101-E0199)
    // =========================================================================

    /// E0101: unmatched or mismatched delimiter
    pub const E_PRESCAN_DELIMITER: Self = Self::new("E", 101);
    /// E0102: backtick string not closed before end of source
    pub const E_PRESCAN_STRING: Self = Self::new("E", 102);
    /// E0103: block comment not closed before end of source
    pub const E_PRESCAN_COMMENT: Self = Self::new("E", 103);
    /// E0104: backslash not followed by a graphic character
    pub const E_PRESCAN_BACKSLASH: Self = Self::new("E", 104);
    /// E0105: colon placement violation
    pub const E_PRESCAN_COLON: Self = Self::new("E", 105);

    // =========================================================================
    // LEXER CODES (E0201-E0299)
    // =========================================================================

    /// E0201: unknown base marker in a number literal
    pub const E_LEX_UNKNOWN_BASE: Self = Self::new("E", 201);
    /// E0202: malformed number literal
    pub const E_LEX_MALFORMED_NUMBER: Self = Self::new("E", 202);
    /// E0203: unclosed string or character literal
    pub const E_LEX_UNCLOSED_LITERAL: Self = Self::new("E", 203);
    /// E0204: unrecognised qualifier word inside brackets
    pub const E_LEX_UNKNOWN_QUALIFIER: Self = Self::new("E", 204);
    /// E0205: no classification matched
    pub const E_LEX_UNRECOGNIZED: Self = Self::new("E", 205);

    // =========================================================================
    // PARSER CODES (E0301-E0399)
    // =========================================================================

    /// E0301: scope opened but never closed, or closed without opening
    pub const E_PARSE_UNMATCHED_SCOPE: Self = Self::new("E", 301);
    /// E0302: malformed identification block
    pub const E_PARSE_MALFORMED_IDENTIFICATION: Self = Self::new("E", 302);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_code() {
        let code = DiagnosticCode::new("E", 101);
        assert_eq!(code.prefix(), "E");
        assert_eq!(code.number(), 101);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(DiagnosticCode::new("E", 101).as_str(), "E0101");
        assert_eq!(DiagnosticCode::new("W", 1).as_str(), "W0001");
    }

    #[test]
    fn test_display_and_debug() {
        let code = DiagnosticCode::E_LEX_UNKNOWN_BASE;
        assert_eq!(format!("{}", code), "E0201");
        assert_eq!(format!("{:?}", code), "DiagnosticCode(E0201)");
    }

    #[test]
    fn test_phase_grouping() {
        assert!(DiagnosticCode::E_PRESCAN_COLON.number() < 200);
        assert!(DiagnosticCode::E_LEX_UNRECOGNIZED.number() < 300);
        assert!(DiagnosticCode::E_PARSE_UNMATCHED_SCOPE.number() >= 300);
    }

    #[test]
    fn test_code_equality() {
        assert_eq!(
            DiagnosticCode::E_PRESCAN_STRING,
            DiagnosticCode::new("E", 102)
        );
        assert_ne!(
            DiagnosticCode::E_PRESCAN_STRING,
            DiagnosticCode::E_PRESCAN_COMMENT
        );
    }
}
