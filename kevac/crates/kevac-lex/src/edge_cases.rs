//! Edge case and property tests for kevac-lex

#[cfg(test)]
mod tests {
    use crate::token::{LiteralKind, Punct, QlFlags, QrFlags, Subtype, TokenKind};
    use crate::{tokenize, LexError, Lexer, PrescanError, Source, Token, TokenStream};
    use kevac_util::Handler;

    fn lex(text: &str) -> Result<Vec<Token>, LexError> {
        let handler = Handler::new();
        tokenize(&Source::new(text), &handler).map(|t| t.iter().copied().collect())
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text)
            .unwrap_or_else(|e| panic!("lex failed: {e}"))
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    fn stream(text: &str) -> TokenStream {
        let handler = Handler::new();
        tokenize(&Source::new(text), &handler).expect("lex failed")
    }

    // ==================== END-TO-END SHAPES ====================

    #[test]
    fn test_command_name_lock() {
        let tokens = lex("#foo:bar").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Command);
        assert_eq!(tokens[0].subtype, Subtype::Punct(Punct::Hash));
        assert_eq!(tokens[1].kind, TokenKind::L);
        assert_eq!(tokens[1].l_range(), (1, 4));
        assert_eq!(tokens[2].kind, TokenKind::R);
        assert_eq!(tokens[2].r_range(), (5, 8));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_qualifier_then_identifier() {
        let tokens = lex("[mut inc] foo").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ql);
        assert_eq!(
            tokens[0].subtype,
            Subtype::Qualifier {
                ql: QlFlags::MUT | QlFlags::INC,
                qr: QrFlags::empty(),
            }
        );
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_fused_qualifier_then_identifier() {
        let tokens = lex("[entry]:[default] x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Qlr);
        assert_eq!(
            tokens[0].subtype,
            Subtype::Qualifier {
                ql: QlFlags::ENTRY,
                qr: QrFlags::DEFAULT,
            }
        );
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_hex_literal() {
        let tokens = lex("0x1F").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].subtype, Subtype::Literal(LiteralKind::Number));
        assert_eq!(tokens[0].extent(), (0, 4));
    }

    #[test]
    fn test_string_literal() {
        let tokens = lex("`hello`").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].subtype, Subtype::Literal(LiteralKind::String));
        assert_eq!(tokens[0].extent(), (1, 6));
    }

    #[test]
    fn test_modifier_chain() {
        let tokens = lex(":foo*+-").unwrap();
        assert_eq!(tokens.len(), 4);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::R));
        assert_eq!(tokens[0].r_range(), (1, 4));
        assert_eq!(tokens[1].subtype, Subtype::Punct(Punct::Asterisk));
        assert_eq!(tokens[2].subtype, Subtype::Punct(Punct::Plus));
        assert_eq!(tokens[3].subtype, Subtype::Punct(Punct::Minus));
    }

    #[test]
    fn test_comment_consumed() {
        assert_eq!(kinds("!-- comment\nx"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_unmatched_open_rejected() {
        assert_eq!(
            lex("("),
            Err(LexError::Prescan(PrescanError::Delimiter { at: 1 }))
        );
    }

    #[test]
    fn test_double_colon_rejected() {
        assert_eq!(
            lex("::"),
            Err(LexError::Prescan(PrescanError::Colon { at: 0 }))
        );
    }

    #[test]
    fn test_unterminated_string_rejected() {
        assert_eq!(
            lex("`unterminated"),
            Err(LexError::Prescan(PrescanError::UnclosedString))
        );
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_empty_source() {
        let tokens = stream("");
        assert_eq!(tokens.len(), 0);
        assert!(tokens.is_empty());
        assert_eq!(tokens.raw_len(), 2);
    }

    #[test]
    fn test_blank_source() {
        assert_eq!(stream(" \t\n  ").len(), 0);
    }

    #[test]
    fn test_comment_only_source() {
        assert_eq!(stream("!-- nothing here").len(), 0);
        assert_eq!(stream("|-- nothing --|").len(), 0);
    }

    #[test]
    fn test_sentinels_pad_both_ends() {
        let tokens = stream("#foo:bar { }");
        assert!(tokens[0].is_no());
        assert!(tokens[tokens.len() + 1].is_no());
        for index in 1..=tokens.len() {
            assert!(!tokens[index].is_no(), "real token {} is NO", index);
        }
    }

    #[test]
    fn test_long_identifier() {
        let name = "a".repeat(10_000);
        let tokens = lex(&name).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].extent(), (0, 10_000));
    }

    #[test]
    fn test_identifier_with_underscore_and_digits() {
        assert_eq!(kinds("a_1_b2"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_dollar_word_is_unrecognised() {
        assert_eq!(lex("fo$o"), Err(LexError::Unrecognized { at: 0 }));
    }

    #[test]
    fn test_leading_underscore_is_unrecognised() {
        assert_eq!(lex("_foo"), Err(LexError::Unrecognized { at: 0 }));
    }

    #[test]
    fn test_backslash_word() {
        // the pre-scan admits a backslash with a graphic follower; the
        // classifier reads it as plain punctuation
        assert_eq!(kinds("\\x"), vec![TokenKind::Special, TokenKind::Identifier]);
    }

    #[test]
    fn test_scope_braces() {
        assert_eq!(
            kinds("{ x }"),
            vec![
                TokenKind::Special,
                TokenKind::Identifier,
                TokenKind::Special,
            ]
        );
    }

    #[test]
    fn test_full_declaration_shape() {
        assert_eq!(
            kinds("#main:( x:int, y ) :res { }"),
            vec![
                TokenKind::Command,    // #
                TokenKind::L,          // main
                TokenKind::R,          // (
                TokenKind::Lr,         // x:int
                TokenKind::Special,    // ,
                TokenKind::Identifier, // y
                TokenKind::R,          // )
                TokenKind::R,          // res
                TokenKind::Special,    // {
                TokenKind::Special,    // }
            ]
        );
    }

    #[test]
    fn test_initialization_shape() {
        assert_eq!(
            kinds("@counter: 0x0"),
            vec![TokenKind::Command, TokenKind::L, TokenKind::Literal]
        );
    }

    #[test]
    fn test_errors_leave_diagnostics() {
        let handler = Handler::new();
        let result = tokenize(&Source::new("[wrong] x"), &handler);
        assert!(result.is_err());
        assert!(handler.has_errors());
    }

    #[test]
    fn test_latched_error_beats_textual_match() {
        // `0z` fails the number sub-parser; nothing else matches `0z`
        // either, but the latched error is the one reported
        assert_eq!(lex("0z1"), Err(LexError::UnknownBase { at: 0 }));
    }

    // ==================== PROPERTIES ====================

    use proptest::prelude::*;

    /// Fragments that survive the pre-scan in any space-separated order.
    fn atom() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "foo",
            "bar_1",
            "x:y",
            "#",
            "@",
            "[mut]",
            "[entry inc]",
            "[entry]:[default]",
            ":name",
            "0x1F",
            "123",
            "`text`",
            "'c'",
            "{ }",
            "( a )",
            ".field",
            "x:*&y",
            "foo:( a )",
            "v: ",
        ])
    }

    fn source_text() -> impl Strategy<Value = String> {
        prop::collection::vec(atom(), 0..8).prop_map(|atoms| atoms.join(" "))
    }

    fn lex_with_chunk(text: &str, chunk_len: usize) -> Vec<Token> {
        let handler = Handler::new();
        Lexer::with_chunk_len(&Source::new(text), &handler, chunk_len)
            .run()
            .expect("atom-built source must lex")
            .iter()
            .copied()
            .collect()
    }

    proptest! {
        /// The emitted token sequence depends only on source bytes,
        /// never on allocator chunking.
        #[test]
        fn prop_chunking_does_not_change_tokens(text in source_text()) {
            let baseline = lex_with_chunk(&text, crate::TOKENS_CHUNK);
            for chunk_len in [1, 2, 3, 7, 64] {
                prop_assert_eq!(&baseline, &lex_with_chunk(&text, chunk_len));
            }
        }

        /// Token extents never run backwards and never overlap.
        #[test]
        fn prop_tokens_are_monotonic(text in source_text()) {
            let tokens = lex_with_chunk(&text, crate::TOKENS_CHUNK);
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].extent().1 <= pair[1].extent().0);
            }
            for token in &tokens {
                let (start, end) = token.extent();
                prop_assert!(start <= end && end <= text.len());
            }
        }

        /// Graphic bytes outside every token extent are structural:
        /// pivots, literal delimiters, qualifier brackets, the PL
        /// period.
        #[test]
        fn prop_uncovered_bytes_are_structural(text in source_text()) {
            let tokens = lex_with_chunk(&text, crate::TOKENS_CHUNK);
            let mut covered = vec![false; text.len()];
            for token in &tokens {
                let (start, end) = token.extent();
                for slot in covered.iter_mut().take(end).skip(start) {
                    *slot = true;
                }
            }
            for (index, byte) in text.bytes().enumerate() {
                if byte.is_ascii_graphic() && !covered[index] {
                    prop_assert!(
                        matches!(byte, b':' | b'`' | b'\'' | b'[' | b']' | b'.'),
                        "byte {:?} at {} left uncovered",
                        byte as char,
                        index
                    );
                }
            }
        }

        /// The NO sentinels frame the array whatever the input.
        #[test]
        fn prop_sentinels_always_present(text in source_text()) {
            let handler = Handler::new();
            let tokens = tokenize(&Source::new(&text), &handler).expect("atom-built source must lex");
            prop_assert!(tokens[0].is_no());
            prop_assert!(tokens[tokens.len() + 1].is_no());
            prop_assert_eq!(tokens.raw_len(), tokens.len() + 2);
        }
    }
}
